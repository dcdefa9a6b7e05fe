use mdreport_core::ResultEvent;

use crate::error::ExportError;

/// An output sink for findings.
///
/// Exporters take `&mut self` so a single instance is never driven from two
/// places at once. Nothing stops two instances from sharing an output
/// location; callers serialize those themselves.
pub trait Exporter {
    /// Export one finding.
    fn export(&mut self, event: &ResultEvent) -> Result<(), ExportError>;

    /// Release the exporter at the end of a scan.
    fn close(&mut self) -> Result<(), ExportError>;
}
