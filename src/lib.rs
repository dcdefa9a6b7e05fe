pub mod cli;
pub mod config;

// Re-export core types for convenience
pub use mdreport_core::{ResultEvent, Severity};
pub use mdreport_reports::{Exporter, MarkdownExporter, MarkdownOptions};
