//! Result exporters for the mdreport tool.
//!
//! This crate provides:
//! - The `Exporter` contract shared by every output sink
//! - The Markdown exporter (per-finding files plus an index table)
//! - Filename generation utilities

pub mod error;
pub mod exporter;
pub mod filename;
pub mod markdown;

pub use error::ExportError;
pub use exporter::Exporter;
pub use filename::{finding_filename, sanitize_filename};
pub use markdown::{MarkdownExporter, MarkdownOptions, INDEX_FILE_NAME};
