pub mod export;

pub use export::{export_from_reader, run_export_command, ExportStats};
