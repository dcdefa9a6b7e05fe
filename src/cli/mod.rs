pub mod args;
pub mod commands;
pub mod root;

pub use args::{validate_export_args, Args, ExportArgs};
pub use root::RootCommand;
