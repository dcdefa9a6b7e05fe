use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to resolve working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    #[error("Failed to initialize index file {}: {source}", .path.display())]
    IndexInit { path: PathBuf, source: io::Error },

    #[error("Failed to append to index file {}: {source}", .path.display())]
    IndexAppend { path: PathBuf, source: io::Error },

    #[error("Failed to write finding file {}: {source}", .path.display())]
    FindingWrite { path: PathBuf, source: io::Error },
}
