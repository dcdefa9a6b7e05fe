//! Markdown exporter: one file per finding plus an `index.md` table.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mdreport_core::ResultEvent;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::exporter::Exporter;
use crate::filename::finding_filename;

pub const INDEX_FILE_NAME: &str = "index.md";

const INDEX_HEADER: &str = "|Hostname/IP|Finding|Severity|\n|-|-|-|\n";

/// Options for the Markdown exporter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Directory to export findings to. Empty means the current working directory.
    #[serde(default)]
    pub directory: String,

    /// Append the matched location and matcher name to finding file names.
    #[serde(default)]
    pub detailed_filenames: bool,
}

impl MarkdownOptions {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }
}

pub struct MarkdownExporter {
    directory: PathBuf,
    options: MarkdownOptions,
}

impl MarkdownExporter {
    /// Create the exporter, preparing the output directory and a fresh index.
    ///
    /// A failure to create the directory is only logged; the index write that
    /// follows reports the real problem if the directory is unusable.
    pub fn new(options: MarkdownOptions) -> Result<Self, ExportError> {
        let directory = if options.directory.is_empty() {
            std::env::current_dir().map_err(ExportError::WorkingDirectory)?
        } else {
            PathBuf::from(&options.directory)
        };

        if let Err(e) = create_output_dir(&directory) {
            log::warn!(
                "Failed to create output directory {}: {}",
                directory.display(),
                e
            );
        }

        let index_path = directory.join(INDEX_FILE_NAME);
        write_file(&index_path, INDEX_HEADER.as_bytes()).map_err(|source| {
            ExportError::IndexInit {
                path: index_path.clone(),
                source,
            }
        })?;

        log::debug!("Markdown index initialized: {}", index_path.display());

        Ok(Self { directory, options })
    }

    /// Resolved output directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    pub fn index_path(&self) -> PathBuf {
        self.directory.join(INDEX_FILE_NAME)
    }

    /// Body of the per-finding file.
    pub fn render_finding(event: &ResultEvent) -> String {
        format!(
            "### {}\n---\n{}",
            mdreport_format::summary(event),
            mdreport_format::markdown_description(event)
        )
    }

    /// Index table row linking to `filename`.
    pub fn index_row(event: &ResultEvent, filename: &str) -> String {
        format!(
            "|[{}]({})|{} {}|{}|\n",
            event.host,
            filename,
            event.template_id,
            event.matcher(),
            event.severity()
        )
    }

    fn append_index_row(&self, row: &str) -> io::Result<()> {
        // No create: a vanished index means the directory is gone.
        let mut file = OpenOptions::new().append(true).open(self.index_path())?;
        file.write_all(row.as_bytes())
    }
}

impl Exporter for MarkdownExporter {
    fn export(&mut self, event: &ResultEvent) -> Result<(), ExportError> {
        let filename = finding_filename(event, self.options.detailed_filenames);
        let data = Self::render_finding(event);

        self.append_index_row(&Self::index_row(event, &filename))
            .map_err(|source| ExportError::IndexAppend {
                path: self.index_path(),
                source,
            })?;

        let finding_path = self.directory.join(&filename);
        write_file(&finding_path, data.as_bytes()).map_err(|source| {
            ExportError::FindingWrite {
                path: finding_path.clone(),
                source,
            }
        })?;

        log::debug!(
            "Exported {} on {} to {}",
            event.template_id,
            event.host,
            finding_path.display()
        );

        Ok(())
    }

    fn close(&mut self) -> Result<(), ExportError> {
        Ok(())
    }
}

fn create_output_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)?.write_all(contents)
}
