//! Export findings from a JSON-lines stream into Markdown files

use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use mdreport_core::ResultEvent;
use mdreport_reports::{Exporter, MarkdownExporter};

use crate::cli::args::ExportArgs;
use crate::config::MdreportConfig;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    pub exported: usize,
    pub skipped: usize,
}

pub async fn run_export_command(args: ExportArgs) -> Result<()> {
    // Load configuration with precedence: CLI args > env vars > config file
    let env_vars: HashMap<String, String> = std::env::vars().collect();
    let config = MdreportConfig::load_with_precedence(args.config.as_deref(), &args, &env_vars)?;

    let mut exporter = MarkdownExporter::new(config.markdown.clone())
        .context("Failed to initialize markdown exporter")?;
    log::info!("Writing markdown reports to {}", exporter.directory().display());

    let stats = match &config.input.path {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            export_from_reader(BufReader::new(file), &mut exporter, config.input.skip_invalid).await?
        }
        None => {
            export_from_reader(
                BufReader::new(tokio::io::stdin()),
                &mut exporter,
                config.input.skip_invalid,
            )
            .await?
        }
    };

    exporter.close()?;

    println!(
        "✅ Exported {} findings to {} ({} skipped)",
        stats.exported,
        exporter.directory().display(),
        stats.skipped
    );

    Ok(())
}

/// Export every finding in a JSON-lines stream, one `export` call per line.
///
/// Blank lines are ignored. Lines that fail to parse are skipped with a
/// warning when `skip_invalid` is set, and abort the run otherwise. Export
/// failures always abort.
pub async fn export_from_reader<R>(
    reader: R,
    exporter: &mut dyn Exporter,
    skip_invalid: bool,
) -> Result<ExportStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = ExportStats::default();
    let mut lines = reader.lines();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: ResultEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(e) if skip_invalid => {
                log::warn!("Skipping invalid finding on line {}: {}", line_number, e);
                stats.skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Invalid finding on line {}", line_number));
            }
        };

        exporter
            .export(&event)
            .with_context(|| format!("Failed to export finding on line {}", line_number))?;
        stats.exported += 1;
    }

    Ok(stats)
}
