use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None
)]
pub struct Args {
    /// JSON-lines file with one finding per line; reads stdin when omitted
    pub input: Option<PathBuf>,

    /// Directory to write the index and finding files to (default: current directory)
    #[arg(short, long)]
    pub directory: Option<String>,

    /// Include the matched location and matcher name in finding file names
    #[arg(long)]
    pub detailed_filenames: bool,

    /// Fail on the first line that is not a valid finding
    #[arg(long)]
    pub strict: bool,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub generate_config: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub input: Option<PathBuf>,
    pub directory: Option<String>,
    pub detailed_filenames: bool,
    pub strict: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for ExportArgs {
    fn from(args: &Args) -> Self {
        ExportArgs {
            input: args.input.clone(),
            directory: args.directory.clone(),
            detailed_filenames: args.detailed_filenames,
            strict: args.strict,
            config: args.config.clone(),
        }
    }
}

pub fn validate_export_args(args: &ExportArgs) -> Result<()> {
    if let Some(input) = &args.input {
        if !input.is_file() {
            return Err(anyhow!("Input file not found: {}", input.display()));
        }
    }

    if let Some(config) = &args.config {
        if !config.is_file() {
            return Err(anyhow!("Config file not found: {}", config.display()));
        }
    }

    Ok(())
}
