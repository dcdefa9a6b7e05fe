use anyhow::Result;
use clap::Parser;

use crate::cli::args::{validate_export_args, Args, ExportArgs};
use crate::cli::commands::run_export_command;
use crate::config::MdreportConfig;

pub struct RootCommand;

impl RootCommand {
    pub async fn execute() -> Result<()> {
        let args = Args::parse();
        init_logging(args.verbosity);

        if args.generate_config {
            println!("{}", MdreportConfig::generate_default_config());
            return Ok(());
        }

        let export_args = ExportArgs::from(&args);
        validate_export_args(&export_args)?;
        run_export_command(export_args).await
    }
}

/// `RUST_LOG` wins over the `-v` count.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}
