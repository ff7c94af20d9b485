//! calblock CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use calblock_cli::cli::{Cli, Command, ConfigAction};
use calblock_cli::commands;
use calblock_cli::config::ClientConfig;
use calblock_cli::error::{CliError, CliResult};
use calblock_core::{init_tracing, TracingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(CliError::Config)?
    } else {
        ClientConfig::load().unwrap_or_default()
    };

    match cli.command {
        Command::Sync(args) => {
            let summary = commands::sync::run(&args, &config).await?;
            // A completed run with dropped rows or failed submissions still
            // reports through the summary, but exits nonzero.
            if summary.is_clean() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Config { action } => {
            match action {
                ConfigAction::Dump => commands::config::dump(&config)?,
                ConfigAction::Validate => commands::config::validate(&config)?,
                ConfigAction::Path => commands::config::path()?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
