//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// calblock - Block out your calendar from a schedule file
#[derive(Debug, Parser)]
#[command(name = "calblock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALBLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sync a blocking schedule into the calendar
    Sync(SyncArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for the sync command.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Schedule file (.xlsx or .csv)
    pub file: PathBuf,

    /// Path to the service-account credentials JSON
    #[arg(long, env = "CALBLOCK_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Target calendar id (defaults to the account's primary calendar)
    #[arg(long)]
    pub calendar_id: Option<String>,

    /// IANA timezone applied to event times
    #[arg(long)]
    pub timezone: Option<String>,

    /// Only sync blocks on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Only sync blocks on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Validate and map the schedule without creating any events
    #[arg(long)]
    pub dry_run: bool,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration
    Dump,
    /// Validate the configuration
    Validate,
    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sync_parses_range_flags() {
        let cli = Cli::parse_from([
            "calblock",
            "sync",
            "schedule.xlsx",
            "--from",
            "2025-03-01",
            "--to",
            "2025-03-31",
            "--dry-run",
        ]);
        match cli.command {
            Command::Sync(args) => {
                assert_eq!(args.file, PathBuf::from("schedule.xlsx"));
                assert_eq!(
                    args.from,
                    Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
                );
                assert_eq!(args.to, Some(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
                assert!(args.dry_run);
            }
            other => panic!("expected sync command, got {:?}", other),
        }
    }
}
