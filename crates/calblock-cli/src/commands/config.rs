//! Configuration commands.

use crate::config::ClientConfig;
use crate::error::{CliError, CliResult};

/// Dump the effective configuration to stdout.
pub fn dump(config: &ClientConfig) -> CliResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> CliResult<()> {
    if let Some(ref path) = config.google.credentials_path {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "credentials file does not exist: {}",
                path.display()
            )));
        }
    }

    if config.google.calendar_id.trim().is_empty() {
        return Err(CliError::Config(
            "google.calendar_id must not be empty".to_string(),
        ));
    }

    if config.sync.timezone.trim().is_empty() {
        return Err(CliError::Config(
            "sync.timezone must not be empty".to_string(),
        ));
    }

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path() -> CliResult<()> {
    println!("config: {}", ClientConfig::default_path().display());
    Ok(())
}
