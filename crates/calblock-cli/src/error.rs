//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that abort a run.
///
/// Row- and record-level problems never surface here; they are absorbed by
/// their stage and reported through the run summary instead.
#[derive(Debug)]
pub enum CliError {
    /// Configuration error.
    Config(String),
    /// The schedule could not be read at all.
    Schedule(calblock_core::ParseError),
    /// Provider error (authentication, connection).
    Provider(calblock_providers::ProviderError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Schedule(err) => write!(f, "schedule error: {}", err),
            Self::Provider(err) => write!(f, "provider error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schedule(err) => Some(err),
            Self::Provider(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<calblock_core::ParseError> for CliError {
    fn from(err: calblock_core::ParseError) -> Self {
        Self::Schedule(err)
    }
}

impl From<calblock_providers::ProviderError> for CliError {
    fn from(err: calblock_providers::ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_the_stage() {
        let err = CliError::Config("no credentials path".into());
        assert_eq!(
            err.to_string(),
            "configuration error: no credentials path"
        );

        let err: CliError = calblock_providers::ProviderError::authentication("bad key").into();
        assert!(err.to_string().starts_with("provider error:"));
    }
}
