//! Google Calendar provider configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for [`GoogleProvider`](super::GoogleProvider).
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Path to the service-account credentials JSON file.
    pub credentials_path: PathBuf,
    /// Target calendar id; `primary` is the account's default calendar.
    pub calendar_id: String,
    /// Timeout applied to each HTTP call.
    pub timeout: Duration,
}

impl GoogleConfig {
    /// Creates a configuration for the given credentials file.
    pub fn new(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            calendar_id: "primary".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the target calendar id.
    #[must_use]
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Set the per-call HTTP timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.credentials_path.as_os_str().is_empty() {
            return Err("credentials path is empty".to_string());
        }
        if self.calendar_id.trim().is_empty() {
            return Err("calendar id is empty".to_string());
        }
        Ok(())
    }
}
