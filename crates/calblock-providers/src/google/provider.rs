//! Google Calendar provider implementation.

use tokio::sync::RwLock;
use tracing::info;

use calblock_core::CalendarEventRequest;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, CalendarProvider, CreatedEvent};

use super::auth::{fetch_access_token, ServiceAccountKey};
use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;

/// Google Calendar provider.
///
/// The capability is acquired once per run via [`connect`](Self::connect);
/// if that fails, no submission is attempted. `create_event` calls made
/// before `connect` fail with an authentication error.
#[derive(Debug)]
pub struct GoogleProvider {
    config: GoogleConfig,
    http_client: reqwest::Client,
    api_client: RwLock<Option<GoogleCalendarClient>>,
}

impl GoogleProvider {
    /// Creates a new provider with the given configuration.
    ///
    /// This validates the configuration but performs no network I/O.
    pub fn new(config: GoogleConfig) -> ProviderResult<Self> {
        config.validate().map_err(ProviderError::configuration)?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Ok(Self {
            config,
            http_client,
            api_client: RwLock::new(None),
        })
    }

    /// Acquires the calendar capability: loads the service-account key and
    /// exchanges it for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the key cannot be read or the
    /// token exchange fails. Callers treat this as fatal to the run.
    pub async fn connect(&self) -> ProviderResult<()> {
        let key = ServiceAccountKey::from_file(&self.config.credentials_path)
            .map_err(|e| e.with_provider("google"))?;

        let token = fetch_access_token(&self.http_client, &key)
            .await
            .map_err(|e| e.with_provider("google"))?;

        let client = GoogleCalendarClient::new(token.token, self.config.timeout);
        *self.api_client.write().await = Some(client);

        info!(
            "authenticated as {} (token valid for {}s)",
            key.client_email, token.expires_in
        );
        Ok(())
    }

    /// Returns the calendar id events are created in.
    pub fn calendar_id(&self) -> &str {
        &self.config.calendar_id
    }
}

impl CalendarProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn create_event<'a>(
        &'a self,
        request: &'a CalendarEventRequest,
    ) -> BoxFuture<'a, ProviderResult<CreatedEvent>> {
        Box::pin(async move {
            let guard = self.api_client.read().await;
            let client = guard.as_ref().ok_or_else(|| {
                ProviderError::authentication("provider is not connected").with_provider("google")
            })?;
            client
                .insert_event(&self.config.calendar_id, request)
                .await
                .map_err(|e| e.with_provider("google"))
        })
    }

    fn is_authenticated(&self) -> bool {
        self.api_client
            .try_read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}
