//! Google Calendar API client.
//!
//! A thin HTTP client around the Calendar API v3 insert endpoint: request
//! building, status mapping, response parsing. Authentication is a bearer
//! token obtained elsewhere (see [`super::auth`]).

use std::time::Duration;

use tracing::debug;

use calblock_core::CalendarEventRequest;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::CreatedEvent;

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a new client with the given bearer token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Creates one event in the given calendar.
    ///
    /// # Errors
    ///
    /// Maps provider-side failures to [`ProviderError`]s: 401 to
    /// authentication, 403 to authorization, 429 to rate-limited (carrying
    /// any `Retry-After` hint), 400 to bad request, other non-success
    /// statuses to server errors.
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        request: &CalendarEventRequest,
    ) -> ProviderResult<CreatedEvent> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::network("request timeout")
                } else if e.is_connect() {
                    ProviderError::network(format!("connection failed: {}", e))
                } else {
                    ProviderError::network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, retry_after, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        let created: CreatedEvent = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse response: {}", e))
        })?;

        debug!("created event {} in calendar {}", created.id, calendar_id);
        Ok(created)
    }
}

/// Maps a non-success status to the matching provider error.
fn error_for_status(
    status: reqwest::StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> ProviderError {
    match status {
        reqwest::StatusCode::UNAUTHORIZED => {
            ProviderError::authentication("access token expired or invalid")
        }
        reqwest::StatusCode::FORBIDDEN => {
            ProviderError::authorization("access denied to calendar")
        }
        reqwest::StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(format!(
            "rate limit exceeded{}",
            retry_after
                .map(|s| format!(", retry after {} seconds", s))
                .unwrap_or_default()
        )),
        reqwest::StatusCode::BAD_REQUEST => {
            ProviderError::bad_request(format!("event payload rejected: {}", body))
        }
        other => ProviderError::server(format!("API error ({}): {}", other, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[test]
    fn status_mapping() {
        assert_eq!(
            error_for_status(reqwest::StatusCode::UNAUTHORIZED, None, "").code(),
            ProviderErrorCode::AuthenticationFailed
        );
        assert_eq!(
            error_for_status(reqwest::StatusCode::FORBIDDEN, None, "").code(),
            ProviderErrorCode::AuthorizationFailed
        );
        assert_eq!(
            error_for_status(reqwest::StatusCode::BAD_REQUEST, None, "bad time").code(),
            ProviderErrorCode::BadRequest
        );
        assert_eq!(
            error_for_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, None, "").code(),
            ProviderErrorCode::ServerError
        );
    }

    #[test]
    fn rate_limit_carries_retry_hint() {
        let err = error_for_status(reqwest::StatusCode::TOO_MANY_REQUESTS, Some(42), "");
        assert_eq!(err.code(), ProviderErrorCode::RateLimited);
        assert!(err.message().contains("retry after 42 seconds"));
    }
}
