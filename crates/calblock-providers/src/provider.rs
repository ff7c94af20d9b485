//! CalendarProvider trait definition.
//!
//! The [`CalendarProvider`] trait is the capability the sync pipeline is
//! handed: a single `create_event` operation against an already-configured
//! calendar backend. The pipeline never sees transport or auth mechanics.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use calblock_core::CalendarEventRequest;
use serde::Deserialize;

use crate::error::{ProviderError, ProviderErrorCode, ProviderResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe while async functions in traits
/// remain awkward with dynamic dispatch.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An event the provider confirmed as created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    /// The provider-assigned event id.
    pub id: String,
    /// Link to the created event, if the provider returns one.
    #[serde(default)]
    pub html_link: Option<String>,
}

/// The capability interface for calendar backends.
///
/// Implementations are expected to be `Send + Sync` and already
/// authenticated by the time `create_event` is called; acquisition failures
/// belong to the implementation's own connect step, which the run performs
/// once before any submission.
pub trait CalendarProvider: Send + Sync {
    /// Returns the name of this provider (e.g. "google").
    fn name(&self) -> &str;

    /// Submits one create-event call.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the provider rejects or fails this
    /// single call. Callers treat that as a per-record failure, not a
    /// batch abort.
    fn create_event<'a>(
        &'a self,
        request: &'a CalendarEventRequest,
    ) -> BoxFuture<'a, ProviderResult<CreatedEvent>>;

    /// Returns `true` if the provider currently holds usable credentials.
    fn is_authenticated(&self) -> bool;
}

/// A scripted outcome for one [`ScriptedProvider`] call.
#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Created(String),
    Failed(ProviderErrorCode, String),
}

/// A deterministic in-memory provider for tests.
///
/// Outcomes are programmed per call, in order; once the script runs out,
/// calls succeed with sequential `scripted-N` event ids. Every received
/// request is recorded for later inspection.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<ScriptedOutcome>>,
    received: Mutex<Vec<CalendarEventRequest>>,
}

impl ScriptedProvider {
    /// Creates a provider with an empty script (every call succeeds).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful outcome with the given event id.
    #[must_use]
    pub fn then_created(self, event_id: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Created(event_id.into()));
        self
    }

    /// Appends a failed outcome with the given code and message.
    #[must_use]
    pub fn then_failed(self, code: ProviderErrorCode, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Failed(code, message.into()));
        self
    }

    /// Returns copies of every request received so far, in call order.
    pub fn received(&self) -> Vec<CalendarEventRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Returns how many calls have been made.
    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl CalendarProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn create_event<'a>(
        &'a self,
        request: &'a CalendarEventRequest,
    ) -> BoxFuture<'a, ProviderResult<CreatedEvent>> {
        let mut received = self.received.lock().unwrap();
        received.push(request.clone());
        let call_number = received.len();
        drop(received);

        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ScriptedOutcome::Created(format!("scripted-{}", call_number)));

        Box::pin(async move {
            match outcome {
                ScriptedOutcome::Created(id) => Ok(CreatedEvent {
                    id,
                    html_link: None,
                }),
                ScriptedOutcome::Failed(code, message) => {
                    Err(ProviderError::new(code, message).with_provider("scripted"))
                }
            }
        })
    }

    fn is_authenticated(&self) -> bool {
        true
    }
}
