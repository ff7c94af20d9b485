//! Calendar provider capability and implementations.
//!
//! This crate defines the [`CalendarProvider`] trait the sync pipeline
//! submits through, the structured [`ProviderError`] type, the Google
//! Calendar implementation (service-account auth), a deterministic
//! [`ScriptedProvider`] double for tests, and the sequential
//! [`sync`] executor with its result aggregation.

pub mod error;
pub mod google;
pub mod provider;
pub mod sync;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use google::{GoogleConfig, GoogleProvider};
pub use provider::{BoxFuture, CalendarProvider, CreatedEvent, ScriptedProvider};
pub use sync::{submit_all, SyncOutcome, SyncReport, SyncResult};
