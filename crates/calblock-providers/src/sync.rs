//! Sequential submission and result aggregation.
//!
//! [`submit_all`] pushes each request through the provider capability one at
//! a time, in input order, and never aborts the batch on a per-call failure.
//! [`SyncReport`] is the pure reduction of the outcomes: counts only, no
//! retries, no reclassification.

use tracing::{info, warn};

use calblock_core::CalendarEventRequest;

use crate::provider::CalendarProvider;

/// The outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The provider confirmed the event.
    Created {
        /// The provider-assigned event id.
        event_id: String,
    },
    /// The provider rejected or failed this call.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// The per-record result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    /// Position of the request in the submitted batch.
    pub index: usize,
    /// The submitted event's summary, for reporting.
    pub summary: String,
    /// What happened.
    pub outcome: SyncOutcome,
}

impl SyncResult {
    /// Returns `true` if the event was created.
    pub fn is_created(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Created { .. })
    }
}

/// Success/failure counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Events the provider confirmed.
    pub created: usize,
    /// Submissions the provider rejected or failed.
    pub failed: usize,
}

impl SyncReport {
    /// Reduces an ordered result list to counts.
    pub fn from_results(results: &[SyncResult]) -> Self {
        results.iter().fold(Self::default(), |mut report, result| {
            if result.is_created() {
                report.created += 1;
            } else {
                report.failed += 1;
            }
            report
        })
    }

    /// Returns `true` if every submission was created.
    pub fn all_created(&self) -> bool {
        self.failed == 0
    }
}

/// Submits each request sequentially, preserving input order.
///
/// Each call is awaited before the next is issued; a failed call is recorded
/// as [`SyncOutcome::Failed`] and the batch continues. The provider must
/// already be connected: capability acquisition happens before this function
/// is ever reached.
pub async fn submit_all(
    provider: &dyn CalendarProvider,
    requests: &[CalendarEventRequest],
) -> Vec<SyncResult> {
    let mut results = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        match provider.create_event(request).await {
            Ok(created) => {
                info!("created event {} - {}", created.id, request.summary);
                results.push(SyncResult {
                    index,
                    summary: request.summary.clone(),
                    outcome: SyncOutcome::Created {
                        event_id: created.id,
                    },
                });
            }
            Err(e) => {
                warn!("failed to create event `{}`: {}", request.summary, e);
                results.push(SyncResult {
                    index,
                    summary: request.summary.clone(),
                    outcome: SyncOutcome::Failed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    results
}
