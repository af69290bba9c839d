use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Batch analyzer lifecycle
///
/// Every event of one batch carries the batch id as correlation id in its
/// metadata; `batch_id` is repeated on the boundary events for consumers
/// that only look at the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    /// Lanes spawned
    BatchStarted {
        batch_id: String,
        total: usize,
        lanes: usize,
    },

    /// Verdict served from the history cache
    CacheHit { hash: String, verdict: String },

    /// Test-mode sentinel short-circuited the provider
    SentinelMatched { hash: String },

    /// A lane is about to call the provider
    LookupStarted { hash: String, lane: usize },

    /// The provider call or its classification failed
    LookupFailed {
        hash: String,
        failure: FailureContext,
    },

    /// Final verdict for one hash
    Resolved {
        hash: String,
        verdict: String,
        remote: bool,
    },

    /// Lane waits out the rest of its quota cycle
    LanePaced { lane: usize, wait_ms: u64 },

    /// Every lane ran out of work
    BatchCompleted { batch_id: String, resolved: usize },

    /// The caller cancelled or superseded the batch
    BatchCancelled { batch_id: String, resolved: usize },
}
