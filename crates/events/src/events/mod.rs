use serde::{Deserialize, Serialize};

use crate::EventSource;
use hashscan_errors::UserFacingError;

/// Why a lookup failed, flattened for events and logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(str::to_string),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(str::to_string),
            retryable: error.is_retryable(),
        }
    }
}

pub mod analysis;
pub mod general;

pub use analysis::*;
pub use general::*;

/// Every event hashscan emits, keyed by domain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Warnings and errors outside a single lookup
    General(GeneralEvent),

    /// Batch analyzer events
    Analysis(AnalysisEvent),
}

impl AppEvent {
    /// Identify the source domain for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::General(_) => EventSource::General,
            Self::Analysis(_) => EventSource::Analysis,
        }
    }

    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Error { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Analysis(AnalysisEvent::LookupFailed { .. }) => Level::WARN,

            Self::Analysis(AnalysisEvent::Resolved { verdict, .. }) if verdict == "virus_found" => {
                Level::WARN
            }

            Self::Analysis(
                AnalysisEvent::CacheHit { .. }
                | AnalysisEvent::LookupStarted { .. }
                | AnalysisEvent::LanePaced { .. },
            ) => Level::DEBUG,

            _ => Level::INFO,
        }
    }
}
