//! Per-hash analysis failures
//!
//! These never abort a batch. The analyzer collapses every variant into the
//! single `Error` verdict and only surfaces the detail through events.

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("lookup transport failure: {message}")]
    TransportFailure { message: String },

    #[error("lookup returned unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("lookup response could not be parsed")]
    UnparseableResponse,
}

impl UserFacingError for AnalysisError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnexpectedStatus { status: 401 | 403 } => {
                Some("Check that the API key is valid.")
            }
            Self::UnexpectedStatus { status: 429 } => {
                Some("The provider quota is exhausted; lower the concurrency or wait.")
            }
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        // errors are never cached, a later batch re-attempts the hash
        true
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::TransportFailure { .. } => "analysis.transport_failure",
            Self::UnexpectedStatus { .. } => "analysis.unexpected_status",
            Self::UnparseableResponse => "analysis.unparseable_response",
        })
    }
}
