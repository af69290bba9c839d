//! Per-hash processing inside a lane

use crate::scheduler::BatchContext;
use futures::FutureExt;
use hashscan_errors::AnalysisError;
use hashscan_events::{AnalysisEvent, EventEmitter, FailureContext};
use hashscan_types::{AnalysisResult, Hash};
use std::panic::AssertUnwindSafe;

/// Where a verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Sentinel,
    Remote,
}

/// Verdict for one hash plus the path that produced it
#[derive(Debug, Clone)]
pub struct Resolution {
    pub result: AnalysisResult,
    pub source: ResolutionSource,
}

impl Resolution {
    /// Whether the lane must wait out its quota cycle afterwards
    ///
    /// Every attempted provider call counts against the quota, whatever its
    /// outcome. Local answers do not.
    #[must_use]
    pub fn is_paced(&self) -> bool {
        match self.source {
            ResolutionSource::Remote => true,
            ResolutionSource::Cache | ResolutionSource::Sentinel => false,
        }
    }
}

/// Resolve one hash: cache, then sentinel, then provider
///
/// Never fails. Lookup errors, unexpected statuses, unusable bodies and
/// panics inside the lookup all become `AnalysisResult::Error`.
pub(crate) async fn resolve(lane: usize, hash: &Hash, ctx: &BatchContext) -> Resolution {
    if let Some(cached) = ctx.history.get(hash) {
        ctx.reporter.emit_analysis(AnalysisEvent::CacheHit {
            hash: hash.to_string(),
            verdict: cached.label().to_string(),
        });
        return Resolution {
            result: cached,
            source: ResolutionSource::Cache,
        };
    }

    if ctx.settings.is_sentinel(hash) {
        ctx.reporter.emit_analysis(AnalysisEvent::SentinelMatched {
            hash: hash.to_string(),
        });
        return Resolution {
            result: AnalysisResult::virus_found(None),
            source: ResolutionSource::Sentinel,
        };
    }

    ctx.reporter.emit_analysis(AnalysisEvent::LookupStarted {
        hash: hash.to_string(),
        lane,
    });

    let outcome = AssertUnwindSafe(async { crate::classify(ctx.client.lookup(hash).await) })
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            Err(AnalysisError::TransportFailure {
                message: "lookup panicked".to_string(),
            })
        });

    let result = match outcome {
        Ok(verdict) => verdict,
        Err(reason) => {
            ctx.reporter.emit_analysis(AnalysisEvent::LookupFailed {
                hash: hash.to_string(),
                failure: FailureContext::from_error(&reason),
            });
            AnalysisResult::Error
        }
    };

    Resolution {
        result,
        source: ResolutionSource::Remote,
    }
}
