//! Structured logging integration for events
//!
//! Converts analyzer and general events into tracing records with structured
//! fields, so a `--debug` JSON log carries the full batch history.

use hashscan_events::{AnalysisEvent, AppEvent, EventMessage, GeneralEvent};
use tracing::{debug, error, info, warn};

/// Log an event through tracing at its level with structured fields
pub fn log_event_with_tracing(message: &EventMessage) {
    let meta = &message.meta;

    match &message.event {
        AppEvent::Analysis(analysis_event) => match analysis_event {
            AnalysisEvent::BatchStarted {
                batch_id,
                total,
                lanes,
            } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    batch_id = %batch_id,
                    total = total,
                    lanes = lanes,
                    "Batch started"
                );
            }
            AnalysisEvent::CacheHit { hash, verdict } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    hash = %hash,
                    verdict = %verdict,
                    "Verdict served from history"
                );
            }
            AnalysisEvent::SentinelMatched { hash } => {
                info!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    hash = %hash,
                    "Test sentinel matched"
                );
            }
            AnalysisEvent::LookupStarted { hash, lane } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    hash = %hash,
                    lane = lane,
                    "Lookup started"
                );
            }
            AnalysisEvent::LookupFailed { hash, failure } => {
                warn!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    hash = %hash,
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Lookup failed"
                );
            }
            AnalysisEvent::Resolved {
                hash,
                verdict,
                remote,
            } => {
                if verdict == "virus_found" {
                    warn!(
                        source = meta.source.as_str(),
                        correlation = ?meta.correlation_id,
                        hash = %hash,
                        remote = remote,
                        "Threat found"
                    );
                } else {
                    info!(
                        source = meta.source.as_str(),
                        correlation = ?meta.correlation_id,
                        hash = %hash,
                        verdict = %verdict,
                        remote = remote,
                        "Hash resolved"
                    );
                }
            }
            AnalysisEvent::LanePaced { lane, wait_ms } => {
                debug!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    lane = lane,
                    wait_ms = wait_ms,
                    "Lane waiting for quota"
                );
            }
            AnalysisEvent::BatchCompleted { batch_id, resolved } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    batch_id = %batch_id,
                    resolved = resolved,
                    "Batch completed"
                );
            }
            AnalysisEvent::BatchCancelled { batch_id, resolved } => {
                info!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    batch_id = %batch_id,
                    resolved = resolved,
                    "Batch cancelled"
                );
            }
        },

        AppEvent::General(general_event) => match general_event {
            GeneralEvent::Warning { message } => {
                warn!(
                    source = meta.source.as_str(),
                    correlation = ?meta.correlation_id,
                    "{message}"
                );
            }
            GeneralEvent::Error { message, details } => {
                error!(
                    source = meta.source.as_str(),
                    event_id = %meta.event_id,
                    correlation = ?meta.correlation_id,
                    details = ?details,
                    "{message}"
                );
            }
        },
    }
}
