//! Check rounds: run batches, fold verdicts, retry failed hashes

use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use futures::StreamExt;
use hashscan_analyzer::{BatchSlot, BatchTally, HashAnalyzer, History};
use hashscan_events::EventReceiver;
use hashscan_types::{AnalysisResult, Hash};
use serde::Serialize;
use std::collections::HashMap;
use std::pin::pin;
use std::time::Duration;
use tokio::select;
use tracing::info;

/// How many extra rounds to run and how long to wait before each
///
/// The wait is never shorter than the analyzer's cycle duration, so lanes
/// of the next round cannot start inside the quota window of the last one.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub retry_rounds: u32,
    pub refresh_interval: Duration,
}

/// Final verdict of one requested hash
#[derive(Debug, Serialize)]
pub struct HashVerdict {
    pub hash: Hash,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Outcome of a `check` invocation
#[derive(Debug, Serialize)]
pub struct ScanReport {
    /// Verdicts in request order
    pub results: Vec<HashVerdict>,
    pub tally: BatchTally,
    pub rounds: u32,
    /// Ctrl-C stopped the scan before every round finished
    pub interrupted: bool,
}

impl ScanReport {
    /// Process exit code: 2 when anything was flagged
    pub fn exit_code(&self) -> i32 {
        if self.tally.threats > 0 {
            2
        } else {
            0
        }
    }
}

/// Run rounds over `hashes` until every verdict is authoritative or the
/// retry budget is spent
///
/// Authoritative verdicts are folded into an in-memory history, so later
/// rounds only call the provider for hashes that ended in `Error`.
pub async fn run_scan(
    analyzer: &HashAnalyzer,
    hashes: &[Hash],
    options: ScanOptions,
    renderer: &OutputRenderer,
    events: &mut EventReceiver,
    handler: &EventHandler,
) -> Result<ScanReport, CliError> {
    let history = History::new();
    let mut verdicts: HashMap<Hash, AnalysisResult> = hashes
        .iter()
        .map(|hash| (hash.clone(), AnalysisResult::Pending))
        .collect();
    let mut slot = BatchSlot::new();
    let mut shutdown = pin!(tokio::signal::ctrl_c());
    let mut pending = hashes.to_vec();
    let mut rounds = 0;
    let mut interrupted = false;
    let round_gap = options
        .refresh_interval
        .max(analyzer.settings().min_cycle_duration);

    loop {
        rounds += 1;
        let mut stream = slot.start(analyzer, pending, &history);

        loop {
            select! {
                item = stream.next() => match item {
                    Some((hash, result)) => {
                        renderer.render_progress(&hash, &result)?;
                        history.record(hash.clone(), result.clone());
                        verdicts.insert(hash, result);
                    }
                    None => break,
                },
                Some(message) = events.recv() => handler.handle_event(message),
                _ = &mut shutdown => {
                    slot.cancel();
                    interrupted = true;
                    break;
                }
            }
        }
        drain_events(events, handler);

        pending = hashes
            .iter()
            .filter(|hash| verdicts.get(*hash) == Some(&AnalysisResult::Error))
            .cloned()
            .collect();
        if interrupted || pending.is_empty() || rounds > options.retry_rounds {
            break;
        }

        info!(
            failed = pending.len(),
            wait_secs = round_gap.as_secs(),
            "retrying failed lookups"
        );
        select! {
            () = tokio::time::sleep(round_gap) => {}
            _ = &mut shutdown => {
                interrupted = true;
                break;
            }
        }
    }

    let mut tally = BatchTally::new(hashes.len());
    let results = hashes
        .iter()
        .map(|hash| {
            let result = verdicts.remove(hash).unwrap_or_default();
            tally.record(&result);
            HashVerdict {
                hash: hash.clone(),
                result,
            }
        })
        .collect();

    Ok(ScanReport {
        results,
        tally,
        rounds,
        interrupted,
    })
}

fn drain_events(events: &mut EventReceiver, handler: &EventHandler) {
    while let Ok(message) = events.try_recv() {
        handler.handle_event(message);
    }
}
