//! Lane scheduler and result stream

use crate::batch::BatchHandle;
use crate::history::History;
use crate::routine::resolve;
use crate::settings::AnalyzerSettings;
use crossbeam::queue::SegQueue;
use futures::Stream;
use hashscan_events::{AnalysisEvent, AppEvent, EventEmitter, EventSender, GeneralEvent};
use hashscan_net::LookupClient;
use hashscan_types::{AnalysisResult, Hash};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::DropGuard;

/// Emits batch events stamped with the batch id
pub(crate) struct BatchReporter {
    events: Option<EventSender>,
    batch_id: String,
}

impl EventEmitter for BatchReporter {
    fn event_sender(&self) -> Option<&EventSender> {
        self.events.as_ref()
    }

    fn correlation_id(&self) -> Option<&str> {
        Some(&self.batch_id)
    }
}

/// State shared by every lane of one batch
pub(crate) struct BatchContext {
    pub(crate) client: Arc<dyn LookupClient>,
    pub(crate) settings: AnalyzerSettings,
    pub(crate) history: History,
    pub(crate) reporter: BatchReporter,
    queue: SegQueue<Hash>,
    total: usize,
    resolved: AtomicUsize,
    handle: BatchHandle,
}

/// Batch hash analyzer
///
/// Holds the provider client and quota settings; each call to
/// [`analyze`](Self::analyze) starts an independent batch.
#[derive(Clone)]
pub struct HashAnalyzer {
    client: Arc<dyn LookupClient>,
    settings: AnalyzerSettings,
    events: Option<EventSender>,
}

impl HashAnalyzer {
    #[must_use]
    pub fn new(client: Arc<dyn LookupClient>, settings: AnalyzerSettings) -> Self {
        Self {
            client,
            settings,
            events: None,
        }
    }

    /// Report batch progress on `events`
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Start a batch over `hashes`
    ///
    /// Lanes start immediately on the current tokio runtime. Results arrive in
    /// completion order; within one lane they follow claim order. `history` is
    /// only read. Duplicate hashes are analysed independently.
    ///
    /// Dropping the returned stream cancels the batch.
    #[must_use]
    pub fn analyze<I>(&self, hashes: I, history: &History) -> AnalysisStream
    where
        I: IntoIterator<Item = Hash>,
    {
        let queue = SegQueue::new();
        for hash in hashes {
            queue.push(hash);
        }
        let total = queue.len();
        let lanes = self.settings.lanes_for(total);
        let handle = BatchHandle::new();

        let ctx = Arc::new(BatchContext {
            client: Arc::clone(&self.client),
            settings: self.settings.clone(),
            history: history.clone(),
            reporter: BatchReporter {
                events: self.events.clone(),
                batch_id: handle.id().to_string(),
            },
            queue,
            total,
            resolved: AtomicUsize::new(0),
            handle: handle.clone(),
        });

        ctx.reporter.emit_analysis(AnalysisEvent::BatchStarted {
            batch_id: handle.id().to_string(),
            total,
            lanes,
        });
        if let Some(sentinel) = &self.settings.sentinel {
            ctx.reporter.emit_warning(format!(
                "test mode: {sentinel} is reported as a threat without a lookup"
            ));
        }

        let (tx, rx) = mpsc::channel(lanes.max(1));
        let mut set = JoinSet::new();
        for lane in 0..lanes {
            set.spawn(run_lane(lane, Arc::clone(&ctx), tx.clone()));
        }
        drop(tx);
        tokio::spawn(supervise(set, ctx));

        AnalysisStream {
            rx,
            _guard: handle.token().clone().drop_guard(),
            handle,
        }
    }
}

/// One lane: claim, resolve, emit, pace, repeat
async fn run_lane(lane: usize, ctx: Arc<BatchContext>, tx: mpsc::Sender<(Hash, AnalysisResult)>) {
    let token = ctx.handle.token().clone();

    while !token.is_cancelled() {
        let Some(hash) = ctx.queue.pop() else {
            break;
        };

        let started = Instant::now();
        let resolution = tokio::select! {
            biased;
            () = token.cancelled() => break,
            resolution = resolve(lane, &hash, &ctx) => resolution,
        };

        ctx.reporter.emit_analysis(AnalysisEvent::Resolved {
            hash: hash.to_string(),
            verdict: resolution.result.label().to_string(),
            remote: resolution.is_paced(),
        });

        let paced = resolution.is_paced();
        let sent = tokio::select! {
            biased;
            () = token.cancelled() => break,
            sent = tx.send((hash, resolution.result)) => sent,
        };
        if sent.is_err() {
            break;
        }
        ctx.resolved.fetch_add(1, Ordering::Relaxed);

        // nothing left to claim, so no later call to space out
        if !paced || ctx.queue.is_empty() {
            continue;
        }

        let wait = ctx
            .settings
            .min_cycle_duration
            .saturating_sub(started.elapsed());
        if wait.is_zero() {
            continue;
        }

        ctx.reporter.emit_analysis(AnalysisEvent::LanePaced {
            lane,
            wait_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
        });
        tokio::select! {
            biased;
            () = token.cancelled() => break,
            () = tokio::time::sleep(wait) => {}
        }
    }
}

/// Waits for the lanes, aborts them on cancellation, reports the outcome
async fn supervise(mut lanes: JoinSet<()>, ctx: Arc<BatchContext>) {
    let token = ctx.handle.token().clone();

    loop {
        tokio::select! {
            joined = lanes.join_next() => match joined {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    if e.is_panic() {
                        ctx.reporter.emit(AppEvent::General(GeneralEvent::error_with_details(
                            "analysis lane panicked",
                            e.to_string(),
                        )));
                    }
                }
                None => break,
            },
            () = token.cancelled() => {
                lanes.abort_all();
                while lanes.join_next().await.is_some() {}
                break;
            }
        }
    }

    let resolved = ctx.resolved.load(Ordering::Relaxed);
    let batch_id = ctx.handle.id().to_string();
    if resolved == ctx.total {
        ctx.reporter
            .emit_analysis(AnalysisEvent::BatchCompleted { batch_id, resolved });
    } else {
        ctx.reporter
            .emit_analysis(AnalysisEvent::BatchCancelled { batch_id, resolved });
    }
}

/// Unordered stream of `(hash, verdict)` pairs for one batch
///
/// Ends when every hash is resolved or the batch is cancelled. Dropping the
/// stream cancels the batch.
pub struct AnalysisStream {
    rx: mpsc::Receiver<(Hash, AnalysisResult)>,
    handle: BatchHandle,
    _guard: DropGuard,
}

impl AnalysisStream {
    /// Handle that can cancel this batch from elsewhere
    #[must_use]
    pub fn handle(&self) -> BatchHandle {
        self.handle.clone()
    }

    /// Stop the batch; the stream yields nothing further
    pub fn cancel(&mut self) {
        self.handle.cancel();
        self.rx.close();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }
}

impl Stream for AnalysisStream {
    type Item = (Hash, AnalysisResult);

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.handle.is_cancelled() {
            self.rx.close();
            return Poll::Ready(None);
        }
        self.rx.poll_recv(cx)
    }
}

impl std::fmt::Debug for AnalysisStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisStream")
            .field("batch_id", &self.handle.id())
            .field("cancelled", &self.handle.is_cancelled())
            .finish_non_exhaustive()
    }
}
