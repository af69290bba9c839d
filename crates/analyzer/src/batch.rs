//! Batch handles, supersession and progress accounting

use crate::history::History;
use crate::scheduler::{AnalysisStream, HashAnalyzer};
use hashscan_types::{AnalysisResult, Hash};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Cancellation handle for one running batch
#[derive(Debug, Clone)]
pub struct BatchHandle {
    id: Uuid,
    token: CancellationToken,
}

impl BatchHandle {
    pub(crate) fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            token: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stop claiming work, abandon in-flight lookups and end the stream
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// Keeps at most one batch alive
///
/// Starting a batch cancels whatever batch the slot held before. The old
/// batch is not awaited; its stream simply ends.
#[derive(Debug, Default)]
pub struct BatchSlot {
    current: Option<BatchHandle>,
}

impl BatchSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the running batch, if any, and start a new one
    pub fn start<I>(&mut self, analyzer: &HashAnalyzer, hashes: I, history: &History) -> AnalysisStream
    where
        I: IntoIterator<Item = Hash>,
    {
        self.cancel();
        let stream = analyzer.analyze(hashes, history);
        self.current = Some(stream.handle());
        stream
    }

    /// Cancel the running batch, if any
    pub fn cancel(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
    }

    /// Handle of the batch started last, unless it was cancelled
    #[must_use]
    pub fn current(&self) -> Option<&BatchHandle> {
        self.current.as_ref().filter(|handle| !handle.is_cancelled())
    }
}

/// Running counters over the verdicts of one batch
///
/// `unfinished` only drops for authoritative verdicts; an `Error` leaves the
/// hash unfinished so a later batch can settle it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchTally {
    pub total: usize,
    pub unfinished: usize,
    pub clean: usize,
    pub threats: usize,
    pub errors: usize,
}

impl BatchTally {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            unfinished: total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, result: &AnalysisResult) {
        match result {
            AnalysisResult::Pending => {}
            AnalysisResult::NoThreat => {
                self.clean += 1;
                self.unfinished = self.unfinished.saturating_sub(1);
            }
            AnalysisResult::VirusFound { .. } => {
                self.threats += 1;
                self.unfinished = self.unfinished.saturating_sub(1);
            }
            AnalysisResult::Error => self.errors += 1,
        }
    }

    /// Every hash has an authoritative verdict
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.unfinished == 0
    }
}
