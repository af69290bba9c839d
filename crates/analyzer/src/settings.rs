//! Analyzer settings: lane count, quota cycle and the test-mode sentinel

use hashscan_config::Config;
use hashscan_types::Hash;
use std::time::Duration;

/// Quota shaping and test switches for one analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    /// Maximum lanes, i.e. lookups in flight
    pub concurrency_limit: usize,
    /// Minimum time between the starts of two remote lookups on one lane
    pub min_cycle_duration: Duration,
    /// Hash reported as infected without a lookup (test mode only)
    pub sentinel: Option<Hash>,
}

impl AnalyzerSettings {
    #[must_use]
    pub fn new(concurrency_limit: usize, min_cycle_duration: Duration) -> Self {
        Self {
            concurrency_limit,
            min_cycle_duration,
            sentinel: None,
        }
    }

    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<Hash>) -> Self {
        self.sentinel = Some(sentinel.into());
        self
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            concurrency_limit: config.analyzer.concurrency_limit,
            min_cycle_duration: config.analyzer.min_cycle_duration(),
            sentinel: config.active_sentinel().map(Hash::new),
        }
    }

    /// Lanes to spawn for a batch of `pending` hashes
    #[must_use]
    pub fn lanes_for(&self, pending: usize) -> usize {
        self.concurrency_limit.max(1).min(pending)
    }

    pub(crate) fn is_sentinel(&self, hash: &Hash) -> bool {
        self.sentinel
            .as_ref()
            .is_some_and(|sentinel| sentinel.as_str().eq_ignore_ascii_case(hash.as_str()))
    }
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
