//! Caller-owned memo of resolved verdicts

use dashmap::DashMap;
use hashscan_types::{AnalysisResult, Hash};
use std::sync::Arc;

/// Shared hash → verdict table
///
/// Clones share the same table. Lanes only ever read it; folding results back
/// in is left to whoever consumes the stream, usually via [`History::record`].
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Arc<DashMap<Hash, AnalysisResult>>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, hash: &Hash) -> Option<AnalysisResult> {
        self.entries.get(hash).map(|entry| entry.value().clone())
    }

    /// Remember a verdict unless it is `Error` or `Pending`
    ///
    /// Returns whether the verdict was stored. Non-authoritative verdicts are
    /// skipped so the next batch asks the provider again.
    pub fn record(&self, hash: Hash, result: AnalysisResult) -> bool {
        if !result.is_authoritative() {
            return false;
        }
        self.entries.insert(hash, result);
        true
    }

    /// Store a verdict unconditionally
    pub fn insert(&self, hash: Hash, result: AnalysisResult) {
        self.entries.insert(hash, result);
    }

    pub fn forget(&self, hash: &Hash) -> Option<AnalysisResult> {
        self.entries.remove(hash).map(|(_, result)| result)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Hash, AnalysisResult)> for History {
    fn from_iter<I: IntoIterator<Item = (Hash, AnalysisResult)>>(iter: I) -> Self {
        let history = Self::new();
        for (hash, result) in iter {
            history.insert(hash, result);
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_skips_non_authoritative() {
        let history = History::new();
        assert!(!history.record(Hash::new("a"), AnalysisResult::Error));
        assert!(!history.record(Hash::new("b"), AnalysisResult::Pending));
        assert!(history.record(Hash::new("c"), AnalysisResult::NoThreat));
        assert!(history.record(Hash::new("d"), AnalysisResult::virus_found(None)));

        assert_eq!(history.len(), 2);
        assert!(history.get(&Hash::new("a")).is_none());
        assert_eq!(history.get(&Hash::new("c")), Some(AnalysisResult::NoThreat));
    }

    #[test]
    fn test_clones_share_entries() {
        let history = History::new();
        let shared = history.clone();
        shared.record(Hash::new("a"), AnalysisResult::NoThreat);
        assert_eq!(history.len(), 1);

        assert_eq!(history.forget(&Hash::new("a")), Some(AnalysisResult::NoThreat));
        assert!(shared.is_empty());
    }
}
