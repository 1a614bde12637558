use std::sync::atomic::{AtomicU64, Ordering};

use super::SearchOutcome;

/// Hands out strictly increasing sequence numbers, starting at 1.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    last: AtomicU64,
}

impl SequenceCounter {
    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Holds the newest applied search outcome.
///
/// Overlapping searches can finish out of order; an outcome older than the
/// one already applied is dropped.
#[derive(Debug, Default)]
pub struct LatestResults {
    current: Option<SearchOutcome>,
}

impl LatestResults {
    /// Apply `outcome` unless a newer one is already in place. Returns whether
    /// it was applied.
    pub fn offer(&mut self, outcome: SearchOutcome) -> bool {
        if let Some(current) = &self.current {
            if outcome.sequence < current.sequence {
                tracing::debug!(
                    stale = outcome.sequence,
                    current = current.sequence,
                    "dropping stale search outcome"
                );
                return false;
            }
        }
        self.current = Some(outcome);
        true
    }

    #[must_use]
    pub fn current(&self) -> Option<&SearchOutcome> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn newest_sequence(&self) -> Option<u64> {
        self.current.as_ref().map(|o| o.sequence)
    }
}
