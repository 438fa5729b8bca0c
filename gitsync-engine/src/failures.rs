//! Concurrency-safe accumulator of failed sync attempts.

use std::sync::Mutex;

use gitsync_core::Repository;

/// One repository's failed sync and the diagnostic text it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub repository: Repository,
    pub diagnostic: String,
}

impl SyncFailure {
    pub fn new(repository: Repository, diagnostic: impl Into<String>) -> Self {
        Self {
            repository,
            diagnostic: diagnostic.into(),
        }
    }
}

/// Append-only failure list shared across all workers.
///
/// Workers append under an exclusive lock held only for the push. The
/// contents are read after the pool drains, when no writer remains. No
/// deduplication: a repository submitted twice may appear twice.
#[derive(Debug, Default)]
pub struct FailureTracker {
    failures: Mutex<Vec<SyncFailure>>,
}

impl FailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one failure.
    pub fn record(&self, failure: SyncFailure) {
        self.failures
            .lock()
            .expect("failure list poisoned")
            .push(failure);
    }

    /// Clone out the failures recorded so far, in append order.
    pub fn snapshot(&self) -> Vec<SyncFailure> {
        self.failures
            .lock()
            .expect("failure list poisoned")
            .clone()
    }

    /// Consume the tracker, yielding the failures without a final clone.
    pub fn into_failures(self) -> Vec<SyncFailure> {
        self.failures.into_inner().expect("failure list poisoned")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
