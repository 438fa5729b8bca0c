//! Error types for gitsync-engine.

use std::path::PathBuf;

use thiserror::Error;

use gitsync_core::ProviderError;

/// Fatal errors that abort a run.
///
/// Per-repository git failures are *not* represented here — they become
/// [`SyncOutcome::Failed`](crate::strategy::SyncOutcome) records and the run
/// continues.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Enumeration failed; with no repository list there is nothing to do.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A directory could not be created, renamed, or removed. This points at
    /// an environment problem (permissions, disk), not a per-repository one.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal plumbing gave out (a worker vanished, the queue closed early).
    #[error("worker pool failure: {0}")]
    Pool(&'static str),
}

/// Convenience constructor for [`EngineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.into(),
        source,
    }
}
