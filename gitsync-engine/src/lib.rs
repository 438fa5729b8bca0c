//! The sync engine: a bounded worker pool, the update and replace
//! strategies, working-copy snapshots, and the orchestrator that runs one
//! full pass over every enumerated repository.
//!
//! # Modules
//!
//! - [`pool`] — fixed worker pool fed by a bounded task queue
//! - [`strategy`] — the per-repository sync strategies
//! - [`backup`] — rename-based snapshots used by the replace strategy
//! - [`failures`] — shared accumulator for per-repository failures
//! - [`run`] — enumerate, dispatch, drain, report
//! - [`error`] — [`EngineError`]

pub mod backup;
pub mod error;
pub mod failures;
pub mod pool;
pub mod run;
pub mod strategy;

pub use error::EngineError;
pub use failures::{FailureTracker, SyncFailure};
pub use pool::{WorkerPool, CONCURRENCY, QUEUE_DEPTH};
pub use run::{run, run_blocking, run_with_pool, RunReport};
pub use strategy::{ReplaceStrategy, SyncOutcome, SyncStrategy, SyncTask, UpdateStrategy};
