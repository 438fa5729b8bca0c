//! One full mirroring run: enumerate, dispatch, drain, report.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::runtime;
use tokio::task;
use tracing::{debug, error, info, warn};

use gitsync_core::{RepoSource, Repository, RunConfig, SyncMode, UrlAuth};
use gitsync_git::GitRunner;

use crate::error::{io_err, EngineError};
use crate::failures::{FailureTracker, SyncFailure};
use crate::pool::{WorkerPool, CONCURRENCY, QUEUE_DEPTH};
use crate::strategy::{ReplaceStrategy, SyncOutcome, SyncStrategy, SyncTask, UpdateStrategy};

/// Summary of one completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Sync tasks dispatched — one per enumerated repository.
    pub attempted: usize,
    /// Every failed outcome, in the order workers recorded them.
    pub failures: Vec<SyncFailure>,
    pub duration: Duration,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

/// Execute one run with the default pool shape ([`CONCURRENCY`] workers,
/// [`QUEUE_DEPTH`] queued tasks).
///
/// Phases in order: enumerate every repository (fatal on any provider
/// error, before anything is dispatched), submit one task per repository to
/// the pool, drain, then report. Per-repository git failures are recorded
/// and do not fail the run; a fatal error raised inside a worker is captured
/// and returned once the remaining tasks have drained.
pub async fn run(
    config: Arc<RunConfig>,
    source: Arc<dyn RepoSource>,
    git: Arc<dyn GitRunner>,
    auth: Arc<UrlAuth>,
) -> Result<RunReport, EngineError> {
    run_with_pool(config, source, git, auth, CONCURRENCY, QUEUE_DEPTH).await
}

/// [`run`] with an explicit pool shape. Tests size the pool themselves
/// instead of going through the fixed defaults.
pub async fn run_with_pool(
    config: Arc<RunConfig>,
    source: Arc<dyn RepoSource>,
    git: Arc<dyn GitRunner>,
    auth: Arc<UrlAuth>,
    concurrency: usize,
    queue_depth: usize,
) -> Result<RunReport, EngineError> {
    let started = Instant::now();

    let repositories = enumerate(source).await?;
    info!(repositories = repositories.len(), "enumeration complete");

    let strategy: Arc<dyn SyncStrategy> = match config.mode {
        SyncMode::Update => Arc::new(UpdateStrategy::new(git, auth)),
        SyncMode::Replace => Arc::new(ReplaceStrategy::new(git, auth)),
    };

    let tracker = Arc::new(FailureTracker::new());
    let fatal: Arc<Mutex<Option<EngineError>>> = Arc::new(Mutex::new(None));
    let pool = WorkerPool::new(concurrency, queue_depth);

    let attempted = repositories.len();
    for repository in repositories {
        let task = SyncTask::new(&config.output_dir, repository);
        pool.submit(execute(
            task,
            Arc::clone(&config),
            Arc::clone(&strategy),
            Arc::clone(&tracker),
            Arc::clone(&fatal),
        ))
        .await?;
    }
    pool.drain().await;

    if let Some(err) = fatal.lock().expect("fatal slot poisoned").take() {
        return Err(err);
    }

    let failures = match Arc::try_unwrap(tracker) {
        Ok(tracker) => tracker.into_failures(),
        Err(tracker) => tracker.snapshot(),
    };
    let report = RunReport {
        attempted,
        failures,
        duration: started.elapsed(),
    };
    report_summary(&report);
    Ok(report)
}

/// Build a multi-threaded runtime and drive [`run`] to completion, for the
/// synchronous CLI entry point.
pub fn run_blocking(
    config: Arc<RunConfig>,
    source: Arc<dyn RepoSource>,
    git: Arc<dyn GitRunner>,
    auth: Arc<UrlAuth>,
) -> Result<RunReport, EngineError> {
    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;
    runtime.block_on(run(config, source, git, auth))
}

/// Enumerate every repository visible to the account, strictly sequentially.
///
/// The blocking provider client runs on the blocking thread pool. Any error
/// aborts the run before a single task is dispatched.
async fn enumerate(source: Arc<dyn RepoSource>) -> Result<Vec<Repository>, EngineError> {
    task::spawn_blocking(move || {
        let mut all = Vec::new();
        for workspace in source.workspaces()? {
            let repositories = source.repositories(&workspace)?;
            debug!(
                workspace = %workspace,
                repositories = repositories.len(),
                "enumerated workspace"
            );
            all.extend(repositories);
        }
        Ok(all)
    })
    .await
    .map_err(|_| EngineError::Pool("enumeration task aborted"))?
}

/// One worker's handling of one task.
///
/// Dry-run stops here: the would-have line is logged and neither the
/// strategy nor the filesystem is touched.
async fn execute(
    task: SyncTask,
    config: Arc<RunConfig>,
    strategy: Arc<dyn SyncStrategy>,
    tracker: Arc<FailureTracker>,
    fatal: Arc<Mutex<Option<EngineError>>>,
) {
    if config.dry_run {
        info!(
            repo = %task.repository.full_name,
            path = %task.local_path.display(),
            "would sync"
        );
        return;
    }
    info!(repo = %task.repository.full_name, "sync");
    match strategy.sync(&task).await {
        Ok(SyncOutcome::Success) => {}
        Ok(SyncOutcome::Failed(failure)) => {
            warn!(
                repo = %failure.repository.full_name,
                diagnostic = %failure.diagnostic,
                "sync failed"
            );
            tracker.record(failure);
        }
        Err(err) => {
            error!(repo = %task.repository.full_name, error = %err, "fatal error during sync");
            let mut slot = fatal.lock().expect("fatal slot poisoned");
            if slot.is_none() {
                *slot = Some(err);
            }
        }
    }
}

fn report_summary(report: &RunReport) {
    info!(
        attempted = report.attempted,
        failed = report.failures.len(),
        elapsed_ms = report.duration.as_millis() as u64,
        "run complete"
    );
    for failure in &report.failures {
        info!(repo = %failure.repository.full_name, "failed to sync");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_success_count_is_the_remainder() {
        let report = RunReport {
            attempted: 5,
            failures: vec![SyncFailure::new(
                Repository::new("acme/api", "https://bitbucket.org/acme/api.git"),
                "authentication failed",
            )],
            duration: Duration::from_millis(10),
        };
        assert_eq!(report.succeeded(), 4);
    }
}
