//! The two sync strategies: incremental update and full replace.
//!
//! Both turn one `(local path, repository)` pair into a terminal
//! [`SyncOutcome`]. A git operation failing is a per-repository outcome; only
//! filesystem trouble (directory creation, backup renames) is fatal and
//! surfaces as an `Err`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use gitsync_core::{Repository, UrlAuth};
use gitsync_git::{GitError, GitRunner};

use crate::backup::{self, BackupState};
use crate::error::{io_err, EngineError};
use crate::failures::SyncFailure;

// ---------------------------------------------------------------------------
// Task and outcome
// ---------------------------------------------------------------------------

/// One repository's unit of work. Built by the orchestrator, consumed
/// exactly once by a worker, never mutated.
#[derive(Debug, Clone)]
pub struct SyncTask {
    pub local_path: PathBuf,
    pub repository: Repository,
}

impl SyncTask {
    pub fn new(output_dir: &Path, repository: Repository) -> Self {
        Self {
            local_path: repository.local_path(output_dir),
            repository,
        }
    }
}

/// Terminal outcome of executing one sync task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Success,
    Failed(SyncFailure),
}

/// A sync strategy turns one task into a terminal outcome.
#[async_trait]
pub trait SyncStrategy: Send + Sync {
    async fn sync(&self, task: &SyncTask) -> Result<SyncOutcome, EngineError>;
}

fn failed(task: &SyncTask, err: GitError) -> SyncOutcome {
    SyncOutcome::Failed(SyncFailure::new(task.repository.clone(), err.diagnostic()))
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Incremental sync: initialize the working copy if absent, then pull in
/// place.
///
/// Mutates in place rather than replacing, so it never destroys existing
/// state; a failed pull leaves the previous working copy untouched. Running
/// it twice with no upstream change is a no-op the second time.
pub struct UpdateStrategy {
    git: Arc<dyn GitRunner>,
    auth: Arc<UrlAuth>,
}

impl UpdateStrategy {
    pub fn new(git: Arc<dyn GitRunner>, auth: Arc<UrlAuth>) -> Self {
        Self { git, auth }
    }
}

#[async_trait]
impl SyncStrategy for UpdateStrategy {
    async fn sync(&self, task: &SyncTask) -> Result<SyncOutcome, EngineError> {
        fs::create_dir_all(&task.local_path)
            .await
            .map_err(|e| io_err(&task.local_path, e))?;
        if let Err(err) = self.git.init_if_absent(&task.local_path).await {
            return Ok(failed(task, err));
        }
        let url = self.auth.authenticated(&task.repository.clone_url);
        match self.git.pull(&task.local_path, &url).await {
            Ok(output) => {
                debug!(repo = %task.repository.full_name, output = %output, "pulled");
                Ok(SyncOutcome::Success)
            }
            Err(err) => Ok(failed(task, err)),
        }
    }
}

// ---------------------------------------------------------------------------
// Replace
// ---------------------------------------------------------------------------

/// Full re-materialization: move the current copy aside, mirror-clone from
/// scratch, and keep whichever side is good.
///
/// On success the backup is deleted; on a git failure the partial copy is
/// deleted and the backup remains the last-known-good state. The
/// authenticated URL is used only for the clone; the remote reference is
/// then pointed at the plain clone link before anything else happens.
pub struct ReplaceStrategy {
    git: Arc<dyn GitRunner>,
    auth: Arc<UrlAuth>,
}

impl ReplaceStrategy {
    pub fn new(git: Arc<dyn GitRunner>, auth: Arc<UrlAuth>) -> Self {
        Self { git, auth }
    }

    async fn materialize(&self, task: &SyncTask) -> Result<(), GitError> {
        let url = self.auth.authenticated(&task.repository.clone_url);
        self.git
            .mirror_clone(&url, &task.local_path.join(".git"))
            .await?;
        self.git
            .set_remote_url(&task.local_path, &task.repository.clone_url)
            .await?;
        self.git.checkout(&task.local_path).await?;
        Ok(())
    }
}

#[async_trait]
impl SyncStrategy for ReplaceStrategy {
    async fn sync(&self, task: &SyncTask) -> Result<SyncOutcome, EngineError> {
        let path = &task.local_path;
        match backup::classify(path) {
            BackupState::RepoOnly | BackupState::Both => {
                backup::take_backup(path).await?;
            }
            BackupState::Neither | BackupState::BackupOnly => {}
        }

        if let Err(err) = self.materialize(task).await {
            backup::drop_failed(path).await?;
            return Ok(failed(task, err));
        }

        // The fresh copy is now current; any backup generation is obsolete.
        let backup = backup::backup_path(path);
        if backup.exists() {
            backup::drop_backup(&backup).await?;
        }
        debug!(repo = %task.repository.full_name, "replaced");
        Ok(SyncOutcome::Success)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
