//! Version-control command layer for gitsync.
//!
//! [`GitRunner`] is the narrow capability trait the sync strategies consume;
//! [`GitProcess`] implements it over the system `git` binary. Engine tests
//! drive the strategies with in-memory fakes instead, so nothing in the test
//! suite spawns a subprocess.

pub mod error;
mod process;

use std::path::Path;

use async_trait::async_trait;

pub use error::GitError;
pub use process::GitProcess;

/// The five version-control operations the sync strategies consume.
///
/// Every operation resolves to the captured diagnostic text (stdout and
/// stderr, concatenated and trimmed) on success, or a [`GitError`] carrying
/// the same text on failure.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Create an empty working copy at `path` unless `<path>/.git` already
    /// exists.
    async fn init_if_absent(&self, path: &Path) -> Result<String, GitError>;

    /// Incremental fetch-and-merge into the working copy at `path` from
    /// `authenticated_url`. The URL is used for this one operation and never
    /// written to the working copy's configuration.
    async fn pull(&self, path: &Path, authenticated_url: &str) -> Result<String, GitError>;

    /// Mirror-clone `authenticated_url` into the metadata directory
    /// `git_dir` (conventionally `<working copy>/.git`) and prepare it to
    /// carry a work tree.
    async fn mirror_clone(
        &self,
        authenticated_url: &str,
        git_dir: &Path,
    ) -> Result<String, GitError>;

    /// Point the working copy's origin remote at `plain_url`. This is the
    /// only operation that persists a URL, so callers must never hand it an
    /// authenticated one.
    async fn set_remote_url(&self, path: &Path, plain_url: &str) -> Result<String, GitError>;

    /// Materialize the work tree of the working copy at `path` from its
    /// cloned metadata.
    async fn checkout(&self, path: &Path) -> Result<String, GitError>;
}
