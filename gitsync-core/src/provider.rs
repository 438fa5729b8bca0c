//! The provider capability consumed by the sync engine.

use crate::error::ProviderError;
use crate::types::{Repository, Workspace};

/// Read-only view of the repositories visible to one account.
///
/// Implemented by the Bitbucket API client and by in-memory fakes in engine
/// tests. Calls are blocking — callers on an async runtime should wrap them
/// in `spawn_blocking`. Enumeration is strictly sequential; only the
/// per-repository sync fan-out is parallel.
pub trait RepoSource: Send + Sync {
    /// Every workspace the account can see.
    fn workspaces(&self) -> Result<Vec<Workspace>, ProviderError>;

    /// Every repository in `workspace` the account is a member of.
    fn repositories(&self, workspace: &Workspace) -> Result<Vec<Repository>, ProviderError>;
}
