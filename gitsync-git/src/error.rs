//! Error types for gitsync-git.

use thiserror::Error;

/// All errors the version-control layer can produce.
///
/// Rendered command lines and captured output have URL userinfo sections
/// masked, so a transient authenticated URL never survives into an error
/// value.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` binary could not be spawned or its output not collected.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// `git` ran and exited non-zero.
    #[error("`{command}` failed: {output}")]
    Exit { command: String, output: String },
}

impl GitError {
    /// Diagnostic text suitable for a per-repository failure record.
    pub fn diagnostic(&self) -> String {
        match self {
            GitError::Spawn { source, .. } => source.to_string(),
            GitError::Exit { output, .. } => output.clone(),
        }
    }
}
