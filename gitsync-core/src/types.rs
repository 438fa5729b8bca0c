//! Domain types for a gitsync run.
//!
//! All of these are short-lived enumeration results: built from the provider
//! API at the start of a run, consumed by the sync engine, never persisted.
//! Path fields use `PathBuf`; never `&str` or `String` for filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed full repository name, unique within the provider.
///
/// Bitbucket full names are `<workspace>/<slug>`, e.g. `"acme/api"`; the
/// slash makes the name double as the repository's relative path under the
/// mirror root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoFullName(pub String);

impl RepoFullName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoFullName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoFullName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A named grouping of repositories on the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Opaque workspace identifier, e.g. `"acme"`.
    pub slug: String,
}

impl Workspace {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slug.fmt(f)
    }
}

/// A single remote repository discovered during enumeration.
///
/// `clone_url` is the plain HTTPS clone link exactly as the provider returned
/// it — it carries no bearer credential and is the only form that may ever be
/// written to on-disk configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub full_name: RepoFullName,
    pub clone_url: String,
}

impl Repository {
    pub fn new(full_name: impl Into<RepoFullName>, clone_url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            clone_url: clone_url.into(),
        }
    }

    /// The local working-copy path for this repository under `output_dir`.
    ///
    /// The full name's `/` separator produces the `<workspace>/<slug>`
    /// nesting on disk.
    pub fn local_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.full_name.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_display() {
        assert_eq!(RepoFullName::from("acme/api").to_string(), "acme/api");
    }

    #[test]
    fn full_name_equality() {
        let a = RepoFullName::from("acme/api");
        let b = RepoFullName::from(String::from("acme/api"));
        assert_eq!(a, b);
    }

    #[test]
    fn local_path_nests_workspace_and_slug() {
        let repo = Repository::new("acme/web", "https://bob@bitbucket.org/acme/web.git");
        assert_eq!(
            repo.local_path(Path::new("/mirror")),
            PathBuf::from("/mirror/acme/web")
        );
    }

    #[test]
    fn workspace_display() {
        assert_eq!(Workspace::new("acme").to_string(), "acme");
    }
}
