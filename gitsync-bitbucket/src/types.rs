//! Wire documents for the Bitbucket Cloud 2.0 REST API.
//!
//! Only the fields gitsync reads are declared; serde drops the rest of each
//! payload. Conversions into the domain types live here so the client stays
//! pure transport.

use serde::Deserialize;

/// Response of the OAuth token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
}

/// One page of a paginated listing. `next` is an absolute URL when more
/// pages follow.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub values: Vec<T>,
    pub next: Option<String>,
}

/// Workspace document from `GET /workspaces`.
#[derive(Debug, Deserialize)]
pub struct WorkspaceDoc {
    pub slug: String,
}

/// Repository document from `GET /repositories/{workspace}`.
#[derive(Debug, Deserialize)]
pub struct RepositoryDoc {
    pub full_name: String,
    #[serde(default)]
    pub links: RepositoryLinks,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepositoryLinks {
    #[serde(default)]
    pub clone: Vec<CloneLink>,
}

#[derive(Debug, Deserialize)]
pub struct CloneLink {
    pub name: String,
    pub href: String,
}

impl RepositoryDoc {
    /// The HTTPS clone link, if the provider published one. Bitbucket lists
    /// `ssh` and `https` clone protocols side by side; only `https` works
    /// with a bearer token.
    pub fn https_clone_url(&self) -> Option<String> {
        self.links
            .clone
            .iter()
            .find(|link| link.name == "https")
            .map(|link| link.href.clone())
    }
}
