//! Gitsync core library — domain types, run configuration, credentials.
//!
//! Public API surface:
//! - [`types`] — enumeration results ([`Workspace`], [`Repository`])
//! - [`config`] — [`RunConfig`] loaded from the environment
//! - [`auth`] — [`UrlAuth`] transient URL authentication
//! - [`provider`] — the [`RepoSource`] capability trait
//! - [`error`] — [`ConfigError`], [`ProviderError`]

pub mod auth;
pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use auth::UrlAuth;
pub use config::{RunConfig, SyncMode};
pub use error::{ConfigError, ProviderError};
pub use provider::RepoSource;
pub use types::{RepoFullName, Repository, Workspace};
