//! Bitbucket Cloud provider for gitsync.
//!
//! Speaks the 2.0 REST API over blocking HTTP: one eager OAuth
//! client-credentials exchange at connect time, then paginated workspace and
//! repository listings. [`BitbucketClient`] implements
//! [`gitsync_core::RepoSource`], which is all the engine sees.

pub mod client;
pub mod types;

pub use client::BitbucketClient;
