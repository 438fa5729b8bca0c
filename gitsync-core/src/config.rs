//! Run configuration loaded from the process environment.
//!
//! Naming convention:
//! - `from_lookup(get)` — pure; reads variables through the supplied closure.
//! - `from_env()` — derives the lookup from `std::env::var`, delegates to
//!   `from_lookup`. Tests must NEVER call `from_env`; they drive
//!   `from_lookup` with an in-memory map so no test touches the process
//!   environment.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;

use crate::error::ConfigError;

const ENV_USER: &str = "BITBUCKET_USER";
const ENV_KEY: &str = "BITBUCKET_KEY";
const ENV_SECRET: &str = "BITBUCKET_SECRET";
const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
const ENV_LOG_FILE: &str = "LOG_FILE";
const ENV_STRATEGY: &str = "SYNC_STRATEGY";

// ---------------------------------------------------------------------------
// Strategy selector
// ---------------------------------------------------------------------------

/// Which sync strategy a run applies to every repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncMode {
    /// Incremental: initialize if absent, then pull in place.
    #[default]
    Update,
    /// Full re-materialization: backup, mirror clone, checkout.
    Replace,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Update => write!(f, "update"),
            SyncMode::Replace => write!(f, "replace"),
        }
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "update" => Ok(SyncMode::Update),
            "replace" => Ok(SyncMode::Replace),
            other => Err(format!(
                "unknown sync strategy `{other}` (expected `update` or `replace`)"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// Read-only settings snapshot for one run.
///
/// Constructed once at process start and shared behind `Arc`; nothing
/// mutates it after the CLI has applied its flag overrides.
#[derive(Debug)]
pub struct RunConfig {
    /// Bitbucket account username; also the userinfo token replaced when
    /// building an authenticated clone URL.
    pub user: String,
    /// OAuth consumer key (client id).
    pub key: String,
    /// OAuth consumer secret. Held in [`SecretString`] so `Debug` output
    /// cannot leak it.
    pub secret: SecretString,
    /// Root directory the repository tree is mirrored into.
    pub output_dir: PathBuf,
    /// Optional log sink; when set, log lines are appended here as well as
    /// written to stderr.
    pub log_file: Option<PathBuf>,
    /// Enumerate and log only; no filesystem or git side effects.
    pub dry_run: bool,
    /// Strategy applied to every repository this run.
    pub mode: SyncMode,
}

impl RunConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through `get`. Unset and empty values are
    /// treated identically: required variables error, optional ones default.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str| get(name).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::MissingVar(name));

        let mode = match get(ENV_STRATEGY) {
            None => SyncMode::default(),
            Some(raw) => {
                SyncMode::from_str(&raw).map_err(|reason| ConfigError::InvalidVar {
                    var: ENV_STRATEGY,
                    value: raw,
                    reason,
                })?
            }
        };

        Ok(Self {
            user: require(ENV_USER)?,
            key: require(ENV_KEY)?,
            secret: SecretString::from(require(ENV_SECRET)?),
            output_dir: PathBuf::from(require(ENV_OUTPUT_DIR)?),
            log_file: get(ENV_LOG_FILE).map(PathBuf::from),
            dry_run: false,
            mode,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
