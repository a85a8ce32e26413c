//! Process configuration.
//!
//! Handles loading and validating `folio.toml`. Configuration is explicit:
//! one [`AppConfig`] is constructed at startup and passed into the store,
//! publisher, and pipeline constructors — nothing reads ambient globals.
//!
//! ## Config File
//!
//! Place `folio.toml` next to the site checkout (or point `--config` at
//! its directory):
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_root = "."                    # Where generated files are written
//! store_path = ".folio/store.json"   # Content + settings store
//!
//! [git]
//! remote = "origin"
//! branch = "main"
//! timeout_secs = 60                  # Per-command deadline
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Process configuration loaded from `folio.toml`.
///
/// All fields have working defaults; a missing file means "run with
/// defaults in the current directory".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory the generated site is written into (the git checkout).
    pub site_root: PathBuf,
    /// Path of the JSON content/settings store.
    pub store_path: PathBuf,
    /// Git publication settings.
    pub git: GitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from("."),
            store_path: PathBuf::from(".folio/store.json"),
            git: GitConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Remote pushed to by the publish flow.
    pub remote: String,
    /// Branch pushed to by the publish flow.
    pub branch: String,
    /// Deadline for each git command, in seconds.
    pub timeout_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            timeout_secs: 60,
        }
    }
}

impl AppConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.git.remote.is_empty() {
            return Err(ConfigError::Validation(
                "git.remote must not be empty".into(),
            ));
        }
        if self.git.branch.is_empty() {
            return Err(ConfigError::Validation(
                "git.branch must not be empty".into(),
            ));
        }
        if self.git.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "git.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from `folio.toml` in the given directory.
///
/// A missing file yields defaults; an existing file must parse, carry no
/// unknown keys, and validate.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let config_path = dir.join("folio.toml");
    let config = if config_path.exists() {
        let raw = fs::read_to_string(&config_path)?;
        toml::from_str(&raw)?
    } else {
        AppConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `folio.toml` with all keys explained.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio-press Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory the generated site is written into. This should be the root
# of the website's git checkout.
site_root = "."

# Path of the JSON file holding website content and operator settings.
store_path = ".folio/store.json"

# ---------------------------------------------------------------------------
# Git publication
# ---------------------------------------------------------------------------
[git]
# Remote and branch the publish flow pushes to.
remote = "origin"
branch = "main"

# Deadline for each git command in seconds. A push that exceeds this is
# killed and reported as a timeout instead of hanging the pipeline.
timeout_secs = 60
"##
}
