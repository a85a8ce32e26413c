//! Durable persistence for website content and operator settings.
//!
//! [`ContentStore`] keeps everything in a single pretty-printed JSON file:
//! the [`WebsiteContent`] aggregate, the smaller [`Settings`] record, and a
//! last-saved timestamp. The two records share a file but have separate
//! lifecycles — saving one never clobbers the other.
//!
//! Reads never fail: a missing, unreadable, or corrupt store file yields
//! defaults, so first runs and damaged files both produce valid content.
//! Writes are the only fallible operations and surface [`StoreError`] for
//! the operator to act on; the store never retries silently.

use crate::content::WebsiteContent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operator settings, stored alongside content but keyed separately.
///
/// The API token is only used by the read-only dashboard, never by the
/// publish path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Access token for remote dashboard API calls.
    pub api_token: Option<String>,
    /// Dashboard refresh interval in minutes.
    pub refresh_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_token: None,
            refresh_minutes: 5,
        }
    }
}

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreFile {
    website: Option<WebsiteContent>,
    settings: Settings,
    last_saved: Option<DateTime<Utc>>,
}

/// JSON-file-backed store for the content aggregate and settings.
pub struct ContentStore {
    path: PathBuf,
}

impl ContentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the content aggregate, merged over defaults.
    ///
    /// Never fails: read or parse errors yield `WebsiteContent::default()`.
    pub fn load(&self) -> WebsiteContent {
        self.load_if_present().unwrap_or_default()
    }

    /// Load the aggregate only if one has ever been saved.
    ///
    /// Lets callers distinguish a first run from an aggregate that was
    /// deliberately saved empty.
    pub fn load_if_present(&self) -> Option<WebsiteContent> {
        self.read_file()
            .website
            .map(WebsiteContent::merged_over_defaults)
    }

    /// Persist the full aggregate, replacing any prior value and stamping
    /// the save time. Settings already in the file are preserved.
    pub fn save(&self, content: &WebsiteContent) -> Result<(), StoreError> {
        let mut file = self.read_file();
        file.website = Some(content.clone());
        file.last_saved = Some(Utc::now());
        self.write_file(&file)
    }

    /// Load the settings record; defaults on any read error.
    pub fn settings(&self) -> Settings {
        self.read_file().settings
    }

    /// Persist the settings record, leaving stored content untouched.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let mut file = self.read_file();
        file.settings = settings.clone();
        self.write_file(&file)
    }

    /// Timestamp of the most recent content save, if any.
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.read_file().last_saved
    }

    fn read_file(&self) -> StoreFile {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn write_file(&self, file: &StoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
