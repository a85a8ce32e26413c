//! Orchestration of store → generator → filesystem → git.
//!
//! [`PublicationPipeline`] is the single entry point the bridge and CLI
//! call. It owns the two user-facing actions:
//!
//! - [`deploy`](PublicationPipeline::deploy) — generate the file set and
//!   write it under the site root. No git. Deploy and publish are
//!   deliberately decoupled so the operator can inspect a `git diff` of the
//!   generated files before committing anything.
//! - [`publish_changes`](PublicationPipeline::publish_changes) — deploy the
//!   latest stored content, then hand a dirty tree to the publisher. A
//!   clean tree and a missing repository are normal outcomes, not errors.
//!
//! Publishes are single-flight: a second call while one is running is
//! rejected with [`PipelineError::InFlight`] rather than queued.

use crate::config::AppConfig;
use crate::content::WebsiteContent;
use crate::generate::{self, GenerateError};
use crate::repo::{Change, GitError, PublishError, RepoStatus, RepositoryPublisher};
use crate::store::{ContentStore, Settings, StoreError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Git(#[from] GitError),
    #[error("another publish is already in progress")]
    InFlight,
}

/// Files written by a deploy, in write order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployReport {
    pub files: Vec<String>,
}

/// Result of a publish attempt.
///
/// `NotARepository` and `NoChanges` are the short-circuit outcomes of
/// an early status check; `Published` carries the change list that went
/// into the commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    Published { changes: Vec<Change> },
    NoChanges,
    NotARepository,
}

pub struct PublicationPipeline {
    store: ContentStore,
    publisher: RepositoryPublisher,
    site_root: PathBuf,
    publish_gate: Mutex<()>,
}

impl PublicationPipeline {
    pub fn new(
        store: ContentStore,
        publisher: RepositoryPublisher,
        site_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            publisher,
            site_root: site_root.into(),
            publish_gate: Mutex::new(()),
        }
    }

    /// Wire up store, publisher, and site root from one config object.
    pub fn from_config(config: &AppConfig) -> Self {
        let store = ContentStore::new(&config.store_path);
        let publisher = RepositoryPublisher::new(
            &config.site_root,
            &config.git.remote,
            &config.git.branch,
            Duration::from_secs(config.git.timeout_secs),
        );
        Self::new(store, publisher, &config.site_root)
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    /// Load the stored content aggregate. Never fails.
    ///
    /// On a first run with no store file, falls back to re-importing the
    /// site's own `data.json` snapshot if a previous deploy left one, so
    /// pointing the tool at an existing checkout recovers its content.
    pub fn load_content(&self) -> WebsiteContent {
        if let Some(content) = self.store.load_if_present() {
            return content;
        }
        fs::read_to_string(self.site_root.join("data.json"))
            .ok()
            .and_then(|raw| serde_json::from_str::<WebsiteContent>(&raw).ok())
            .map(WebsiteContent::merged_over_defaults)
            .unwrap_or_default()
    }

    /// Persist the content aggregate.
    pub fn save_content(&self, content: &WebsiteContent) -> Result<(), StoreError> {
        self.store.save(content)
    }

    pub fn settings(&self) -> Settings {
        self.store.settings()
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.store.save_settings(settings)
    }

    /// Generate the site and write every file under the site root,
    /// creating directories as needed. Performs no git operations.
    pub fn deploy(&self, content: &WebsiteContent) -> Result<DeployReport, PipelineError> {
        let files = generate::generate(content)?;
        let mut written = Vec::with_capacity(files.len());

        for (name, body) in &files {
            let path = self.site_root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
            fs::write(&path, body).map_err(|source| PipelineError::Write {
                path: path.display().to_string(),
                source,
            })?;
            written.push(name.clone());
        }

        Ok(DeployReport { files: written })
    }

    /// Deploy the latest stored content, then commit and push if the tree
    /// is dirty.
    ///
    /// The message is validated before anything runs; a clean tree or a
    /// missing repository short-circuits to the matching outcome without
    /// touching git further. Rejects re-entry while another publish holds
    /// the gate.
    pub fn publish_changes(&self, message: &str) -> Result<PublishOutcome, PipelineError> {
        let _gate = self
            .publish_gate
            .try_lock()
            .map_err(|_| PipelineError::InFlight)?;

        if message.trim().is_empty() {
            return Err(PublishError::EmptyMessage.into());
        }

        let content = self.load_content();
        self.deploy(&content)?;

        match self.publisher.status()? {
            RepoStatus::NotARepository => Ok(PublishOutcome::NotARepository),
            RepoStatus::Clean => Ok(PublishOutcome::NoChanges),
            RepoStatus::Dirty { .. } => {
                let changes = self.publisher.commit_and_push(message)?;
                Ok(PublishOutcome::Published { changes })
            }
        }
    }

    /// Repository state of the site root.
    pub fn repo_status(&self) -> Result<RepoStatus, GitError> {
        self.publisher.status()
    }

    /// Branch and remote details for status display.
    pub fn remote_info(&self) -> crate::repo::RemoteInfo {
        self.publisher.remote_info()
    }

    /// Render the home page to a standalone file in the system temp
    /// directory, for a quick look before deploying.
    pub fn preview(&self, content: &WebsiteContent) -> Result<PathBuf, PipelineError> {
        let html = generate::render_home(content).into_string();
        let path = std::env::temp_dir().join("folio-press-preview.html");
        fs::write(&path, html).map_err(|source| PipelineError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_content;
    use tempfile::TempDir;

    fn pipeline_in(tmp: &TempDir) -> PublicationPipeline {
        let store = ContentStore::new(tmp.path().join("store.json"));
        let publisher = RepositoryPublisher::new(
            tmp.path().join("site"),
            "origin",
            "main",
            Duration::from_secs(10),
        );
        PublicationPipeline::new(store, publisher, tmp.path().join("site"))
    }

    #[test]
    fn deploy_writes_all_generated_files() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);
        let content = sample_content();

        let report = pipeline.deploy(&content).unwrap();
        assert!(report.files.contains(&"index.html".to_string()));
        assert!(report.files.contains(&"data.json".to_string()));

        for name in &report.files {
            assert!(tmp.path().join("site").join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn deploy_creates_site_root() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);

        // Site root does not exist until the first deploy.
        assert!(!tmp.path().join("site").exists());
        pipeline.deploy(&WebsiteContent::default()).unwrap();
        assert!(tmp.path().join("site/index.html").exists());
    }

    #[test]
    fn deploy_is_idempotent_on_disk() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);
        let content = sample_content();

        pipeline.deploy(&content).unwrap();
        let first = fs::read_to_string(tmp.path().join("site/index.html")).unwrap();
        pipeline.deploy(&content).unwrap();
        let second = fs::read_to_string(tmp.path().join("site/index.html")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn publish_rejects_empty_message_before_deploying() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);

        let err = pipeline.publish_changes("  ").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Publish(PublishError::EmptyMessage)
        ));
        // Nothing was generated or written.
        assert!(!tmp.path().join("site").exists());
    }

    #[test]
    fn preview_writes_home_page_to_temp() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);
        let content = sample_content();

        let path = pipeline.preview(&content).unwrap();
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("Building, breaking,"));
    }

    #[test]
    fn save_and_load_through_pipeline() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);
        let content = sample_content();

        pipeline.save_content(&content).unwrap();
        assert_eq!(pipeline.load_content(), content);
    }

    #[test]
    fn load_content_reimports_data_json_on_first_run() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);
        let content = sample_content();

        // A previous deploy left data.json behind, but no store file exists.
        pipeline.deploy(&content).unwrap();
        assert_eq!(pipeline.load_content(), content);
    }

    #[test]
    fn saved_store_wins_over_site_snapshot() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);

        pipeline.save_content(&WebsiteContent::default()).unwrap();
        pipeline.deploy(&sample_content()).unwrap();

        assert_eq!(pipeline.load_content(), WebsiteContent::default());
    }

    #[test]
    fn publish_gate_rejects_reentry() {
        let tmp = TempDir::new().unwrap();
        let pipeline = pipeline_in(&tmp);

        let _held = pipeline.publish_gate.try_lock().unwrap();
        let err = pipeline.publish_changes("update").unwrap_err();
        assert!(matches!(err, PipelineError::InFlight));
    }
}
