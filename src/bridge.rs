//! The typed call surface exposed to the editing UI process.
//!
//! The UI never touches the store, generator, or git directly; it sends one
//! of the [`BridgeRequest`] variants and gets a [`BridgeResponse`] back.
//! Requests and responses are serde-tagged enums, so the surface doubles as
//! a newline-delimited JSON protocol: [`serve`] reads one request per line
//! on a reader and writes one response per line on a writer, which is how
//! the `serve` CLI subcommand hosts the core for an external UI process.
//!
//! Precondition failures (empty message, clean tree, missing repository)
//! come back as ordinary responses the UI renders as messages; only real
//! failures become [`BridgeResponse::Error`], tagged with the error family
//! so the UI can branch without parsing prose.

use crate::content::WebsiteContent;
use crate::pipeline::{PipelineError, PublicationPipeline, PublishOutcome};
use crate::repo::{PublishError, RepoStatus};
use crate::store::Settings;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// A call from the UI process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BridgeRequest {
    LoadContent,
    SaveContent { content: WebsiteContent },
    Deploy { content: WebsiteContent },
    RepoStatus,
    CommitAndPush { message: String },
    Preview { content: WebsiteContent },
    LoadSettings,
    SaveSettings { settings: Settings },
}

/// The result of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BridgeResponse {
    Content { content: WebsiteContent },
    Saved,
    Deployed { files: Vec<String> },
    Status { status: RepoStatus },
    Publish { outcome: PublishOutcome },
    PreviewReady { path: String },
    Settings { settings: Settings },
    Error { kind: String, message: String },
}

/// Stable error-family tags for [`BridgeResponse::Error`].
fn error_kind(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::Store(_) => "storage",
        PipelineError::Generate(_) => "generation",
        PipelineError::Write { .. } => "io",
        PipelineError::Publish(PublishError::EmptyMessage) => "empty_message",
        PipelineError::Publish(PublishError::NoChanges) => "no_changes",
        PipelineError::Publish(PublishError::NotARepository) => "not_a_repository",
        PipelineError::Publish(_) => "publish",
        PipelineError::Git(_) => "git",
        PipelineError::InFlight => "in_flight",
    }
}

fn error_response(err: PipelineError) -> BridgeResponse {
    BridgeResponse::Error {
        kind: error_kind(&err).to_string(),
        message: err.to_string(),
    }
}

/// Handle one request against the pipeline.
pub fn handle(pipeline: &PublicationPipeline, request: BridgeRequest) -> BridgeResponse {
    match request {
        BridgeRequest::LoadContent => BridgeResponse::Content {
            content: pipeline.load_content(),
        },
        BridgeRequest::SaveContent { content } => match pipeline.save_content(&content) {
            Ok(()) => BridgeResponse::Saved,
            Err(err) => error_response(err.into()),
        },
        BridgeRequest::Deploy { content } => match pipeline.deploy(&content) {
            Ok(report) => BridgeResponse::Deployed {
                files: report.files,
            },
            Err(err) => error_response(err),
        },
        BridgeRequest::RepoStatus => match pipeline.repo_status() {
            Ok(status) => BridgeResponse::Status { status },
            Err(err) => error_response(err.into()),
        },
        BridgeRequest::CommitAndPush { message } => match pipeline.publish_changes(&message) {
            Ok(outcome) => BridgeResponse::Publish { outcome },
            Err(err) => error_response(err),
        },
        BridgeRequest::Preview { content } => match pipeline.preview(&content) {
            Ok(path) => BridgeResponse::PreviewReady {
                path: path.display().to_string(),
            },
            Err(err) => error_response(err),
        },
        BridgeRequest::LoadSettings => BridgeResponse::Settings {
            settings: pipeline.settings(),
        },
        BridgeRequest::SaveSettings { settings } => match pipeline.save_settings(&settings) {
            Ok(()) => BridgeResponse::Saved,
            Err(err) => error_response(err.into()),
        },
    }
}

/// Serve requests as newline-delimited JSON until the reader closes.
///
/// A line that fails to parse produces an `Error` response with kind
/// `bad_request` instead of tearing the loop down.
pub fn serve(
    pipeline: &PublicationPipeline,
    reader: impl BufRead,
    mut writer: impl Write,
) -> std::io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<BridgeRequest>(&line) {
            Ok(request) => handle(pipeline, request),
            Err(err) => BridgeResponse::Error {
                kind: "bad_request".to_string(),
                message: err.to_string(),
            },
        };
        let json = serde_json::to_string(&response).unwrap_or_else(|err| {
            format!(r#"{{"result":"error","kind":"internal","message":"{err}"}}"#)
        });
        writeln!(writer, "{json}")?;
        writer.flush()?;
    }
    Ok(())
}
