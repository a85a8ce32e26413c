//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Output Format
//!
//! ```text
//! Deployed 7 files
//!     data.json
//!     googlepay.html
//!     index.html
//!     ...
//!
//! On main → git@github.com:user/site.git
//!     modified  data.json
//!     added     portfolio.html
//! 2 changes ready to commit
//! ```

use crate::content::WebsiteContent;
use crate::pipeline::{DeployReport, PublishOutcome};
use crate::repo::{Change, ChangeKind, RemoteInfo, RepoStatus};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn change_label(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "added",
        ChangeKind::Modified => "modified",
        ChangeKind::Deleted => "deleted",
        ChangeKind::Other => "other",
    }
}

fn change_line(change: &Change) -> String {
    format!("{}{:<9} {}", indent(1), change_label(change.kind), change.path)
}

// ============================================================================
// Deploy
// ============================================================================

pub fn format_deploy(report: &DeployReport) -> Vec<String> {
    let mut lines = vec![format!("Deployed {} files", report.files.len())];
    for name in &report.files {
        lines.push(format!("{}{}", indent(1), name));
    }
    lines
}

pub fn print_deploy(report: &DeployReport) {
    for line in format_deploy(report) {
        println!("{line}");
    }
}

// ============================================================================
// Status
// ============================================================================

pub fn format_status(status: &RepoStatus, info: &RemoteInfo) -> Vec<String> {
    if *status == RepoStatus::NotARepository {
        return vec!["Not a git repository".to_string()];
    }

    let branch = info.branch.as_deref().unwrap_or("(detached)");
    let mut lines = vec![match &info.remote_url {
        Some(url) => format!("On {branch} → {url}"),
        None => format!("On {branch} (no remote configured)"),
    }];

    match status {
        RepoStatus::Clean => lines.push("No changes to commit".to_string()),
        RepoStatus::Dirty { changes } => {
            for change in changes {
                lines.push(change_line(change));
            }
            let n = changes.len();
            let noun = if n == 1 { "change" } else { "changes" };
            lines.push(format!("{n} {noun} ready to commit"));
        }
        RepoStatus::NotARepository => {}
    }

    lines
}

pub fn print_status(status: &RepoStatus, info: &RemoteInfo) {
    for line in format_status(status, info) {
        println!("{line}");
    }
}

// ============================================================================
// Publish
// ============================================================================

pub fn format_outcome(outcome: &PublishOutcome) -> Vec<String> {
    match outcome {
        PublishOutcome::NotARepository => {
            vec!["Not a git repository - nothing was committed".to_string()]
        }
        PublishOutcome::NoChanges => {
            vec!["Site is up to date - nothing to commit".to_string()]
        }
        PublishOutcome::Published { changes } => {
            let mut lines = Vec::new();
            for change in changes {
                lines.push(change_line(change));
            }
            let n = changes.len();
            let noun = if n == 1 { "change" } else { "changes" };
            lines.push(format!("Committed and pushed {n} {noun}"));
            lines
        }
    }
}

pub fn print_outcome(outcome: &PublishOutcome) {
    for line in format_outcome(outcome) {
        println!("{line}");
    }
}

// ============================================================================
// Content summary
// ============================================================================

pub fn format_content(content: &WebsiteContent) -> Vec<String> {
    let home = &content.homepage;
    let mut lines = vec![
        format!("Headline: {} {}", home.headline1, home.headline2),
        format!(
            "Home: {} present, {} past, {} social links",
            home.present_work.len(),
            home.past_work.len(),
            home.social_links.len()
        ),
        "Projects".to_string(),
    ];
    for (key, page) in &content.projects {
        lines.push(format!(
            "{}{} → {}",
            indent(1),
            page.effective_heading1(key),
            crate::generate::project_filename(key, page)
        ));
    }
    lines
}

pub fn print_content(content: &WebsiteContent) {
    for line in format_content(content) {
        println!("{line}");
    }
}
