//! Git-backed publication of the site working directory.
//!
//! [`RepositoryPublisher`] wraps the four version-control commands the
//! publish flow needs — porcelain status, stage-all, commit, push — as a
//! small state machine over the site root:
//!
//! ```text
//! status --porcelain ──→ NotARepository | Clean | Dirty(changes)
//! Dirty + message    ──→ add -A → commit -m → push <remote> <branch>
//! ```
//!
//! The three mutation commands run strictly in sequence; a failing step
//! stops the sequence and surfaces the captured command output. No rollback
//! is attempted — a staged-but-uncommitted or committed-but-unpushed tree is
//! left for the operator to resolve, which git itself handles fine.
//!
//! Every invocation runs under a deadline. A hung network push kills the
//! child process and fails the step instead of hanging the pipeline.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Infrastructure failures running git itself (as opposed to git reporting
/// a failure).
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git {command} timed out after {secs}s")]
    TimedOut { command: String, secs: u64 },
}

/// Failures of the commit-and-push sequence.
///
/// The first three are precondition failures — expected outcomes the caller
/// renders as a message, not a crash. `Command` wraps a git step that ran
/// and failed, with the captured output for the operator to diagnose.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("commit message must not be empty")]
    EmptyMessage,
    #[error("no changes to commit")]
    NoChanges,
    #[error("not a git repository")]
    NotARepository,
    #[error("git {step} failed: {detail}")]
    Command { step: &'static str, detail: String },
    #[error(transparent)]
    Git(#[from] GitError),
}

/// How a path changed, decoded from the porcelain two-character prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Other,
}

/// One pending change in the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub path: String,
}

/// Working-directory state as reported by the status query.
///
/// `NotARepository` is an expected, common case — the operator simply has
/// not pointed the tool at a versioned directory yet — so it is a state,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RepoStatus {
    NotARepository,
    Clean,
    Dirty { changes: Vec<Change> },
}

/// Best-effort remote details for status display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteInfo {
    pub branch: Option<String>,
    pub remote_url: Option<String>,
}

/// Captured result of one git invocation.
struct Capture {
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl Capture {
    fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The most useful failure text: stderr, falling back to stdout.
    fn failure_detail(&self) -> String {
        let text = if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        };
        match self.code {
            Some(code) => format!("exit code {code}: {text}"),
            None => format!("killed: {text}"),
        }
    }
}

/// Decode one porcelain status line into a change.
///
/// The two-character prefix is the wire contract: an `A` index state means
/// added, `D` means deleted, and everything else (modified, renamed,
/// untracked) counts as modified — the publish flow stages all of them the
/// same way. Lines too short to carry a path decode as `Other`.
pub fn decode_status_line(line: &str) -> Change {
    if line.len() < 4 {
        return Change {
            kind: ChangeKind::Other,
            path: line.trim().to_string(),
        };
    }
    let (code, rest) = line.split_at(2);
    let path = rest.strip_prefix(' ').unwrap_or(rest);
    let kind = match code.trim() {
        "A" => ChangeKind::Added,
        "D" => ChangeKind::Deleted,
        _ => ChangeKind::Modified,
    };
    Change {
        kind,
        path: path.to_string(),
    }
}

/// Runs git against one working directory with a fixed remote and branch.
pub struct RepositoryPublisher {
    workdir: PathBuf,
    remote: String,
    branch: String,
    timeout: Duration,
}

impl RepositoryPublisher {
    pub fn new(
        workdir: impl Into<PathBuf>,
        remote: impl Into<String>,
        branch: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            workdir: workdir.into(),
            remote: remote.into(),
            branch: branch.into(),
            timeout,
        }
    }

    /// Query the working directory state.
    ///
    /// A status command that fails (exit code != 0) means git does not
    /// recognize a repository here; that is a state, not an error. Only
    /// infrastructure failures — git missing, timeout — are errors.
    pub fn status(&self) -> Result<RepoStatus, GitError> {
        let cap = self.run_git(&["status", "--porcelain"])?;
        if !cap.success() {
            return Ok(RepoStatus::NotARepository);
        }
        let changes: Vec<Change> = cap
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(decode_status_line)
            .collect();
        if changes.is_empty() {
            Ok(RepoStatus::Clean)
        } else {
            Ok(RepoStatus::Dirty { changes })
        }
    }

    /// Stage everything, commit with `message`, and push.
    ///
    /// Preconditions are checked before any mutation: the message must be
    /// non-empty and the tree must be dirty. Returns the change list that
    /// was committed. A failing step aborts the sequence with the captured
    /// command output; nothing is rolled back.
    pub fn commit_and_push(&self, message: &str) -> Result<Vec<Change>, PublishError> {
        if message.trim().is_empty() {
            return Err(PublishError::EmptyMessage);
        }
        let changes = match self.status()? {
            RepoStatus::NotARepository => return Err(PublishError::NotARepository),
            RepoStatus::Clean => return Err(PublishError::NoChanges),
            RepoStatus::Dirty { changes } => changes,
        };

        self.run_step("stage", &["add", "-A"])?;
        self.run_step("commit", &["commit", "-m", message])?;
        self.run_step("push", &["push", &self.remote, &self.branch])?;

        Ok(changes)
    }

    /// Current branch and remote URL, for status display.
    ///
    /// Both queries are best-effort; a repository without a remote simply
    /// reports `None`.
    pub fn remote_info(&self) -> RemoteInfo {
        RemoteInfo {
            branch: self.query(&["branch", "--show-current"]),
            remote_url: self.query(&["remote", "get-url", &self.remote]),
        }
    }

    fn query(&self, args: &[&str]) -> Option<String> {
        let cap = self.run_git(args).ok()?;
        if !cap.success() {
            return None;
        }
        let out = cap.stdout.trim().to_string();
        if out.is_empty() { None } else { Some(out) }
    }

    fn run_step(&self, step: &'static str, args: &[&str]) -> Result<(), PublishError> {
        let cap = self.run_git(args)?;
        if cap.success() {
            Ok(())
        } else {
            Err(PublishError::Command {
                step,
                detail: cap.failure_detail(),
            })
        }
    }

    /// Run one git command under the configured deadline, capturing exit
    /// code, stdout, and stderr. On expiry the child is killed.
    fn run_git(&self, args: &[&str]) -> Result<Capture, GitError> {
        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain both pipes on their own threads so a chatty command can't
        // deadlock against a full pipe buffer while we wait on it.
        let mut stdout_pipe = child.stdout.take().expect("stdout is piped");
        let mut stderr_pipe = child.stderr.take().expect("stderr is piped");
        let stdout_reader = thread::spawn(move || {
            let mut buf = String::new();
            let _ = stdout_pipe.read_to_string(&mut buf);
            buf
        });
        let stderr_reader = thread::spawn(move || {
            let mut buf = String::new();
            let _ = stderr_pipe.read_to_string(&mut buf);
            buf
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(GitError::TimedOut {
                    command: args.join(" "),
                    secs: self.timeout.as_secs(),
                });
            }
            thread::sleep(Duration::from_millis(20));
        };

        Ok(Capture {
            code: status.code(),
            stdout: stdout_reader.join().unwrap_or_default(),
            stderr: stderr_reader.join().unwrap_or_default(),
        })
    }
}
