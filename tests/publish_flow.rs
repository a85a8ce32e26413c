//! End-to-end publish flow against a real git repository.
//!
//! Each test builds an isolated site checkout with a local bare remote in
//! a temp directory, so `push` exercises the full stage → commit → push
//! sequence without any network.

use folio_press::content::WebsiteContent;
use folio_press::pipeline::{PublicationPipeline, PublishOutcome};
use folio_press::repo::{RepoStatus, RepositoryPublisher};
use folio_press::store::ContentStore;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git must be runnable");
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

/// Create `site/` (a repository on branch main) and `remote.git` (a bare
/// repository wired up as its origin) inside the temp directory.
fn setup_repo(tmp: &TempDir) -> (PathBuf, PathBuf) {
    let site = tmp.path().join("site");
    let bare = tmp.path().join("remote.git");

    git(tmp.path(), &["init", "--bare", "remote.git"]);
    git(tmp.path(), &["init", "-b", "main", "site"]);
    git(&site, &["config", "user.email", "operator@example.com"]);
    git(&site, &["config", "user.name", "Operator"]);
    git(&site, &["remote", "add", "origin", bare.to_str().unwrap()]);

    (site, bare)
}

fn pipeline_for(tmp: &TempDir, site: &Path) -> PublicationPipeline {
    let store = ContentStore::new(tmp.path().join("store.json"));
    let publisher = RepositoryPublisher::new(site, "origin", "main", Duration::from_secs(30));
    PublicationPipeline::new(store, publisher, site)
}

fn sample_content() -> WebsiteContent {
    let mut content = WebsiteContent::default();
    content.homepage.headline1 = "Building, breaking,".to_string();
    content.homepage.headline2 = "making things".to_string();
    content.projects.get_mut("googlepay").unwrap().heading1 = "Google Pay".to_string();
    content
}

#[test]
fn plain_directory_reports_not_a_repository() {
    let tmp = TempDir::new().unwrap();
    let publisher = RepositoryPublisher::new(tmp.path(), "origin", "main", Duration::from_secs(30));

    assert_eq!(publisher.status().unwrap(), RepoStatus::NotARepository);
}

#[test]
fn fresh_repository_is_clean() {
    let tmp = TempDir::new().unwrap();
    let (site, _) = setup_repo(&tmp);
    let publisher = RepositoryPublisher::new(&site, "origin", "main", Duration::from_secs(30));

    assert_eq!(publisher.status().unwrap(), RepoStatus::Clean);
}

#[test]
fn deploy_makes_the_tree_dirty_without_committing() {
    let tmp = TempDir::new().unwrap();
    let (site, _) = setup_repo(&tmp);
    let pipeline = pipeline_for(&tmp, &site);

    pipeline.deploy(&sample_content()).unwrap();

    match pipeline.repo_status().unwrap() {
        RepoStatus::Dirty { changes } => {
            let paths: Vec<&str> = changes.iter().map(|c| c.path.as_str()).collect();
            assert!(paths.contains(&"data.json"));
            assert!(paths.contains(&"index.html"));
            assert!(paths.contains(&"googlepay.html"));
        }
        other => panic!("expected Dirty, got {other:?}"),
    }

    // Deploy alone never commits.
    let log = Command::new("git")
        .args(["log", "--oneline"])
        .current_dir(&site)
        .output()
        .unwrap();
    assert!(!log.status.success() || log.stdout.is_empty());
}

#[test]
fn publish_commits_and_pushes_to_the_remote() {
    let tmp = TempDir::new().unwrap();
    let (site, bare) = setup_repo(&tmp);
    let pipeline = pipeline_for(&tmp, &site);

    pipeline.save_content(&sample_content()).unwrap();
    let outcome = pipeline.publish_changes("publish portfolio update").unwrap();

    match outcome {
        PublishOutcome::Published { changes } => assert!(!changes.is_empty()),
        other => panic!("expected Published, got {other:?}"),
    }

    // The working tree is clean again and the bare remote has main.
    assert_eq!(pipeline.repo_status().unwrap(), RepoStatus::Clean);
    git(&bare, &["rev-parse", "main"]);

    let message = Command::new("git")
        .args(["log", "-1", "--format=%s", "main"])
        .current_dir(&bare)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&message.stdout).trim(),
        "publish portfolio update"
    );
}

#[test]
fn republishing_unchanged_content_reports_no_changes() {
    let tmp = TempDir::new().unwrap();
    let (site, _) = setup_repo(&tmp);
    let pipeline = pipeline_for(&tmp, &site);

    pipeline.save_content(&sample_content()).unwrap();
    pipeline.publish_changes("first publish").unwrap();

    // Deterministic generation: the second deploy rewrites every file
    // byte-identically, so git sees nothing to commit.
    let outcome = pipeline.publish_changes("second publish").unwrap();
    assert_eq!(outcome, PublishOutcome::NoChanges);
}

#[test]
fn edited_content_publishes_again() {
    let tmp = TempDir::new().unwrap();
    let (site, _) = setup_repo(&tmp);
    let pipeline = pipeline_for(&tmp, &site);

    pipeline.save_content(&sample_content()).unwrap();
    pipeline.publish_changes("first publish").unwrap();

    let mut edited = pipeline.load_content();
    edited.homepage.headline1 = "Still building,".to_string();
    pipeline.save_content(&edited).unwrap();

    let outcome = pipeline.publish_changes("update headline").unwrap();
    assert!(matches!(outcome, PublishOutcome::Published { .. }));

    let home = std::fs::read_to_string(site.join("index.html")).unwrap();
    assert!(home.contains("Still building,"));
}

#[test]
fn publish_into_plain_directory_short_circuits() {
    let tmp = TempDir::new().unwrap();
    let site = tmp.path().join("site");
    std::fs::create_dir_all(&site).unwrap();
    let pipeline = pipeline_for(&tmp, &site);

    // Files are still deployed, but no git operation is attempted.
    let outcome = pipeline.publish_changes("should not commit").unwrap();
    assert_eq!(outcome, PublishOutcome::NotARepository);
    assert!(site.join("index.html").exists());
}

#[test]
fn commit_and_push_rejects_clean_tree() {
    let tmp = TempDir::new().unwrap();
    let (site, _) = setup_repo(&tmp);
    let publisher = RepositoryPublisher::new(&site, "origin", "main", Duration::from_secs(30));

    let err = publisher.commit_and_push("nothing here").unwrap_err();
    assert!(matches!(
        err,
        folio_press::repo::PublishError::NoChanges
    ));
}

#[test]
fn push_failure_surfaces_command_output_without_rollback() {
    let tmp = TempDir::new().unwrap();
    let site = tmp.path().join("site");
    git(tmp.path(), &["init", "-b", "main", "site"]);
    git(&site, &["config", "user.email", "operator@example.com"]);
    git(&site, &["config", "user.name", "Operator"]);
    // No remote configured: stage and commit succeed, push fails.
    let pipeline = pipeline_for(&tmp, &site);

    pipeline.save_content(&sample_content()).unwrap();
    let err = pipeline.publish_changes("publish without remote").unwrap_err();
    let text = err.to_string();
    assert!(text.contains("push"), "unexpected error: {text}");

    // The commit was left in place for the operator to resolve.
    git(&site, &["rev-parse", "HEAD"]);
    assert_eq!(pipeline.repo_status().unwrap(), RepoStatus::Clean);
}
