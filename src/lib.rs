//! # Folio Press
//!
//! A content manager and static site publisher for a personal portfolio
//! website. Structured content is edited through a form-based UI, pressed
//! into a set of static pages, and published by committing and pushing the
//! site's git checkout.
//!
//! # Architecture: Edit → Save → Deploy → Publish
//!
//! ```text
//! 1. Save     WebsiteContent  →  store.json      (durable aggregate)
//! 2. Deploy   WebsiteContent  →  site root       (index, portfolio, projects, data.json)
//! 3. Publish  site root       →  remote/branch   (status → stage → commit → push)
//! ```
//!
//! Deploy and publish are deliberately decoupled: a deploy only rewrites
//! files, so the operator can review the resulting `git diff` before the
//! publish step commits anything. Because generation is deterministic, an
//! unchanged aggregate deploys to an unchanged working tree and the publish
//! step correctly reports "nothing to do".
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | The `WebsiteContent` aggregate: homepage, portfolio, project pages |
//! | [`store`] | JSON-file persistence for content and operator settings |
//! | [`slug`] | Filename slug rule shared by project pages and every link to them |
//! | [`generate`] | Pure content → file-set generation, rendered with Maud |
//! | [`repo`] | Git status/stage/commit/push state machine with per-command deadlines |
//! | [`pipeline`] | Orchestration: deploy, single-flight publish, preview |
//! | [`bridge`] | Typed request/response surface for the editing UI process |
//! | [`config`] | Explicit `folio.toml` process configuration |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped; the one raw
//!   fragment (the Markdown-rendered portfolio body) opts out explicitly.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Deterministic Generation
//!
//! The generator is a pure function: no timestamps, no random ids, no
//! environment reads inside generated markup. This is load-bearing, not
//! cosmetic — the publish flow decides whether there is anything to commit
//! by asking git, and that only gives a meaningful answer when regenerating
//! unchanged content leaves every byte in place.
//!
//! ## Git CLI Over libgit2
//!
//! Publication shells out to the `git` binary rather than linking a git
//! library. The four commands involved (porcelain status, stage-all,
//! commit, push) are stable porcelain, the operator's own remotes and
//! credential helpers work unmodified, and each invocation runs under a
//! deadline so a hung push fails instead of wedging the pipeline.
//!
//! ## One JSON Store File
//!
//! Content and settings live in one pretty-printed JSON file. Reads never
//! fail — a missing or corrupt store yields defaults — because a first run
//! and a damaged file should both land the operator in a working editor,
//! not an error dialog.

pub mod bridge;
pub mod config;
pub mod content;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod repo;
pub mod slug;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;
