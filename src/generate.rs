//! Static site generation.
//!
//! Transforms a [`WebsiteContent`] aggregate into the complete generated
//! file set, as a pure function — no I/O, no clock, no randomness. Identical
//! input produces byte-identical output, which is what lets the publish flow
//! lean on `git status`: after a deploy, an untouched aggregate produces an
//! unchanged working tree.
//!
//! ## Generated Files
//!
//! - `index.html` — home page: headline pair, present/past work, social links
//! - `portfolio.html` — listing page with Markdown body and project grid
//! - `<slug>.html` — one page per project, filename derived via [`crate::slug`]
//! - `data.json` — pretty-printed aggregate, both audit trail and re-import
//!   source
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolation is auto-escaped; the single raw fragment is the
//! Markdown-rendered portfolio body, which is operator-authored and passes
//! through `PreEscaped` deliberately.

use crate::content::{HomePage, ProjectPage, SocialLink, WebsiteContent, WorkItem};
use crate::slug;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generate the full file set for the site.
///
/// Returns a map of filename → file body, ordered by filename. Missing
/// optional fields render as omitted blocks; this only fails if the
/// aggregate cannot be serialized for `data.json`.
pub fn generate(content: &WebsiteContent) -> Result<BTreeMap<String, String>, GenerateError> {
    let mut files = BTreeMap::new();

    files.insert("index.html".to_string(), render_home(content).into_string());
    files.insert(
        "portfolio.html".to_string(),
        render_portfolio(content).into_string(),
    );
    for (key, page) in &content.projects {
        files.insert(
            project_filename(key, page),
            render_project(key, page).into_string(),
        );
    }
    files.insert("data.json".to_string(), serde_json::to_string_pretty(content)?);

    Ok(files)
}

/// Filename of a project page: the slug of its effective title.
///
/// Used both to name the generated file and to build every link to it from
/// the home and portfolio pages, so the two can never diverge. A title that
/// slugs to nothing falls back to the project key.
pub fn project_filename(key: &str, page: &ProjectPage) -> String {
    let s = slug::slugify(&page.effective_heading1(key));
    if s.is_empty() {
        slug::html_filename(key)
    } else {
        format!("{s}.html")
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure shared by every page.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="styles.css";
            }
            body {
                div.container {
                    div.main-content {
                        (content)
                    }
                }
            }
        }
    }
}

/// Renders the two-line main heading used on every page.
fn main_heading(line1: &str, line2: &str) -> Markup {
    html! {
        h1.main-heading {
            span.line-1 { (line1) }
            span.line-2 { (line2) }
        }
    }
}

/// Renders one present-work link: "title at label", or just the title when
/// no label is set.
fn present_link(work: &WorkItem) -> Markup {
    let href = if work.url.is_empty() { "#" } else { &work.url };
    html! {
        a.main-link href=(href) target="_blank" {
            @if work.label.is_empty() {
                (work.title)
            } @else {
                (work.title) " at " (work.label)
            }
        }
    }
}

/// Renders one past-work link.
///
/// Target precedence: the explicit filename label, then the external url,
/// then the slug of the title — the same rule the project pages use.
fn past_link(work: &WorkItem) -> Markup {
    let href = if !work.label.is_empty() {
        work.label.clone()
    } else if !work.url.is_empty() {
        work.url.clone()
    } else {
        slug::html_filename(&work.title)
    };
    html! {
        a.past-work-link href=(href) { (work.title) }
    }
}

/// Renders one social link with its decorative icon.
fn social_link(link: &SocialLink) -> Markup {
    let icon = if link.icon.is_empty() {
        platform_icon(&link.platform)
    } else {
        &link.icon
    };
    html! {
        a.social-link href=(link.url) target="_blank" {
            span.social-icon { (icon) }
            span { (link.platform.to_uppercase()) }
        }
    }
}

/// Decorative icon for a platform name, matched case-insensitively.
fn platform_icon(platform: &str) -> &'static str {
    match platform.to_lowercase().as_str() {
        "github" => "🐙",
        "linkedin" => "💼",
        "twitter" => "🐦",
        "instagram" => "📷",
        "facebook" => "📘",
        "youtube" => "📺",
        "medium" => "📝",
        "behance" => "🎨",
        "dribbble" => "🏀",
        _ => "🔗",
    }
}

/// Render a Markdown string to an HTML fragment.
fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page.
pub fn render_home(content: &WebsiteContent) -> Markup {
    let home: &HomePage = &content.homepage;

    let body = html! {
        (main_heading(&home.headline1, &home.headline2))
        div.content-grid {
            div.section {
                div.main-links {
                    h3.main-links-title { "Present" }
                    @for work in &home.present_work {
                        (present_link(work))
                    }
                    @if home.present_work.is_empty() {
                        a.main-link href="#" target="_blank" { "Available for opportunities" }
                    }
                }
                div.social-links {
                    @for link in &home.social_links {
                        (social_link(link))
                    }
                }
            }
            div.section {
                div.past-work {
                    h3.past-work-title { "Past" }
                    div.past-work-links {
                        @for (key, page) in &content.projects {
                            a.past-work-link href=(project_filename(key, page)) {
                                (page.effective_heading1(key))
                            }
                        }
                        @for work in &home.past_work {
                            (past_link(work))
                        }
                        a.past-work-link.portfolio-link href="portfolio.html" { "Full Portfolio" }
                    }
                }
            }
        }
    };

    base_document("Portfolio", body)
}

/// Renders the portfolio listing page.
pub fn render_portfolio(content: &WebsiteContent) -> Markup {
    let portfolio = &content.portfolio;
    let title = if portfolio.heading1.is_empty() {
        "Portfolio"
    } else {
        &portfolio.heading1
    };

    let body = html! {
        (main_heading(&portfolio.heading1, &portfolio.heading2))
        @if !portfolio.content.is_empty() {
            div.portfolio-body {
                (PreEscaped(markdown_to_html(&portfolio.content)))
            }
        }
        @if !content.projects.is_empty() {
            div.projects-grid {
                @for (key, page) in &content.projects {
                    div.project-card {
                        h3 {
                            a href=(project_filename(key, page)) {
                                (page.effective_heading1(key))
                            }
                        }
                        @if !page.description.is_empty() {
                            p { (page.description) }
                        }
                    }
                }
            }
        }
        div.main-links {
            a.main-link href="index.html" { "← Back to Home" }
        }
    };

    base_document(title, body)
}

/// Renders one project page.
pub fn render_project(key: &str, page: &ProjectPage) -> Markup {
    let heading1 = page.effective_heading1(key);

    let body = html! {
        (main_heading(&heading1, page.effective_heading2()))
        div.project-content {
            @if !page.description.is_empty() {
                div.project-description {
                    p { (page.description) }
                }
            }
            @if !page.url.is_empty() {
                div.project-links {
                    a.project-link href=(page.url) target="_blank" { "View Project" }
                }
            }
        }
        div.main-links {
            a.main-link href="index.html" { "← Back to Home" }
            a.main-link href="portfolio.html" { "← Back to Portfolio" }
        }
    };

    base_document(&heading1, body)
}

// ============================================================================
// Tests
// ============================================================================
