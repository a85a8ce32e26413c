//! The website content data model.
//!
//! [`WebsiteContent`] is the single root aggregate: it is loaded from the
//! store as one unit, edited as one unit, and handed to the generator as one
//! unit. There is no partial loading and no deletion of the aggregate itself,
//! only removal of items within its sequences.
//!
//! ## Shape
//!
//! ```text
//! WebsiteContent
//! ├── homepage          headline pair + present/past work + social links
//! ├── portfolio         heading pair + freeform Markdown content
//! └── projects          project key → ProjectPage (fixed, known key set)
//! ```
//!
//! Every string field defaults to `""` and every sequence to empty, so the
//! generator never needs null handling. Item order within a sequence is the
//! render order and the only identity that matters for output; the UI-side
//! `id` on work items is carried through serialization but never rendered.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The fixed set of project pages the site exposes.
///
/// A stored aggregate missing one of these keys gets it restored on load;
/// see [`WebsiteContent::merged_over_defaults`].
pub const PROJECT_KEYS: [&str; 4] = ["googlepay", "dunzo", "eurekaforbes", "explore"];

/// Root aggregate for all editable website content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsiteContent {
    pub homepage: HomePage,
    pub portfolio: PortfolioPage,
    #[serde(default = "default_projects")]
    pub projects: BTreeMap<String, ProjectPage>,
}

impl Default for WebsiteContent {
    fn default() -> Self {
        Self {
            homepage: HomePage::default(),
            portfolio: PortfolioPage::default(),
            projects: default_projects(),
        }
    }
}

impl WebsiteContent {
    /// Restore any missing fixed project key with an empty page.
    ///
    /// Persisted aggregates from older saves may predate a project page;
    /// the key set is part of the site's shape, not of the stored data.
    pub fn merged_over_defaults(mut self) -> Self {
        for key in PROJECT_KEYS {
            self.projects.entry(key.to_string()).or_default();
        }
        self
    }
}

fn default_projects() -> BTreeMap<String, ProjectPage> {
    PROJECT_KEYS
        .iter()
        .map(|key| (key.to_string(), ProjectPage::default()))
        .collect()
}

/// Home page content: headline pair, work lists, social links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomePage {
    /// First headline line, e.g. "Building, breaking,".
    pub headline1: String,
    /// Second headline line, e.g. "making things".
    pub headline2: String,
    /// Current engagements, rendered as "title at label" links.
    pub present_work: Vec<WorkItem>,
    /// Past projects, rendered as links into the generated project pages.
    pub past_work: Vec<WorkItem>,
    pub social_links: Vec<SocialLink>,
}

/// One entry in a home page work list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkItem {
    /// Opaque identity assigned by the editing UI for list bookkeeping.
    /// Round-tripped through storage, never rendered into generated markup.
    pub id: String,
    pub title: String,
    /// Secondary label: the company for present work, the target filename
    /// for past work.
    pub label: String,
    /// Optional external link target.
    pub url: String,
}

/// A social profile link shown on the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    /// Free-text platform name; selects a decorative icon case-insensitively.
    pub platform: String,
    pub url: String,
    /// Explicit icon override; when empty, the platform table decides.
    pub icon: String,
}

/// Portfolio listing page content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioPage {
    pub heading1: String,
    pub heading2: String,
    /// Freeform Markdown body, rendered to HTML on the portfolio page.
    pub content: String,
}

/// Content of one generated project page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPage {
    pub heading1: String,
    pub heading2: String,
    pub description: String,
    /// External link to the live project, if any.
    pub url: String,
}

impl ProjectPage {
    /// The heading to render and derive the filename from.
    ///
    /// An empty `heading1` falls back to the built-in title for known keys
    /// ("googlepay" → "Google Pay"), then to the key itself, so a page is
    /// always nameable.
    pub fn effective_heading1(&self, key: &str) -> String {
        if !self.heading1.is_empty() {
            return self.heading1.clone();
        }
        builtin_heading(key).unwrap_or(key).to_string()
    }

    /// The subtitle to render; empty falls back to the site-wide "Work".
    pub fn effective_heading2(&self) -> &str {
        if self.heading2.is_empty() {
            "Work"
        } else {
            &self.heading2
        }
    }
}

/// Built-in display titles for the fixed project key set.
fn builtin_heading(key: &str) -> Option<&'static str> {
    match key {
        "googlepay" => Some("Google Pay"),
        "dunzo" => Some("Dunzo"),
        "eurekaforbes" => Some("Eureka Forbes"),
        "explore" => Some("Explore"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_content_has_empty_strings_everywhere() {
        let content = WebsiteContent::default();
        assert_eq!(content.homepage.headline1, "");
        assert_eq!(content.homepage.headline2, "");
        assert_eq!(content.portfolio.heading1, "");
        assert_eq!(content.portfolio.content, "");
        for page in content.projects.values() {
            assert_eq!(page.heading1, "");
            assert_eq!(page.description, "");
        }
    }

    #[test]
    fn default_content_has_empty_sequences() {
        let content = WebsiteContent::default();
        assert!(content.homepage.present_work.is_empty());
        assert!(content.homepage.past_work.is_empty());
        assert!(content.homepage.social_links.is_empty());
    }

    #[test]
    fn default_content_carries_fixed_project_keys() {
        let content = WebsiteContent::default();
        let keys: Vec<&str> = content.projects.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["dunzo", "eurekaforbes", "explore", "googlepay"]);
    }

    #[test]
    fn merged_over_defaults_restores_missing_keys() {
        let mut content = WebsiteContent::default();
        content.projects.remove("dunzo");
        let merged = content.merged_over_defaults();
        assert!(merged.projects.contains_key("dunzo"));
    }

    #[test]
    fn merged_over_defaults_keeps_edited_pages() {
        let mut content = WebsiteContent::default();
        content.projects.get_mut("googlepay").unwrap().heading1 = "Google Pay".to_string();
        let merged = content.merged_over_defaults();
        assert_eq!(merged.projects["googlepay"].heading1, "Google Pay");
    }

    #[test]
    fn merged_over_defaults_keeps_extra_keys() {
        let mut content = WebsiteContent::default();
        content
            .projects
            .insert("sideproject".to_string(), ProjectPage::default());
        let merged = content.merged_over_defaults();
        assert!(merged.projects.contains_key("sideproject"));
        assert_eq!(merged.projects.len(), 5);
    }

    #[test]
    fn effective_heading1_prefers_edited_value() {
        let page = ProjectPage {
            heading1: "GPay Redesign".to_string(),
            ..ProjectPage::default()
        };
        assert_eq!(page.effective_heading1("googlepay"), "GPay Redesign");
    }

    #[test]
    fn effective_heading1_falls_back_to_builtin() {
        let page = ProjectPage::default();
        assert_eq!(page.effective_heading1("googlepay"), "Google Pay");
        assert_eq!(page.effective_heading1("eurekaforbes"), "Eureka Forbes");
    }

    #[test]
    fn effective_heading1_unknown_key_uses_key() {
        let page = ProjectPage::default();
        assert_eq!(page.effective_heading1("sideproject"), "sideproject");
    }

    #[test]
    fn effective_heading2_defaults_to_work() {
        let page = ProjectPage::default();
        assert_eq!(page.effective_heading2(), "Work");

        let page = ProjectPage {
            heading2: "Case Study".to_string(),
            ..ProjectPage::default()
        };
        assert_eq!(page.effective_heading2(), "Case Study");
    }

    #[test]
    fn aggregate_round_trips_through_json() {
        let mut content = WebsiteContent::default();
        content.homepage.headline1 = "Building, breaking,".to_string();
        content.homepage.present_work.push(WorkItem {
            id: "1700000000000".to_string(),
            title: "Designing".to_string(),
            label: "PhonePe".to_string(),
            url: "https://phonepe.com".to_string(),
        });
        content.homepage.social_links.push(SocialLink {
            platform: "Twitter".to_string(),
            url: "https://twitter.com/x".to_string(),
            icon: String::new(),
        });

        let json = serde_json::to_string_pretty(&content).unwrap();
        let parsed: WebsiteContent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, content);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let parsed: WebsiteContent = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, WebsiteContent::default());

        let parsed: WebsiteContent =
            serde_json::from_str(r#"{"homepage": {"headline1": "Hi"}}"#).unwrap();
        assert_eq!(parsed.homepage.headline1, "Hi");
        assert_eq!(parsed.homepage.headline2, "");
        assert_eq!(parsed.projects.len(), 4);
    }
}
