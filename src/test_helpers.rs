//! Shared test utilities for the folio-press test suite.

use crate::content::{ProjectPage, SocialLink, WebsiteContent, WorkItem};

/// A realistically filled content aggregate.
///
/// Covers every section: headline pair, present and past work, social
/// links with and without icon overrides, portfolio body, and an edited
/// project page alongside the untouched defaults.
pub fn sample_content() -> WebsiteContent {
    let mut content = WebsiteContent::default();

    content.homepage.headline1 = "Building, breaking,".to_string();
    content.homepage.headline2 = "making things".to_string();
    content.homepage.present_work.push(WorkItem {
        id: "1700000000000".to_string(),
        title: "Designing".to_string(),
        label: "PhonePe".to_string(),
        url: "https://phonepe.com".to_string(),
    });
    content.homepage.past_work.push(WorkItem {
        id: "1700000000001".to_string(),
        title: "Old Portfolio".to_string(),
        label: "oldportfolio.html".to_string(),
        url: String::new(),
    });
    content.homepage.social_links.push(SocialLink {
        platform: "Twitter".to_string(),
        url: "https://twitter.com/someone".to_string(),
        icon: String::new(),
    });
    content.homepage.social_links.push(SocialLink {
        platform: "Email".to_string(),
        url: "mailto:someone@example.com".to_string(),
        icon: "✉️".to_string(),
    });

    content.portfolio.heading1 = "Portfolio".to_string();
    content.portfolio.heading2 = "Selected Work".to_string();
    content.portfolio.content = "A decade of product design.".to_string();

    let googlepay = content.projects.get_mut("googlepay").unwrap();
    *googlepay = ProjectPage {
        heading1: "Google Pay".to_string(),
        heading2: "Work".to_string(),
        description: "Payments for the next billion users.".to_string(),
        url: "https://pay.google.com".to_string(),
    };

    content
}
