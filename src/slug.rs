//! Centralized slug derivation for generated page filenames.
//!
//! A project page's filename and every link pointing at it must agree, so
//! the rule lives in exactly one place: lower-case the title and strip all
//! whitespace, with no separator inserted.
//!
//! - `"Google Pay"` → `googlepay`
//! - `"Eureka Forbes"` → `eurekaforbes`
//! - `"  Explore  "` → `explore`

/// Derive a slug from a human-readable title.
pub fn slugify(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Derive the `.html` filename for a title.
pub fn html_filename(title: &str) -> String {
    format!("{}.html", slugify(title))
}
