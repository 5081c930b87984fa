use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::site::SiteRef;

use super::{visible_text, MarkupExtractor};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
// Optional `+`, then at least nine digits/hyphens/spaces starting and ending with a digit.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\-\s]{7,}\d").expect("valid phone regex"));

/// Email addresses and phone numbers from the contact page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactDetails;

impl MarkupExtractor for ContactDetails {
    type Output = Vec<String>;

    fn path(&self) -> &str {
        "/pages/contact"
    }

    fn extract(&self, document: &Html, _site: &SiteRef) -> Self::Output {
        scan_contacts(&visible_text(document))
    }
}

/// Finds emails and phone numbers in `text`.
///
/// Emails come first, then phones; each distinct match appears once, at its
/// first occurrence.
#[must_use]
pub fn scan_contacts(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let matches = EMAIL_RE
        .find_iter(text)
        .chain(PHONE_RE.find_iter(text))
        .map(|m| m.as_str());
    for candidate in matches {
        if !found.iter().any(|seen| seen == candidate) {
            found.push(candidate.to_owned());
        }
    }
    found
}
