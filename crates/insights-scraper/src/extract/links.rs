use scraper::Html;

use crate::site::SiteRef;

use super::{anchor_hrefs, MarkupExtractor, HOMEPAGE_PATH};

/// Keywords marking a homepage link as important. Matched case-insensitively.
pub const IMPORTANT_KEYWORDS: [&str; 4] = ["contact", "blog", "track", "about"];

/// Absolute homepage links whose target mentions contact, blog, order
/// tracking, or about pages. Not deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportantLinks;

impl MarkupExtractor for ImportantLinks {
    type Output = Vec<String>;

    fn path(&self) -> &str {
        HOMEPAGE_PATH
    }

    fn extract(&self, document: &Html, site: &SiteRef) -> Self::Output {
        anchor_hrefs(document)
            .filter(|href| {
                let lower = href.to_lowercase();
                IMPORTANT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
            })
            .map(|href| site.join(href))
            .collect()
    }
}
