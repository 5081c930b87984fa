use scraper::Html;

use crate::site::SiteRef;

use super::{anchor_hrefs, MarkupExtractor, HOMEPAGE_PATH};

/// Substrings identifying a social platform link. Matching is case-sensitive.
pub const SOCIAL_PLATFORMS: [&str; 5] = ["facebook", "instagram", "tiktok", "twitter", "youtube"];

/// Raw homepage link targets that point at a known social platform.
///
/// Targets are returned as written in the page: not resolved, not
/// deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocialLinks;

impl MarkupExtractor for SocialLinks {
    type Output = Vec<String>;

    fn path(&self) -> &str {
        HOMEPAGE_PATH
    }

    fn extract(&self, document: &Html, _site: &SiteRef) -> Self::Output {
        anchor_hrefs(document)
            .filter(|href| SOCIAL_PLATFORMS.iter().any(|platform| href.contains(platform)))
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<String> {
        let site = SiteRef::normalize("acme.test").unwrap();
        SocialLinks.extract(&Html::parse_document(html), &site)
    }

    #[test]
    fn collects_social_links_in_order() {
        let links = extract(
            "<a href=\"https://instagram.com/acme\">IG</a>\
             <a href=\"/pages/about\">About</a>\
             <a href=\"https://www.youtube.com/@acme\">YT</a>\
             <a href=\"https://facebook.com/acme\">FB</a>",
        );
        assert_eq!(
            links,
            vec![
                "https://instagram.com/acme",
                "https://www.youtube.com/@acme",
                "https://facebook.com/acme",
            ]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        let links = extract(
            "<header><a href=\"https://tiktok.com/@acme\">T</a></header>\
             <footer><a href=\"https://tiktok.com/@acme\">T</a></footer>",
        );
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn match_is_case_sensitive() {
        let links = extract("<a href=\"https://Twitter.com/acme\">X</a>");
        assert!(links.is_empty());
    }

    #[test]
    fn relative_targets_are_not_resolved() {
        let links = extract("<a href=\"/pages/instagram-feed\">Feed</a>");
        assert_eq!(links, vec!["/pages/instagram-feed"]);
    }
}
