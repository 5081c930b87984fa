//! Field extractors.
//!
//! Each extractor is a named strategy that maps one fetched page (or the
//! product feed) into one result-record field. Extractors never fetch and never
//! decide what happens on failure; [`crate::insights::InsightsFetcher`] does
//! both, so any heuristic here can be swapped without touching orchestration.

mod catalog;
mod contacts;
mod faq;
mod hero;
mod links;
mod page_text;
mod socials;
mod title;

use std::sync::LazyLock;

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::site::SiteRef;

pub use catalog::CatalogFeed;
pub use contacts::{scan_contacts, ContactDetails};
pub use faq::FaqPairs;
pub use hero::HeroProductLinks;
pub use links::{ImportantLinks, IMPORTANT_KEYWORDS};
pub use page_text::PageText;
pub use socials::{SocialLinks, SOCIAL_PLATFORMS};
pub use title::DocumentTitle;

/// Storefront homepage path.
pub const HOMEPAGE_PATH: &str = "/";

static ANCHOR_WITH_HREF: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Elements whose text content is never rendered.
const HIDDEN_TEXT_PARENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Maps a parsed HTML page into a field value.
pub trait MarkupExtractor {
    type Output: Default;

    /// Path fetched for this extractor, relative to the site root.
    fn path(&self) -> &str;

    fn extract(&self, document: &Html, site: &SiteRef) -> Self::Output;
}

/// Maps a decoded JSON feed into a field value.
pub trait FeedExtractor {
    type Output: Default;

    /// Path fetched for this extractor, relative to the site root.
    fn path(&self) -> &str;

    /// # Errors
    ///
    /// Returns [`ScraperError::Deserialize`] when the feed does not have the
    /// expected shape.
    fn extract(
        &self,
        feed: serde_json::Value,
        site: &SiteRef,
    ) -> Result<Self::Output, ScraperError>;
}

/// All rendered text of the page, whitespace-collapsed and joined by single
/// spaces. Script and style contents are skipped.
#[must_use]
pub fn visible_text(document: &Html) -> String {
    let mut words: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| HIDDEN_TEXT_PARENTS.contains(&el.name()));
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}

/// Text content of one element, whitespace-collapsed.
///
/// Fragments from nested elements are joined with a single space, so
/// `<span> Classic </span> Tee` reads `"Classic Tee"` rather than the
/// unseparated `"ClassicTee"`.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw `href` values of every anchor, in document order.
pub(crate) fn anchor_hrefs<'a>(document: &'a Html) -> impl Iterator<Item = &'a str> + 'a {
    document
        .select(&ANCHOR_WITH_HREF)
        .filter_map(|a| a.value().attr("href"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_text_collapses_whitespace() {
        let doc = Html::parse_document(
            "<html><body><h1>  Shipping\n\n Policy </h1><p>We ship\tworldwide.</p></body></html>",
        );
        assert_eq!(visible_text(&doc), "Shipping Policy We ship worldwide.");
    }

    #[test]
    fn visible_text_skips_scripts_and_styles() {
        let doc = Html::parse_document(
            "<html><head><style>p { color: red }</style><script>var x = 1;</script></head>\
             <body><p>Hello</p><noscript>Enable JS</noscript></body></html>",
        );
        assert_eq!(visible_text(&doc), "Hello");
    }

    #[test]
    fn visible_text_includes_document_title() {
        let doc = Html::parse_document(
            "<html><head><title>Acme</title></head><body><p>Store</p></body></html>",
        );
        assert_eq!(visible_text(&doc), "Acme Store");
    }

    #[test]
    fn visible_text_of_empty_page_is_empty() {
        let doc = Html::parse_document("");
        assert_eq!(visible_text(&doc), "");
    }

    #[test]
    fn element_text_separates_nested_fragments() {
        let doc = Html::parse_document("<a href=\"/products/tee\"><span> Classic </span> Tee</a>");
        let anchor = doc.select(&ANCHOR_WITH_HREF).next().expect("anchor");
        assert_eq!(element_text(&anchor), "Classic Tee");
    }

    #[test]
    fn anchor_hrefs_skips_anchors_without_href() {
        let doc = Html::parse_document(
            "<a href=\"/a\">A</a><a name=\"top\">Top</a><a href=\"https://x.test\">X</a>",
        );
        let hrefs: Vec<&str> = anchor_hrefs(&doc).collect();
        assert_eq!(hrefs, vec!["/a", "https://x.test"]);
    }
}
