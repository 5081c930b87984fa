use scraper::Html;

use crate::site::SiteRef;

use super::{visible_text, MarkupExtractor};

/// Full visible text of one fixed page.
#[derive(Debug, Clone, Copy)]
pub struct PageText {
    path: &'static str,
}

impl PageText {
    pub const PRIVACY_POLICY: Self = Self::new("/policies/privacy-policy");
    pub const REFUND_POLICY: Self = Self::new("/policies/refund-policy");
    pub const ABOUT: Self = Self::new("/pages/about");

    #[must_use]
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }
}

impl MarkupExtractor for PageText {
    type Output = Option<String>;

    fn path(&self) -> &str {
        self.path
    }

    fn extract(&self, document: &Html, _site: &SiteRef) -> Self::Output {
        Some(visible_text(document))
    }
}
