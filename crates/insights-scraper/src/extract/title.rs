use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::site::SiteRef;

use super::{MarkupExtractor, HOMEPAGE_PATH};

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));

/// Brand name taken from the homepage `<title>`, trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTitle;

impl MarkupExtractor for DocumentTitle {
    type Output = Option<String>;

    fn path(&self) -> &str {
        HOMEPAGE_PATH
    }

    fn extract(&self, document: &Html, _site: &SiteRef) -> Self::Output {
        document
            .select(&TITLE)
            .next()
            .map(|title| title.text().collect::<String>().trim().to_owned())
    }
}
