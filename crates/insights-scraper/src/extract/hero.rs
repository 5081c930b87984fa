use std::sync::LazyLock;

use insights_core::Product;
use scraper::{Html, Selector};

use crate::site::SiteRef;

use super::{element_text, MarkupExtractor, HOMEPAGE_PATH};

static PRODUCT_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href*='/products/']").expect("valid product link selector")
});

/// Products linked from the homepage ("featured" products).
///
/// Takes the first `limit` anchors whose target contains `/products/`, in
/// document order. Only `title` and `url` are filled.
#[derive(Debug, Clone, Copy)]
pub struct HeroProductLinks {
    pub limit: usize,
}

impl Default for HeroProductLinks {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl MarkupExtractor for HeroProductLinks {
    type Output = Vec<Product>;

    fn path(&self) -> &str {
        HOMEPAGE_PATH
    }

    fn extract(&self, document: &Html, site: &SiteRef) -> Self::Output {
        document
            .select(&PRODUCT_LINK)
            .take(self.limit)
            .filter_map(|a| {
                let href = a.value().attr("href")?;
                Some(Product {
                    title: Some(element_text(&a)),
                    url: Some(site.join(href)),
                    ..Product::default()
                })
            })
            .collect()
    }
}
