use insights_core::Product;

use crate::error::ScraperError;
use crate::site::SiteRef;
use crate::types::{FeedProduct, ProductFeed};

use super::FeedExtractor;

/// Full product catalog from the storefront's public `products.json` feed.
///
/// One [`Product`] per feed entry, in feed order. Only the first page of the
/// feed is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFeed;

impl FeedExtractor for CatalogFeed {
    type Output = Vec<Product>;

    fn path(&self) -> &str {
        "/products.json"
    }

    fn extract(
        &self,
        feed: serde_json::Value,
        site: &SiteRef,
    ) -> Result<Self::Output, ScraperError> {
        let feed: ProductFeed =
            serde_json::from_value(feed).map_err(|e| ScraperError::Deserialize {
                context: format!("product feed from {site}"),
                source: e,
            })?;

        Ok(feed
            .products
            .into_iter()
            .map(|entry| catalog_product(entry, site))
            .collect())
    }
}

fn catalog_product(entry: FeedProduct, site: &SiteRef) -> Product {
    let price = entry.first_price().map(str::to_owned);
    let image = entry.first_image().map(str::to_owned);
    let url = entry
        .handle
        .as_deref()
        .map(|handle| site.join(&format!("/products/{handle}")));

    Product {
        title: entry.title,
        handle: entry.handle,
        price,
        image,
        url,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn site() -> SiteRef {
        SiteRef::normalize("https://acme.test").unwrap()
    }

    #[test]
    fn maps_every_feed_entry() {
        let feed = json!({
            "products": [
                {
                    "title": "Classic Tee",
                    "handle": "classic-tee",
                    "variants": [{"price": "24.00"}, {"price": "26.00"}],
                    "images": [{"src": "https://cdn.test/tee.jpg"}, {"src": "https://cdn.test/tee-2.jpg"}]
                },
                {
                    "title": "Hoodie",
                    "handle": "hoodie",
                    "variants": [{"price": "60.00"}],
                    "images": []
                },
                {
                    "title": "Cap",
                    "handle": "cap",
                    "variants": [{"price": "18.00"}],
                    "images": [{"src": "https://cdn.test/cap.jpg"}]
                }
            ]
        });

        let products = CatalogFeed.extract(feed, &site()).unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(
            products[0],
            Product {
                title: Some("Classic Tee".to_string()),
                handle: Some("classic-tee".to_string()),
                price: Some("24.00".to_string()),
                image: Some("https://cdn.test/tee.jpg".to_string()),
                url: Some("https://acme.test/products/classic-tee".to_string()),
            }
        );
        for product in &products {
            let handle = product.handle.as_deref().unwrap();
            assert_eq!(
                product.url.as_deref(),
                Some(format!("https://acme.test/products/{handle}").as_str())
            );
        }
    }

    #[test]
    fn entry_without_variants_has_no_price() {
        let feed = json!({"products": [{"title": "Gift Card", "handle": "gift-card", "variants": []}]});
        let products = CatalogFeed.extract(feed, &site()).unwrap();
        assert_eq!(products.len(), 1);
        assert!(products[0].price.is_none());
        assert!(products[0].image.is_none());
    }

    #[test]
    fn entry_without_handle_has_no_url() {
        let feed = json!({"products": [{"title": "Mystery"}]});
        let products = CatalogFeed.extract(feed, &site()).unwrap();
        assert!(products[0].handle.is_none());
        assert!(products[0].url.is_none());
    }

    #[test]
    fn empty_feed_yields_empty_catalog() {
        let products = CatalogFeed.extract(json!({"products": []}), &site()).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn wrongly_shaped_feed_is_a_deserialize_error() {
        let err = CatalogFeed
            .extract(json!({"products": "nope"}), &site())
            .unwrap_err();
        assert!(
            matches!(err, ScraperError::Deserialize { .. }),
            "expected Deserialize, got: {err:?}"
        );
    }
}
