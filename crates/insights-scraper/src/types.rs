//! Response types for the public `products.json` feed.
//!
//! Only the fields the catalog extractor reads are modelled, and every one of
//! them is optional: a storefront with an odd feed still yields entries
//! instead of failing the whole catalog.
//!
//! ### `price`
//! Shopify serves variant prices as decimal strings (`"30.00"`). Some themes
//! and proxies re-serialize them as JSON numbers, so both are accepted and
//! kept as text.
//!
//! ### `variants` / `images`
//! Either may be an empty array. The first element is the storefront default;
//! an empty array means "no price" / "no image", not an error.

use serde::{Deserialize, Deserializer};

/// Top-level response from `GET /products.json`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFeed {
    #[serde(default)]
    pub products: Vec<FeedProduct>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedProduct {
    #[serde(default)]
    pub title: Option<String>,

    /// URL slug for the product page (e.g., `"classic-tee"`).
    #[serde(default)]
    pub handle: Option<String>,

    #[serde(default)]
    pub variants: Vec<FeedVariant>,

    #[serde(default)]
    pub images: Vec<FeedImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedVariant {
    #[serde(default, deserialize_with = "price_as_text")]
    pub price: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedImage {
    /// Canonical CDN URL.
    #[serde(default)]
    pub src: Option<String>,
}

impl FeedProduct {
    /// Price of the first variant, if any.
    #[must_use]
    pub fn first_price(&self) -> Option<&str> {
        self.variants.first().and_then(|v| v.price.as_deref())
    }

    /// Source of the first image, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().and_then(|i| i.src.as_deref())
    }
}

fn price_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
