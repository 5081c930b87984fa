//! The aggregate record returned for one storefront.
//!
//! The field set is fixed: a field with no data is `None` or an empty list,
//! never an error. Serialized field order matches the public API response.

use serde::{Deserialize, Serialize};

/// A product as seen either in the catalog feed or linked from the homepage.
///
/// Catalog entries fill every field they can. Homepage ("hero") entries only
/// carry `title` and `url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: Option<String>,
    /// Storefront URL slug, e.g. `"classic-tee"`.
    pub handle: Option<String>,
    /// Price of the first variant as decimal text, e.g. `"24.00"`.
    pub price: Option<String>,
    /// Source URL of the first product image.
    pub image: Option<String>,
    /// Absolute product page URL.
    pub url: Option<String>,
}

/// A question/answer pair scraped from the FAQ page.
///
/// Pairing is positional (heading, then the next paragraph), so the answer
/// is a best guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandContext {
    pub brand_name: Option<String>,
    pub products: Vec<Product>,
    pub hero_products: Vec<Product>,
    pub privacy_policy: Option<String>,
    pub return_refund_policy: Option<String>,
    pub faqs: Vec<Faq>,
    pub social_handles: Vec<String>,
    /// Emails and phone numbers, deduplicated.
    pub contact_details: Vec<String>,
    pub about: Option<String>,
    pub important_links: Vec<String>,
}

impl BrandContext {
    /// Returns `true` when no extractor produced anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
