pub mod client;
pub mod error;
pub mod extract;
pub mod insights;
pub mod site;
pub mod types;

pub use client::{Markup, StorefrontClient};
pub use error::ScraperError;
pub use insights::InsightsFetcher;
pub use site::SiteRef;
pub use types::{FeedImage, FeedProduct, FeedVariant, ProductFeed};
