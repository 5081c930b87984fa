use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid site URL \"{site_url}\": {reason}")]
    InvalidSiteUrl { site_url: String, reason: String },
}

impl ScraperError {
    /// Returns `true` when the storefront could not be read at all: network,
    /// DNS, or timeout failures, and non-success HTTP statuses.
    ///
    /// Everything else (malformed payloads, invalid input) is an internal error.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            ScraperError::Http(_) | ScraperError::NotFound { .. } | ScraperError::UnexpectedStatus { .. }
        )
    }
}
