//! HTTP client for storefront pages and the public `products.json` feed.

use std::time::Duration;

use reqwest::Client;
use scraper::Html;

use crate::error::ScraperError;
use crate::site::SiteRef;

/// Connect timeout applied on top of the per-request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A fetched HTML page.
///
/// Holds the raw body rather than a parsed tree so it can cross `.await`
/// points; call [`Markup::document`] to parse.
#[derive(Debug, Clone)]
pub struct Markup {
    pub url: String,
    pub body: String,
}

impl Markup {
    #[must_use]
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Issues single, timed GET requests against a storefront.
///
/// Non-2xx responses are typed errors. There is no retry: a failed call is
/// final for that call.
pub struct StorefrontClient {
    client: Client,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with the given per-request timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Builds a client from the request timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &insights_core::AppConfig) -> Result<Self, ScraperError> {
        Self::new(config.request_timeout_secs, &config.user_agent)
    }

    /// Fetches `path` relative to `site` as HTML.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, DNS, TLS, or timeout failure.
    pub async fn fetch_markup(&self, site: &SiteRef, path: &str) -> Result<Markup, ScraperError> {
        let url = site.join(path);
        let body = self
            .get_text(&url, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .await?;
        Ok(Markup { url, body })
    }

    /// Fetches `path` relative to `site` and decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::fetch_markup`], plus
    /// [`ScraperError::Deserialize`] when the body is not valid JSON.
    pub async fn fetch_json(
        &self,
        site: &SiteRef,
        path: &str,
    ) -> Result<serde_json::Value, ScraperError> {
        let url = site.join(path);
        let body = self
            .get_text(&url, "application/json,text/html;q=0.9,*/*;q=0.8")
            .await?;
        serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
            context: url,
            source: e,
        })
    }

    async fn get_text(&self, url: &str, accept: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "fetching storefront resource");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
