//! Normalized storefront base URL.

use reqwest::Url;

use crate::error::ScraperError;

/// The root URL of the storefront being inspected.
///
/// Created once per request by [`SiteRef::normalize`]; every extractor path is
/// resolved against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRef {
    base: String,
    url: Url,
}

impl SiteRef {
    /// Normalizes user input into a base reference.
    ///
    /// Given `"acme.test/"`, returns a reference to `"https://acme.test"`.
    /// Input that already carries an `http://` or `https://` scheme (any case)
    /// keeps it. Exactly one trailing slash is stripped.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSiteUrl`] if the input is empty or does
    /// not parse as an absolute URL with a host.
    pub fn normalize(input: &str) -> Result<Self, ScraperError> {
        let trimmed = input.trim();
        let invalid = |reason: String| ScraperError::InvalidSiteUrl {
            site_url: input.to_owned(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("site URL is empty".to_owned()));
        }

        let with_scheme = if has_http_scheme(trimmed) {
            trimmed.to_owned()
        } else {
            format!("https://{trimmed}")
        };
        let base = with_scheme
            .strip_suffix('/')
            .map_or_else(|| with_scheme.clone(), str::to_owned);

        let url = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        if !url.host_str().is_some_and(|host| !host.is_empty()) {
            return Err(invalid("URL has no host".to_owned()));
        }

        Ok(Self { base, url })
    }

    /// The normalized base, without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Resolves `reference` against the base the way a browser resolves an
    /// `href`: absolute URLs pass through, `/path` replaces the base path,
    /// relative paths resolve against the base's last segment.
    #[must_use]
    pub fn join(&self, reference: &str) -> String {
        self.url.join(reference).map_or_else(
            |e| {
                tracing::debug!(
                    base = %self.base,
                    reference,
                    error = %e,
                    "could not resolve reference, concatenating"
                );
                format!("{}{reference}", self.base)
            },
            String::from,
        )
    }
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

impl std::fmt::Display for SiteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)
    }
}
