//! Assembles a [`BrandContext`] for one storefront.

use insights_core::{BrandContext, FailurePolicies, FailurePolicy, Field};
use crate::client::{Markup, StorefrontClient};
use crate::error::ScraperError;
use crate::extract::{
    CatalogFeed, ContactDetails, DocumentTitle, FaqPairs, FeedExtractor, HeroProductLinks,
    ImportantLinks, MarkupExtractor, PageText, SocialLinks,
};
use crate::site::SiteRef;

/// Runs every field extractor against one site, in a fixed sequence, and
/// applies each field's [`FailurePolicy`] to the outcome.
///
/// Requests are issued one after another; nothing is shared between calls to
/// [`InsightsFetcher::fetch`].
pub struct InsightsFetcher {
    client: StorefrontClient,
    policies: FailurePolicies,
}

impl InsightsFetcher {
    #[must_use]
    pub fn new(client: StorefrontClient, policies: FailurePolicies) -> Self {
        Self { client, policies }
    }

    /// Normalizes `site_url` and builds the full result record.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidSiteUrl`] if `site_url` cannot be normalized.
    /// - The first error from any field whose policy is
    ///   [`FailurePolicy::Required`]; fields gathered before it are discarded.
    pub async fn fetch(&self, site_url: &str) -> Result<BrandContext, ScraperError> {
        let site = SiteRef::normalize(site_url)?;
        self.fetch_site(&site).await
    }

    /// Builds the full result record for an already-normalized site.
    ///
    /// # Errors
    ///
    /// See [`InsightsFetcher::fetch`].
    pub async fn fetch_site(&self, site: &SiteRef) -> Result<BrandContext, ScraperError> {
        tracing::info!(site = %site, "fetching brand insights");

        let privacy_policy = self
            .run_markup(Field::PrivacyPolicy, &PageText::PRIVACY_POLICY, site)
            .await?;
        let return_refund_policy = self
            .run_markup(Field::ReturnRefundPolicy, &PageText::REFUND_POLICY, site)
            .await?;
        let brand_name = self
            .run_markup(Field::BrandName, &DocumentTitle, site)
            .await?;
        let products = self.run_feed(Field::Products, &CatalogFeed, site).await?;
        let hero_products = self
            .run_markup(Field::HeroProducts, &HeroProductLinks::default(), site)
            .await?;
        let faqs = self.run_markup(Field::Faqs, &FaqPairs, site).await?;
        let social_handles = self
            .run_markup(Field::SocialHandles, &SocialLinks, site)
            .await?;
        let contact_details = self
            .run_markup(Field::ContactDetails, &ContactDetails, site)
            .await?;
        let about = self.run_markup(Field::About, &PageText::ABOUT, site).await?;
        let important_links = self
            .run_markup(Field::ImportantLinks, &ImportantLinks, site)
            .await?;

        let context = BrandContext {
            brand_name,
            products,
            hero_products,
            privacy_policy,
            return_refund_policy,
            faqs,
            social_handles,
            contact_details,
            about,
            important_links,
        };

        tracing::info!(
            site = %site,
            products = context.products.len(),
            hero_products = context.hero_products.len(),
            faqs = context.faqs.len(),
            contacts = context.contact_details.len(),
            "brand insights fetched"
        );

        Ok(context)
    }

    async fn run_markup<E: MarkupExtractor>(
        &self,
        field: Field,
        extractor: &E,
        site: &SiteRef,
    ) -> Result<E::Output, ScraperError> {
        let outcome = self
            .client
            .fetch_markup(site, extractor.path())
            .await
            .map(|markup| parse_and_extract(extractor, &markup, site));
        self.settle(field, extractor.path(), outcome)
    }

    async fn run_feed<E: FeedExtractor>(
        &self,
        field: Field,
        extractor: &E,
        site: &SiteRef,
    ) -> Result<E::Output, ScraperError> {
        let outcome = match self.client.fetch_json(site, extractor.path()).await {
            Ok(feed) => extractor.extract(feed, site),
            Err(e) => Err(e),
        };
        self.settle(field, extractor.path(), outcome)
    }

    /// Applies the field's failure policy to an extractor outcome.
    fn settle<T: Default>(
        &self,
        field: Field,
        path: &str,
        outcome: Result<T, ScraperError>,
    ) -> Result<T, ScraperError> {
        match outcome {
            Ok(value) => Ok(value),
            Err(error) => match self.policies.for_field(field) {
                FailurePolicy::BestEffort => {
                    tracing::warn!(
                        field = %field,
                        path,
                        error = %error,
                        "extractor failed; leaving field empty"
                    );
                    Ok(T::default())
                }
                FailurePolicy::Required => {
                    tracing::error!(
                        field = %field,
                        path,
                        error = %error,
                        "required extractor failed; aborting"
                    );
                    Err(error)
                }
            },
        }
    }
}

// Kept out of the async functions: the parsed tree is not `Send`.
fn parse_and_extract<E: MarkupExtractor>(
    extractor: &E,
    markup: &Markup,
    site: &SiteRef,
) -> E::Output {
    let document = markup.document();
    extractor.extract(&document, site)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(policies: FailurePolicies) -> InsightsFetcher {
        let client = StorefrontClient::new(5, "insights-test/0.1").expect("client");
        InsightsFetcher::new(client, policies)
    }

    fn failure() -> ScraperError {
        ScraperError::NotFound {
            url: "https://acme.test/pages/faq".to_string(),
        }
    }

    #[test]
    fn best_effort_failure_becomes_empty_value() {
        let fetcher = fetcher(FailurePolicies::default());
        let settled: Result<Vec<String>, _> = fetcher.settle(Field::Faqs, "/pages/faq", Err(failure()));
        assert_eq!(settled.unwrap(), Vec::<String>::new());
    }

    #[test]
    fn best_effort_failure_becomes_none() {
        let fetcher = fetcher(FailurePolicies::default());
        let settled: Result<Option<String>, _> =
            fetcher.settle(Field::About, "/pages/about", Err(failure()));
        assert!(settled.unwrap().is_none());
    }

    #[test]
    fn required_failure_propagates() {
        let fetcher = fetcher(FailurePolicies::default());
        let settled: Result<Vec<String>, _> =
            fetcher.settle(Field::SocialHandles, "/", Err(failure()));
        assert!(matches!(settled, Err(ScraperError::NotFound { .. })));
    }

    #[test]
    fn overridden_policy_is_honored() {
        let mut policies = FailurePolicies::default();
        policies.set(Field::SocialHandles, FailurePolicy::BestEffort);
        let fetcher = fetcher(policies);
        let settled: Result<Vec<String>, _> =
            fetcher.settle(Field::SocialHandles, "/", Err(failure()));
        assert!(settled.unwrap().is_empty());
    }

    #[test]
    fn success_passes_through_regardless_of_policy() {
        let fetcher = fetcher(FailurePolicies::default());
        let settled = fetcher.settle(Field::BrandName, "/", Ok(Some("Acme".to_string())));
        assert_eq!(settled.unwrap().as_deref(), Some("Acme"));
    }
}
