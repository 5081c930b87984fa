use axum::{
    extract::{Query, State},
    Extension, Json,
};
use insights_core::BrandContext;
use insights_scraper::ScraperError;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct InsightsQuery {
    pub website_url: Option<String>,
}

/// Returns the brand insights record for `website_url` as a flat JSON object.
pub(super) async fn fetch_insights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<BrandContext>, ApiError> {
    let Some(website_url) = query
        .website_url
        .filter(|url| !url.trim().is_empty())
    else {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "website_url query parameter is required",
        ));
    };

    state
        .fetcher
        .fetch(&website_url)
        .await
        .map(Json)
        .map_err(|e| map_scraper_error(req_id.0, &website_url, &e))
}

pub(super) fn map_scraper_error(
    request_id: String,
    website_url: &str,
    error: &ScraperError,
) -> ApiError {
    if error.is_unreachable() {
        tracing::warn!(website_url, error = %error, "site unreachable");
        return ApiError::new(
            request_id,
            "site_unreachable",
            "Website not found or inaccessible",
        );
    }

    if let ScraperError::InvalidSiteUrl { .. } = error {
        return ApiError::new(request_id, "validation_error", error.to_string());
    }

    tracing::error!(website_url, error = %error, "insights fetch failed");
    ApiError::new(
        request_id,
        "internal_error",
        format!("Internal error: {error}"),
    )
}
