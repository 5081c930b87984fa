mod insights;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use insights_scraper::InsightsFetcher;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<InsightsFetcher>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "site_unreachable" => StatusCode::UNAUTHORIZED,
            "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/insights", get(insights::fetch_insights))
        .route("/fetch-insights", get(insights::fetch_insights))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use insights_core::FailurePolicies;
    use insights_scraper::{ScraperError, StorefrontClient};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app() -> Router {
        let client = StorefrontClient::new(5, "insights-test/0.1").expect("client");
        build_app(AppState {
            fetcher: Arc::new(InsightsFetcher::new(client, FailurePolicies::default())),
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn api_error_site_unreachable_maps_to_unauthorized() {
        let response =
            ApiError::new("req-1", "site_unreachable", "Website not found or inaccessible")
                .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_internal_error_maps_to_server_error() {
        let response = ApiError::new("req-1", "internal_error", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_unrecognized_code_maps_to_server_error() {
        let response = ApiError::new("req-1", "not_found", "missing").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn deserialize_failure_maps_to_internal_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ScraperError::Deserialize {
            context: "product feed".to_string(),
            source,
        };
        let api_error = insights::map_scraper_error("req-1".to_string(), "acme.test", &err);
        assert_eq!(api_error.error.code, "internal_error");
        assert!(api_error.error.message.starts_with("Internal error: "));
    }

    #[test]
    fn status_failure_maps_to_site_unreachable() {
        let err = ScraperError::UnexpectedStatus {
            status: 503,
            url: "https://acme.test/".to_string(),
        };
        let api_error = insights::map_scraper_error("req-1".to_string(), "acme.test", &err);
        assert_eq!(api_error.error.code, "site_unreachable");
        assert_eq!(api_error.error.message, "Website not found or inaccessible");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, json) = get_json(test_app(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn fetch_insights_requires_website_url() {
        let (status, json) = get_json(test_app(), "/fetch-insights").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn fetch_insights_reports_unreachable_site() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let (status, json) = get_json(
            test_app(),
            &format!("/fetch-insights?website_url=http://127.0.0.1:{port}"),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "site_unreachable");
        assert_eq!(json["error"]["message"], "Website not found or inaccessible");
    }

    #[tokio::test]
    async fn fetch_insights_returns_flat_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Acme</title></head><body>\
                 <a href=\"https://instagram.com/acme\">IG</a></body></html>",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pages/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>hi@acme.test</p>"))
            .mount(&server)
            .await;

        let (status, json) = get_json(
            test_app(),
            &format!("/api/v1/insights?website_url={}", server.uri()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["brand_name"], "Acme");
        assert_eq!(json["products"], serde_json::json!([]));
        assert!(json["privacy_policy"].is_null());
        assert_eq!(json["social_handles"], serde_json::json!(["https://instagram.com/acme"]));
        assert_eq!(json["contact_details"], serde_json::json!(["hi@acme.test"]));
        assert!(json.get("meta").is_none(), "record is returned unwrapped");
    }
}
