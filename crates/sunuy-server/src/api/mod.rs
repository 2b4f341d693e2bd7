mod artisans;
mod forms;
mod locations;

use std::sync::Arc;
use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sunuy_core::{AppConfig, DirectoryProvider, StaticDirectory};
use sunuy_directory::{SimulatedAuthenticator, SimulatedSubmitter};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{
    enforce_rate_limit, request_id, require_visitor, RateLimitState, RequestId, VisitorSessions,
};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<StaticDirectory>,
    pub submitter: SimulatedSubmitter,
    pub authenticator: SimulatedAuthenticator,
    pub visitors: VisitorSessions,
    pub page_size: usize,
}

impl AppState {
    #[must_use]
    pub fn from_config(directory: StaticDirectory, config: &AppConfig) -> Self {
        Self {
            directory: Arc::new(directory),
            submitter: SimulatedSubmitter::new(config.submit_delay()),
            authenticator: SimulatedAuthenticator::new(config.auth_delay()),
            visitors: VisitorSessions::default(),
            page_size: config.page_size,
        }
    }
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
    artisans: usize,
    regions: usize,
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
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "conflict" => StatusCode::CONFLICT,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Number of records to return: the page size by default, at least one,
/// never more than `total`.
pub(super) fn normalize_visible(visible: Option<usize>, page_size: usize, total: usize) -> usize {
    visible.unwrap_or(page_size).max(1).min(total)
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

fn directory_router(rate_limit: RateLimitState, visitors: VisitorSessions) -> Router<AppState> {
    Router::new()
        .route("/api/v1/professions", get(artisans::list_professions))
        .route("/api/v1/artisans", get(artisans::list_artisans))
        .route("/api/v1/artisans/{id}", get(artisans::get_artisan))
        .route(
            "/api/v1/artisans/{id}/market-proposals",
            post(forms::propose_market)
                .route_layer(axum::middleware::from_fn_with_state(visitors, require_visitor)),
        )
        .route("/api/v1/locations/regions", get(locations::list_regions))
        .route(
            "/api/v1/locations/regions/{region}/departments",
            get(locations::list_departments),
        )
        .route(
            "/api/v1/locations/regions/{region}/departments/{department}/communes",
            get(locations::list_communes),
        )
        .route("/api/v1/agreements", post(forms::submit_agreement))
        .route(
            "/api/v1/contest/applications",
            post(forms::submit_contest_application),
        )
        .route("/api/v1/auth/login", post(forms::login))
        .route(
            "/api/v1/auth/register/particulier",
            post(forms::register_particulier),
        )
        .route(
            "/api/v1/auth/register/administration",
            post(forms::register_administration),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));
    let visitors = state.visitors.clone();

    Router::new()
        .merge(public_routes)
        .merge(directory_router(rate_limit, visitors))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            artisans: state.directory.artisans().len(),
            regions: state.directory.locations().regions().len(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn rate_limit_state(config: &AppConfig) -> RateLimitState {
    RateLimitState::new(config.rate_limit_max_requests, config.rate_limit_window())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    pub(super) fn test_state() -> AppState {
        let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let directory = StaticDirectory::load(
            &config.join("artisans.yaml"),
            &config.join("locations.yaml"),
        )
        .expect("seed data");
        AppState {
            directory: Arc::new(directory),
            submitter: SimulatedSubmitter::new(Duration::ZERO),
            authenticator: SimulatedAuthenticator::new(Duration::ZERO),
            visitors: VisitorSessions::default(),
            page_size: 8,
        }
    }

    pub(super) fn test_app() -> Router {
        build_app(test_state(), RateLimitState::new(120, Duration::from_secs(60)))
    }

    pub(super) async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json parse"))
    }

    pub(super) async fn post_json(
        app: Router,
        uri: &str,
        payload: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        post_json_as(app, uri, None, payload).await
    }

    pub(super) async fn post_json_as(
        app: Router,
        uri: &str,
        token: Option<&str>,
        payload: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = app
            .oneshot(
                request
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json parse"))
    }

    #[test]
    fn normalize_visible_applies_defaults_and_bounds() {
        assert_eq!(normalize_visible(None, 8, 19), 8);
        assert_eq!(normalize_visible(Some(0), 8, 19), 1);
        assert_eq!(normalize_visible(Some(40), 8, 19), 19);
        assert_eq!(normalize_visible(None, 8, 3), 3);
        assert_eq!(normalize_visible(None, 8, 0), 0);
    }

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "boom", "unexpected").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_reports_seed_counts() {
        let (status, json) = get_json(test_app(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["artisans"], 19);
        assert_eq!(json["data"]["regions"], 14);
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.as_bytes()),
            Some(&b"req-abc"[..])
        );
    }

    #[tokio::test]
    async fn rate_limit_rejects_after_budget() {
        let app = build_app(
            test_state(),
            RateLimitState::new(1, Duration::from_secs(60)),
        );
        let (first, _) = get_json(app.clone(), "/api/v1/professions").await;
        let (second, json) = get_json(app, "/api/v1/professions").await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"]["code"], "rate_limited");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/workshops")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
