mod businesses;
mod places;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use ethnica_core::{AppConfig, FeatureFlags};
use ethnica_places::{GooglePlacesUpstream, SearchOrchestrator};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<SearchOrchestrator>,
    /// `None` when `GOOGLE_PLACES_API_KEY` is unset.
    pub upstream: Option<Arc<GooglePlacesUpstream>>,
    pub config: Arc<AppConfig>,
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

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    providers: Vec<&'static str>,
    features: FeatureFlags,
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
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn guarded_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/businesses/search",
            get(businesses::search_businesses),
        )
        .route("/api/v1/businesses/{id}", get(businesses::get_business))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

/// The proxy has its own window: a search served through Google calls back
/// into it, and that call must not use up a search slot.
fn proxy_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/places/nearby", get(places::nearby))
        .route("/api/places/details", get(places::details))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

/// Limits for the search API and for the places proxy.
#[derive(Debug, Clone)]
pub struct RateLimits {
    pub api: RateLimitState,
    pub proxy: RateLimitState,
}

pub fn build_app(state: AppState, limits: RateLimits) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(guarded_router(limits.api))
        .merge(proxy_router(limits.proxy))
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
            providers: state.orchestrator.provider_names(),
            features: state.config.features(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub fn default_rate_limits() -> RateLimits {
    RateLimits {
        api: RateLimitState::new(120, Duration::from_secs(60)),
        proxy: RateLimitState::new(120, Duration::from_secs(60)),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{app, app_with_limits, get_json};
    use super::*;

    #[test]
    fn api_error_codes_map_to_status() {
        let cases = [
            ("not_found", StatusCode::NOT_FOUND),
            ("validation_error", StatusCode::BAD_REQUEST),
            ("rate_limited", StatusCode::TOO_MANY_REQUESTS),
            ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, expected) in cases {
            let response = ApiError::new("req-1", code, "message").into_response();
            assert_eq!(response.status(), expected, "{code}");
        }
    }

    #[tokio::test]
    async fn health_reports_features() {
        let (status, json) = get_json(app(None), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["features"]["map_enabled"], false);
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn proxy_calls_do_not_use_search_slots() {
        let limits = RateLimits {
            api: RateLimitState::new(1, Duration::from_secs(60)),
            proxy: RateLimitState::new(1, Duration::from_secs(60)),
        };
        let search = "/api/v1/businesses/search?lng=-74.006&lat=40.7128";

        let (status, _) =
            get_json(app_with_limits(None, limits.clone()), "/api/places/nearby?lat=1&lng=2").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_json(app_with_limits(None, limits.clone()), search).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = get_json(app_with_limits(None, limits.clone()), search).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(json["error"]["code"], "rate_limited");
        let (status, _) =
            get_json(app_with_limits(None, limits), "/api/places/details?place_id=x").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }
}
