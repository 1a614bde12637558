use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use ethnica_core::{Business, LngLat};
use ethnica_places::{Notice, SearchFilters, SearchOutcome};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Upper bound on `radius`; wider requests are clamped.
const MAX_RADIUS_M: u32 = 50_000;

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub lng: Option<f64>,
    pub lat: Option<f64>,
    pub query: Option<String>,
    /// Meters.
    pub radius: Option<u32>,
    /// Comma-separated attribute tags; every one must be present.
    pub attributes: Option<String>,
    pub category: Option<String>,
}

fn resolve_center(
    query: &SearchQuery,
    default: LngLat,
    req_id: &str,
) -> Result<(LngLat, Option<Notice>), ApiError> {
    match (query.lng, query.lat) {
        (Some(lng), Some(lat)) => {
            let center = LngLat::new(lng, lat);
            if center.is_valid() {
                Ok((center, None))
            } else {
                Err(ApiError::new(
                    req_id,
                    "validation_error",
                    format!("coordinate out of range: {center}"),
                ))
            }
        }
        (None, None) => Ok((
            default,
            Some(Notice::info(
                "No location given; searching around the default location",
            )),
        )),
        _ => Err(ApiError::new(
            req_id,
            "validation_error",
            "lng and lat must be given together",
        )),
    }
}

pub(super) async fn search_businesses(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchOutcome>>, ApiError> {
    let (center, default_notice) = resolve_center(&query, state.config.default_center, &req_id.0)?;
    let radius = query.radius.map(|r| r.clamp(1, MAX_RADIUS_M));
    let filters = SearchFilters::new()
        .with_attribute_list(query.attributes.as_deref())
        .with_category(query.category.as_deref());

    let mut outcome = state
        .orchestrator
        .search_filtered(center, query.query.as_deref(), radius, &filters)
        .await;
    if let Some(notice) = default_notice {
        outcome.push_notice(notice);
    }

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_business(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Business>>, ApiError> {
    match state.orchestrator.get_details(&id).await {
        Some(business) => Ok(Json(ApiResponse {
            data: business,
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("business {id} not found"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::super::test_support::{app, get_json};

    #[tokio::test]
    async fn search_with_coordinates_returns_mock_fallback() {
        let (status, json) = get_json(
            app(None),
            "/api/v1/businesses/search?lng=-74.006&lat=40.7128",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["source"], "mock");
        let businesses = data["businesses"].as_array().expect("array");
        assert!(!businesses.is_empty());
        for b in businesses {
            assert!(b["distance"].is_number());
            assert_eq!(b["coordinates"].as_array().map(Vec::len), Some(2));
        }
        assert!(data["sequence"].is_u64());
    }

    #[tokio::test]
    async fn search_without_location_uses_default_and_says_so() {
        let (status, json) = get_json(app(None), "/api/v1/businesses/search?query=bakery").await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["center"], serde_json::json!([-74.006, 40.7128]));
        let businesses = data["businesses"].as_array().expect("array");
        assert!(!businesses.is_empty());
        assert!(businesses.iter().all(|b| b["category"] == "Bakery"));
        let notices = data["notices"].as_array().expect("array");
        assert!(notices
            .iter()
            .any(|n| n["message"].as_str().unwrap_or("").contains("default location")));
    }

    #[tokio::test]
    async fn half_a_coordinate_is_rejected() {
        let (status, json) = get_json(app(None), "/api/v1/businesses/search?lng=-74.006").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn out_of_range_coordinate_is_rejected() {
        let (status, _) = get_json(app(None), "/api/v1/businesses/search?lng=200&lat=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn mock_ids_from_search_resolve() {
        let (_, json) = get_json(
            app(None),
            "/api/v1/businesses/search?lng=-74.006&lat=40.7128",
        )
        .await;
        let id = json["data"]["businesses"][0]["id"]
            .as_str()
            .expect("id")
            .to_string();

        let encoded: String = id
            .chars()
            .map(|c| match c {
                ':' => "%3A".to_string(),
                ',' => "%2C".to_string(),
                other => other.to_string(),
            })
            .collect();
        let (status, detail) = get_json(app(None), &format!("/api/v1/businesses/{encoded}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["data"]["id"], id.as_str());
    }

    fn encode_query_value(value: &str) -> String {
        value
            .bytes()
            .map(|b| {
                if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
                    char::from(b).to_string()
                } else {
                    format!("%{b:02X}")
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn attribute_and_category_filters_narrow_results() {
        let base = "/api/v1/businesses/search?lng=-74.006&lat=40.7128";
        let (_, json) = get_json(app(None), base).await;
        let first = &json["data"]["businesses"][0];
        let category = first["category"].as_str().expect("category").to_string();
        let attribute = first["attributes"][0]
            .as_str()
            .expect("attribute")
            .to_string();

        let uri = format!(
            "{base}&category={}&attributes={}",
            encode_query_value(&category.to_uppercase()),
            encode_query_value(&attribute.to_lowercase())
        );
        let (status, json) = get_json(app(None), &uri).await;
        assert_eq!(status, StatusCode::OK);
        let businesses = json["data"]["businesses"].as_array().expect("array");
        assert!(!businesses.is_empty());
        for b in businesses {
            assert_eq!(b["category"], category.as_str());
            let tags = b["attributes"].as_array().expect("attributes");
            assert!(tags.iter().any(|t| t == attribute.as_str()), "{b}");
        }
    }

    #[tokio::test]
    async fn filters_matching_nothing_return_empty_with_notice() {
        let (status, json) = get_json(
            app(None),
            "/api/v1/businesses/search?lng=-74.006&lat=40.7128&attributes=Not%20A%20Real%20Tag",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["businesses"], serde_json::json!([]));
        let notices = json["data"]["notices"].as_array().expect("array");
        assert!(notices
            .iter()
            .any(|n| n["message"].as_str().unwrap_or("").contains("selected filters")));
    }

    #[tokio::test]
    async fn unknown_business_is_404() {
        let (status, json) = get_json(app(None), "/api/v1/businesses/no-such-place").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
    }
}
