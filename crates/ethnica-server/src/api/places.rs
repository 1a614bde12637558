//! Same-origin proxy for Google Places.
//!
//! Every answer is HTTP 200; success and failure are told apart by the
//! envelope's `status`. The secret key never leaves this module.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use ethnica_core::LngLat;
use ethnica_places::google::{
    DetailsEnvelope, NearbyEnvelope, NearbyParams, PlacesStatus, UpstreamReply,
};
use ethnica_places::{ProviderError, DEFAULT_RADIUS_M};
use serde::Deserialize;

use super::AppState;

const KEY_MISSING: &str = "Google Places API key is not configured";

/// Query strings are taken raw so that bad values become `PARAMS_MISSING`
/// envelopes instead of extractor rejections.
#[derive(Debug, Deserialize)]
pub(super) struct NearbyQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DetailsQuery {
    pub place_id: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn nearby_failure(status: PlacesStatus, error: impl Into<String>, message: Option<String>) -> Response {
    nearby_envelope(Failure {
        status,
        error: error.into(),
        error_message: None,
        message,
    })
}

fn nearby_envelope(failure: Failure) -> Response {
    Json(NearbyEnvelope {
        status: failure.status,
        results: Vec::new(),
        error: Some(failure.error),
        error_message: failure.error_message,
        message: failure.message,
    })
    .into_response()
}

fn details_failure(status: PlacesStatus, error: impl Into<String>, message: Option<String>) -> Response {
    details_envelope(Failure {
        status,
        error: error.into(),
        error_message: None,
        message,
    })
}

fn details_envelope(failure: Failure) -> Response {
    Json(DetailsEnvelope {
        status: failure.status,
        result: None,
        error: Some(failure.error),
        error_message: failure.error_message,
        message: failure.message,
    })
    .into_response()
}

struct Failure {
    status: PlacesStatus,
    error: String,
    error_message: Option<String>,
    message: Option<String>,
}

/// Outcome of a forwarded call, independent of the endpoint's envelope shape.
enum Forwarded {
    Pass(serde_json::Value),
    Fail(Failure),
}

fn classify(result: Result<UpstreamReply, ProviderError>, endpoint: &str) -> Forwarded {
    match result {
        Ok(UpstreamReply::Body(body)) => {
            let Some(status) = body
                .get("status")
                .and_then(serde_json::Value::as_str)
                .map(|s| PlacesStatus::from(s.to_string()))
            else {
                tracing::error!(endpoint, "Google Places response had no status");
                return Forwarded::Fail(Failure {
                    status: PlacesStatus::ServerError,
                    error: "Google Places response had no status".to_string(),
                    error_message: None,
                    message: None,
                });
            };
            tracing::info!(endpoint, status = %status, "Google Places answered");
            if status.is_answer() {
                return Forwarded::Pass(body);
            }
            let error_message = body
                .get("error_message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned);
            let error = error_message
                .clone()
                .unwrap_or_else(|| "Google Places API error".to_string());
            tracing::warn!(endpoint, status = %status, error = %error, "Google Places returned an error status");
            Forwarded::Fail(Failure {
                status,
                error,
                error_message,
                message: None,
            })
        }
        Ok(UpstreamReply::Rejected { status, body }) => Forwarded::Fail(Failure {
            status: PlacesStatus::RequestDenied,
            error: format!("Google Places API responded with status: {status}"),
            error_message: None,
            message: Some(body),
        }),
        Err(e) => {
            tracing::error!(endpoint, error = %e, "Google Places request failed");
            Forwarded::Fail(Failure {
                status: PlacesStatus::ServerError,
                error: format!("Failed to fetch {endpoint}: {e}"),
                error_message: None,
                message: None,
            })
        }
    }
}

pub(super) async fn nearby(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Response {
    let Some(upstream) = state.upstream.as_deref() else {
        tracing::warn!("places nearby requested without a configured key");
        return nearby_failure(PlacesStatus::ApiKeyMissing, KEY_MISSING, None);
    };

    let lat = non_blank(query.lat.as_deref()).and_then(|v| v.parse::<f64>().ok());
    let lng = non_blank(query.lng.as_deref()).and_then(|v| v.parse::<f64>().ok());
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return nearby_failure(
            PlacesStatus::ParamsMissing,
            "Missing required parameters: lat and lng",
            None,
        );
    };
    if !LngLat::new(lng, lat).is_valid() {
        return nearby_failure(
            PlacesStatus::ParamsMissing,
            "lat and lng must be a valid coordinate",
            None,
        );
    }
    let radius_m = match non_blank(query.radius.as_deref()) {
        None => DEFAULT_RADIUS_M,
        Some(raw) => match raw.parse::<u32>() {
            Ok(radius) => radius,
            Err(_) => {
                return nearby_failure(
                    PlacesStatus::ParamsMissing,
                    "radius must be a whole number of meters",
                    None,
                )
            }
        },
    };
    let params = NearbyParams {
        lat,
        lng,
        radius_m,
        keyword: non_blank(query.keyword.as_deref()).map(str::to_owned),
    };
    tracing::debug!(?params, "places nearby");

    match classify(upstream.nearby(&params).await, "nearby places") {
        Forwarded::Pass(body) => Json(body).into_response(),
        Forwarded::Fail(failure) => nearby_envelope(failure),
    }
}

pub(super) async fn details(
    State(state): State<AppState>,
    Query(query): Query<DetailsQuery>,
) -> Response {
    let Some(upstream) = state.upstream.as_deref() else {
        tracing::warn!("places details requested without a configured key");
        return details_failure(PlacesStatus::ApiKeyMissing, KEY_MISSING, None);
    };
    let Some(place_id) = non_blank(query.place_id.as_deref()) else {
        return details_failure(
            PlacesStatus::ParamsMissing,
            "Missing required parameter: place_id",
            None,
        );
    };
    tracing::debug!(place_id, "places details");

    match classify(upstream.details(place_id).await, "place details") {
        Forwarded::Pass(body) => Json(body).into_response(),
        Forwarded::Fail(failure) => details_envelope(failure),
    }
}

#[cfg(test)]
#[path = "places_test.rs"]
mod tests;
