//! Google Places wire types, shared by the proxy and its client.

use serde::{Deserialize, Serialize};

/// `status` field of a Places response or proxy envelope.
///
/// Unknown upstream values are carried through verbatim in [`PlacesStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlacesStatus {
    Ok,
    ZeroResults,
    RequestDenied,
    InvalidRequest,
    OverQueryLimit,
    NotFound,
    UnknownError,
    /// Proxy-only: a required query parameter was missing or unparseable.
    ParamsMissing,
    /// Proxy-only: the server has no Places key.
    ApiKeyMissing,
    /// Proxy-only: transport or decode failure talking to Google.
    ServerError,
    Other(String),
}

impl PlacesStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::NotFound => "NOT_FOUND",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::ParamsMissing => "PARAMS_MISSING",
            Self::ApiKeyMissing => "API_KEY_MISSING",
            Self::ServerError => "SERVER_ERROR",
            Self::Other(s) => s,
        }
    }

    /// `OK` or `ZERO_RESULTS`: Google answered the question.
    #[must_use]
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Ok | Self::ZeroResults)
    }
}

impl From<String> for PlacesStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "NOT_FOUND" => Self::NotFound,
            "UNKNOWN_ERROR" => Self::UnknownError,
            "PARAMS_MISSING" => Self::ParamsMissing,
            "API_KEY_MISSING" => Self::ApiKeyMissing,
            "SERVER_ERROR" => Self::ServerError,
            _ => Self::Other(s),
        }
    }
}

impl From<PlacesStatus> for String {
    fn from(status: PlacesStatus) -> Self {
        match status {
            PlacesStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PlacesStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `/nearby` body: the upstream response on success, an error envelope otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyEnvelope {
    pub status: PlacesStatus,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `/details` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsEnvelope {
    pub status: PlacesStatus,
    #[serde(default)]
    pub result: Option<PlaceResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn first_reason(candidates: [Option<&str>; 3]) -> String {
    candidates
        .into_iter()
        .flatten()
        .next()
        .unwrap_or("no error message")
        .to_string()
}

impl NearbyEnvelope {
    /// Best human-readable reason: `error_message`, `error`, then `message`.
    #[must_use]
    pub fn reason(&self) -> String {
        first_reason([
            self.error_message.as_deref(),
            self.error.as_deref(),
            self.message.as_deref(),
        ])
    }
}

impl DetailsEnvelope {
    #[must_use]
    pub fn reason(&self) -> String {
        first_reason([
            self.error_message.as_deref(),
            self.error.as_deref(),
            self.message.as_deref(),
        ])
    }
}

/// One place from a nearby-search or details response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceResult {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
    #[serde(default)]
    pub editorial_summary: Option<EditorialSummary>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLngLiteral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRef {
    pub photo_reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceReview {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub text: String,
    /// Unix seconds.
    pub time: i64,
    #[serde(default)]
    pub relative_time_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorialSummary {
    #[serde(default)]
    pub overview: Option<String>,
}
