//! Server-side client for the Google Places web service.

use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::http::{self, redact_query, HttpOptions};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const KEY_PARAM: &str = "key";

/// Fields requested from the details endpoint.
pub const DETAILS_FIELDS: &str = "name,rating,formatted_phone_number,formatted_address,website,geometry,editorial_summary,opening_hours,price_level,reviews,user_ratings_total,photos,types,vicinity";

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyParams {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: u32,
    pub keyword: Option<String>,
}

/// What Google said, before the proxy decides how to wrap it.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// 2xx with a JSON body, untouched.
    Body(serde_json::Value),
    /// Non-2xx. `body` is the raw response text.
    Rejected { status: u16, body: String },
}

impl UpstreamReply {
    /// The `status` string of a JSON body, if there is one.
    #[must_use]
    pub fn body_status(&self) -> Option<&str> {
        match self {
            Self::Body(body) => body.get("status").and_then(serde_json::Value::as_str),
            Self::Rejected { .. } => None,
        }
    }
}

/// Holds the secret key. Never exposed to callers; logged URLs are redacted.
pub struct GooglePlacesUpstream {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GooglePlacesUpstream {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying client cannot be built.
    pub fn new(api_key: &str, options: &HttpOptions) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, options, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the client cannot be built, or
    /// [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        options: &HttpOptions,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http::build_client(options)?,
            api_key: api_key.to_owned(),
            base_url: http::parse_base_url(base_url)?,
        })
    }

    pub(crate) fn nearby_url(&self, params: &NearbyParams) -> Result<Url, ProviderError> {
        let mut url = http::join(&self.base_url, "nearbysearch/json")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("location", &format!("{},{}", params.lat, params.lng))
                .append_pair("radius", &params.radius_m.to_string());
            if let Some(keyword) = params.keyword.as_deref() {
                pairs.append_pair("keyword", keyword);
            }
            pairs.append_pair(KEY_PARAM, &self.api_key);
        }
        Ok(url)
    }

    pub(crate) fn details_url(&self, place_id: &str) -> Result<Url, ProviderError> {
        let mut url = http::join(&self.base_url, "details/json")?;
        url.query_pairs_mut()
            .append_pair("place_id", place_id)
            .append_pair("fields", DETAILS_FIELDS)
            .append_pair(KEY_PARAM, &self.api_key);
        Ok(url)
    }

    /// # Errors
    ///
    /// [`ProviderError::Http`] on transport failure or timeout,
    /// [`ProviderError::Deserialize`] if a 2xx body is not JSON.
    pub async fn nearby(&self, params: &NearbyParams) -> Result<UpstreamReply, ProviderError> {
        let url = self.nearby_url(params)?;
        self.fetch(url, "places nearbysearch").await
    }

    /// # Errors
    ///
    /// Same as [`GooglePlacesUpstream::nearby`].
    pub async fn details(&self, place_id: &str) -> Result<UpstreamReply, ProviderError> {
        let url = self.details_url(place_id)?;
        self.fetch(url, "places details").await
    }

    async fn fetch(&self, url: Url, context: &str) -> Result<UpstreamReply, ProviderError> {
        let logged = redact_query(&url, KEY_PARAM);
        tracing::info!(url = %logged, "calling Google Places");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::warn!(url = %logged, status = status.as_u16(), "Google Places rejected the request");
            return Ok(UpstreamReply::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| ProviderError::Deserialize {
                context: context.to_string(),
                source,
            })?;
        Ok(UpstreamReply::Body(body))
    }
}
