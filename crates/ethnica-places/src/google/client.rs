//! Google Places through the same-origin proxy.

use ethnica_core::Business;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, Url};

use super::normalize::normalize_place;
use super::types::{DetailsEnvelope, NearbyEnvelope, PlacesStatus};
use crate::attributes::Seeder;
use crate::error::ProviderError;
use crate::http::{self, HttpOptions};
use crate::mapbox::ID_PREFIX as MAPBOX_ID_PREFIX;
use crate::provider::{NearbyQuery, PlaceProvider};

const PROVIDER: &str = "google_places";

/// Client for the `/api/places/*` proxy.
///
/// Only the public key lives here; it gates the provider and signs photo
/// URLs. The secret key stays on the server.
pub struct GooglePlacesClient {
    client: Client,
    public_key: Option<String>,
    proxy_url: Url,
    seeder: Seeder,
}

impl GooglePlacesClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the client cannot be built, or
    /// [`ProviderError::InvalidBaseUrl`] if `proxy_url` does not parse.
    pub fn new(
        public_key: Option<&str>,
        proxy_url: &str,
        options: &HttpOptions,
        seeder: Seeder,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http::build_client(options)?,
            public_key: public_key.map(str::to_owned),
            proxy_url: http::parse_base_url(proxy_url)?,
            seeder,
        })
    }

    fn public_key(&self) -> Result<&str, ProviderError> {
        self.public_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured { provider: PROVIDER })
    }

    /// Nearby search.
    ///
    /// `REQUEST_DENIED`, `ZERO_RESULTS` and an empty `results` list are soft
    /// misses and return `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::NotConfigured`] without a public key.
    /// - [`ProviderError::Status`] for any other non-`OK` status.
    /// - [`ProviderError::UnexpectedStatus`], [`ProviderError::Http`] or
    ///   [`ProviderError::Deserialize`] when the proxy is unreachable or
    ///   answers with something else.
    pub async fn search(&self, query: &NearbyQuery) -> Result<Vec<Business>, ProviderError> {
        let public_key = self.public_key()?;
        let mut url = http::join(&self.proxy_url, "api/places/nearby")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("lat", &query.center.lat.to_string())
                .append_pair("lng", &query.center.lng.to_string())
                .append_pair("radius", &query.radius_m.to_string());
            if let Some(keyword) = query.term() {
                pairs.append_pair("keyword", keyword);
            }
        }

        let envelope: NearbyEnvelope =
            http::get_json(&self.client, url, "key", "places nearby").await?;
        match &envelope.status {
            PlacesStatus::Ok if !envelope.results.is_empty() => Ok(envelope
                .results
                .iter()
                .filter_map(|p| normalize_place(p, Some(query.center), public_key, &self.seeder))
                .collect()),
            PlacesStatus::Ok | PlacesStatus::ZeroResults | PlacesStatus::RequestDenied => {
                tracing::warn!(status = %envelope.status, reason = %envelope.reason(), "places nearby returned nothing usable");
                Ok(Vec::new())
            }
            status => Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.to_string(),
                message: envelope.reason(),
            }),
        }
    }

    /// # Errors
    ///
    /// Same classes as [`GooglePlacesClient::search`]. A `null` result, and
    /// `NOT_FOUND`/`INVALID_REQUEST`/`ZERO_RESULTS`, return `Ok(None)`.
    pub async fn details(&self, place_id: &str) -> Result<Option<Business>, ProviderError> {
        if place_id.is_empty() || place_id.starts_with(MAPBOX_ID_PREFIX) {
            return Ok(None);
        }
        let public_key = self.public_key()?;
        let mut url = http::join(&self.proxy_url, "api/places/details")?;
        url.query_pairs_mut().append_pair("place_id", place_id);

        let envelope: DetailsEnvelope =
            http::get_json(&self.client, url, "key", "places details").await?;
        match &envelope.status {
            PlacesStatus::Ok => Ok(envelope
                .result
                .as_ref()
                .and_then(|p| normalize_place(p, None, public_key, &self.seeder))),
            PlacesStatus::NotFound | PlacesStatus::InvalidRequest | PlacesStatus::ZeroResults => {
                Ok(None)
            }
            status => Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.to_string(),
                message: envelope.reason(),
            }),
        }
    }
}

impl PlaceProvider for GooglePlacesClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn search_nearby<'a>(
        &'a self,
        query: &'a NearbyQuery,
    ) -> BoxFuture<'a, Result<Vec<Business>, ProviderError>> {
        self.search(query).boxed()
    }

    fn get_details<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Business>, ProviderError>> {
        self.details(id).boxed()
    }
}
