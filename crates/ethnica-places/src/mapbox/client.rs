//! HTTP client for the Mapbox geocoding API.

use ethnica_core::Business;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, Url};

use super::normalize::{normalize_details, normalize_feature, ID_PREFIX};
use super::types::FeatureCollection;
use super::encode_component;
use crate::attributes::Seeder;
use crate::error::ProviderError;
use crate::http::{self, HttpOptions};
use crate::provider::{NearbyQuery, PlaceProvider};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/";
const PROVIDER: &str = "mapbox";
const SEARCH_LIMIT: u32 = 10;
const MAX_PROXIMITY_RADIUS_KM: f64 = 50.0;
const TOKEN_PARAM: &str = "access_token";

/// Client for Mapbox geocoding.
///
/// Use [`MapboxClient::new`] for production or [`MapboxClient::with_base_url`]
/// to point at a mock server in tests. A client without a token is valid;
/// every call then returns [`ProviderError::NotConfigured`].
pub struct MapboxClient {
    client: Client,
    token: Option<String>,
    base_url: Url,
    seeder: Seeder,
}

impl MapboxClient {
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: Option<&str>,
        options: &HttpOptions,
        seeder: Seeder,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(token, options, seeder, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the client cannot be built, or
    /// [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        token: Option<&str>,
        options: &HttpOptions,
        seeder: Seeder,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http::build_client(options)?,
            token: token.map(str::to_owned),
            base_url: http::parse_base_url(base_url)?,
            seeder,
        })
    }

    fn token(&self) -> Result<&str, ProviderError> {
        self.token
            .as_deref()
            .ok_or(ProviderError::NotConfigured { provider: PROVIDER })
    }

    /// Build the search URL. With no keyword the center itself is the term,
    /// which turns the request into a reverse lookup of nearby POIs.
    pub(crate) fn search_url(&self, query: &NearbyQuery, token: &str) -> Result<Url, ProviderError> {
        let center = query.center;
        let (term, types) = match query.term() {
            Some(term) => (encode_component(term), "poi,address,place"),
            None => (format!("{},{}", center.lng, center.lat), "poi"),
        };
        let mut url = http::join(
            &self.base_url,
            &format!("geocoding/v5/mapbox.places/{term}.json"),
        )?;
        let radius_km = (f64::from(query.radius_m) / 1000.0).min(MAX_PROXIMITY_RADIUS_KM);
        url.query_pairs_mut()
            .append_pair("proximity", &format!("{},{}", center.lng, center.lat))
            .append_pair(TOKEN_PARAM, token)
            .append_pair("limit", &SEARCH_LIMIT.to_string())
            .append_pair("types", types)
            .append_pair("proximity_radius", &radius_km.to_string());
        Ok(url)
    }

    /// Search features near `query.center`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::NotConfigured`] without a token.
    /// - [`ProviderError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ProviderError::Http`] on network failure or timeout.
    /// - [`ProviderError::Deserialize`] if the body is not a feature collection.
    pub async fn search(&self, query: &NearbyQuery) -> Result<Vec<Business>, ProviderError> {
        let token = self.token()?;
        let url = self.search_url(query, token)?;
        let body: FeatureCollection =
            http::get_json(&self.client, url, TOKEN_PARAM, "mapbox search").await?;

        let total = body.features.len();
        let businesses: Vec<Business> = body
            .features
            .iter()
            .filter_map(|f| normalize_feature(f, Some(query.center), &self.seeder))
            .collect();
        tracing::debug!(
            features = total,
            kept = businesses.len(),
            "mapbox search normalized"
        );
        Ok(businesses)
    }

    /// Look up one feature by its `mapbox-` id. Ids from other providers
    /// return `Ok(None)` without a request.
    ///
    /// # Errors
    ///
    /// Same as [`MapboxClient::search`].
    pub async fn details(&self, id: &str) -> Result<Option<Business>, ProviderError> {
        let Some(raw) = id.strip_prefix(ID_PREFIX).filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };
        let token = self.token()?;
        let mut url = http::join(
            &self.base_url,
            &format!("geocoding/v5/mapbox.places/{}.json", encode_component(raw)),
        )?;
        url.query_pairs_mut().append_pair(TOKEN_PARAM, token);

        let body: FeatureCollection =
            http::get_json(&self.client, url, TOKEN_PARAM, "mapbox details").await?;
        let Some(feature) = body.features.first() else {
            tracing::debug!(id, "mapbox details returned no features");
            return Ok(None);
        };
        Ok(normalize_details(
            feature,
            &self.seeder,
            chrono::Utc::now().timestamp(),
        ))
    }
}

impl PlaceProvider for MapboxClient {
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

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
