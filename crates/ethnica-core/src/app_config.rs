use std::net::SocketAddr;
use std::path::PathBuf;

use crate::geo::LngLat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub provider_timeout_secs: u64,
    pub user_agent: String,
    /// Base URL of the same-origin places proxy the Google client talks to.
    pub places_proxy_url: String,
    pub search_radius_meters: u32,
    pub mock_count: usize,
    pub mock_seed: u64,
    pub default_center: LngLat,
    pub location_cache_path: PathBuf,
    /// Server-only secret. Never sent to a client.
    pub google_places_api_key: Option<String>,
    pub mapbox_token: Option<String>,
    pub google_maps_api_key: Option<String>,
    /// Public key, used for photo URLs and to gate the Google provider.
    pub google_places_public_key: Option<String>,
    pub privy_app_id: Option<String>,
}

/// Which features are live, derived from which keys are configured.
///
/// A missing key turns a feature off; it never fails startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct FeatureFlags {
    pub map_enabled: bool,
    pub auth_enabled: bool,
    pub mapbox_search_enabled: bool,
    pub google_places_enabled: bool,
    pub places_proxy_enabled: bool,
}

impl AppConfig {
    #[must_use]
    pub fn features(&self) -> FeatureFlags {
        let mapbox = self.mapbox_token.is_some();
        FeatureFlags {
            map_enabled: mapbox || self.google_maps_api_key.is_some(),
            auth_enabled: self.privy_app_id.is_some(),
            mapbox_search_enabled: mapbox,
            google_places_enabled: self.google_places_public_key.is_some(),
            places_proxy_enabled: self.google_places_api_key.is_some(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("places_proxy_url", &self.places_proxy_url)
            .field("search_radius_meters", &self.search_radius_meters)
            .field("mock_count", &self.mock_count)
            .field("mock_seed", &self.mock_seed)
            .field("default_center", &self.default_center)
            .field("location_cache_path", &self.location_cache_path)
            .field("google_places_api_key", &redact(&self.google_places_api_key))
            .field("mapbox_token", &redact(&self.mapbox_token))
            .field("google_maps_api_key", &redact(&self.google_maps_api_key))
            .field(
                "google_places_public_key",
                &redact(&self.google_places_public_key),
            )
            .field("privy_app_id", &self.privy_app_id)
            .finish()
    }
}
