pub mod app_config;
pub mod business;
pub mod config;
pub mod geo;
pub mod location;

pub use app_config::{AppConfig, Environment, FeatureFlags};
pub use business::{Business, BusinessReview};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{haversine_km, round_km, wrap_lng, LngLat, EARTH_RADIUS_KM};
pub use location::{resolve_center, CachedLocation, CenterSource, LocationCache, LocationCacheError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
