use crate::app_config::{AppConfig, Environment};
use crate::geo::LngLat;
use crate::ConfigError;

const MIN_MOCK_COUNT: usize = 5;
const MAX_MOCK_COUNT: usize = 25;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Nothing is required: absent provider keys switch features off instead of
/// failing. Only malformed values are errors.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `KEY=` in a .env file disables the feature.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("ETHNICA_ENV", "development"))?;
    let bind_addr = parse_addr("ETHNICA_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ETHNICA_LOG_LEVEL", "info");

    let provider_timeout_secs = parse_u64("ETHNICA_PROVIDER_TIMEOUT_SECS", "10")?;
    if provider_timeout_secs == 0 {
        return Err(invalid(
            "ETHNICA_PROVIDER_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let user_agent = or_default("ETHNICA_USER_AGENT", "ethnica/0.1 (business-discovery)");
    let places_proxy_url = or_default("ETHNICA_PLACES_PROXY_URL", "http://127.0.0.1:3000");

    let search_radius_meters = parse_u32("ETHNICA_SEARCH_RADIUS_METERS", "5000")?;
    let mock_count =
        parse_usize("ETHNICA_MOCK_COUNT", "25")?.clamp(MIN_MOCK_COUNT, MAX_MOCK_COUNT);
    let mock_seed = parse_u64("ETHNICA_MOCK_SEED", "0")?;

    let default_center = or_default("ETHNICA_DEFAULT_CENTER", "-74.006,40.7128")
        .parse::<LngLat>()
        .map_err(|reason| invalid("ETHNICA_DEFAULT_CENTER", reason))?;
    let location_cache_path = PathBuf::from(or_default(
        "ETHNICA_LOCATION_CACHE_PATH",
        "./.ethnica/location.json",
    ));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider_timeout_secs,
        user_agent,
        places_proxy_url,
        search_radius_meters,
        mock_count,
        mock_seed,
        default_center,
        location_cache_path,
        google_places_api_key: optional("GOOGLE_PLACES_API_KEY"),
        mapbox_token: optional("NEXT_PUBLIC_MAPBOX_TOKEN"),
        google_maps_api_key: optional("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY"),
        google_places_public_key: optional("NEXT_PUBLIC_GOOGLE_PLACES_API_KEY"),
        privy_app_id: optional("NEXT_PUBLIC_PRIVY_APP_ID"),
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ETHNICA_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
