//! `location` command handlers.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use ethnica_core::{AppConfig, LocationCache};

use crate::coordinate;

/// Sub-commands available under `location`.
#[derive(Debug, Subcommand)]
pub enum LocationCommands {
    /// Print the remembered location and whether it is still fresh
    Show,
    /// Remember a location for later searches
    Set {
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },
    /// Forget the remembered location
    Clear,
}

pub(crate) fn run_location(config: &AppConfig, command: LocationCommands) -> anyhow::Result<()> {
    let cache = LocationCache::new(&config.location_cache_path);
    match command {
        LocationCommands::Show => show(&cache, Utc::now()),
        LocationCommands::Set { lng, lat } => {
            let location = coordinate(Some(lng), Some(lat))?
                .ok_or_else(|| anyhow::anyhow!("both --lng and --lat are required"))?;
            cache.store(location, Utc::now())?;
            println!("location set to {location}");
        }
        LocationCommands::Clear => {
            cache.clear()?;
            println!("location cleared");
        }
    }
    Ok(())
}

fn show(cache: &LocationCache, now: DateTime<Utc>) {
    let Some(entry) = cache.entry() else {
        println!("no location remembered ({})", cache.path().display());
        return;
    };
    let saved = DateTime::from_timestamp_millis(entry.timestamp_ms)
        .map_or_else(|| "unknown time".to_string(), |t| t.to_rfc3339());
    let state = if entry.is_fresh(now) { "fresh" } else { "expired" };
    println!("{} (saved {saved}, {state})", entry.location);
}
