use clap::{Parser, Subcommand};
use ethnica_core::LngLat;
use ethnica_places::SearchFilters;
use tracing_subscriber::EnvFilter;

mod location;
mod search;

use location::LocationCommands;

#[derive(Debug, Parser)]
#[command(name = "ethnica")]
#[command(about = "Find businesses near a location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for businesses around a location
    Search {
        /// Longitude of the search center
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Latitude of the search center
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Keyword or category (e.g., "halal", "bakery")
        #[arg(long)]
        query: Option<String>,
        /// Search radius in meters
        #[arg(long)]
        radius: Option<u32>,
        /// Required attribute tag (repeatable or comma-separated; all must match)
        #[arg(long = "attribute", value_delimiter = ',')]
        attributes: Vec<String>,
        /// Keep only this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one business by id
    Details {
        /// Business id as returned by `search`
        id: String,
    },
    /// Manage the remembered location
    Location {
        #[command(subcommand)]
        command: LocationCommands,
    },
}

/// Build a coordinate from a `--lng`/`--lat` pair, rejecting out-of-range values.
fn coordinate(lng: Option<f64>, lat: Option<f64>) -> anyhow::Result<Option<LngLat>> {
    match (lng, lat) {
        (Some(lng), Some(lat)) => {
            let location = LngLat::new(lng, lat);
            anyhow::ensure!(
                location.is_valid(),
                "{location} is not a valid coordinate (lng -180..180, lat -90..90)"
            );
            Ok(Some(location))
        }
        _ => Ok(None),
    }
}

/// `RUST_LOG` when set, otherwise the configured `ETHNICA_LOG_LEVEL`.
fn log_filter(log_level: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(Into::into)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ethnica_core::load_app_config_from_env()?;

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            lng,
            lat,
            query,
            radius,
            attributes,
            category,
        } => {
            let explicit = coordinate(lng, lat)?;
            let filters = SearchFilters::new()
                .with_attributes(&attributes)
                .with_category(category.as_deref());
            search::run_search(&config, explicit, query.as_deref(), radius, &filters).await?;
        }
        Commands::Details { id } => search::run_details(&config, &id).await?,
        Commands::Location { command } => location::run_location(&config, command)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
