//! `search` and `details` command handlers.

use chrono::Utc;
use ethnica_core::{resolve_center, AppConfig, CenterSource, LngLat, LocationCache};
use ethnica_places::{Notice, NoticeLevel, SearchFilters, SearchOrchestrator, SearchOutcome};

pub(crate) const DEFAULT_CENTER_NOTICE: &str =
    "No location given or remembered; searching around the default location";

/// Pick the center and add a notice when the default had to be used.
pub(crate) fn choose_center(
    config: &AppConfig,
    explicit: Option<LngLat>,
) -> (LngLat, Option<Notice>) {
    let cache = LocationCache::new(&config.location_cache_path);
    let (center, source) = resolve_center(explicit, &cache, config.default_center, Utc::now());
    tracing::debug!(%center, ?source, "search center resolved");
    let notice = (source == CenterSource::Default).then(|| Notice::info(DEFAULT_CENTER_NOTICE));
    (center, notice)
}

fn print_notices(outcome: &SearchOutcome) {
    for notice in &outcome.notices {
        let label = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("{label}: {}", notice.message);
    }
}

/// Run one filtered search and print the outcome as JSON.
///
/// Notices go to stderr. The search itself never fails; only output errors
/// are returned.
///
/// # Errors
///
/// Returns an error if the providers cannot be built or the outcome cannot be
/// serialized.
pub(crate) async fn run_search(
    config: &AppConfig,
    explicit: Option<LngLat>,
    query: Option<&str>,
    radius_m: Option<u32>,
    filters: &SearchFilters,
) -> anyhow::Result<()> {
    let orchestrator = SearchOrchestrator::from_config(config)?;
    let (center, center_notice) = choose_center(config, explicit);

    let mut outcome = orchestrator
        .search_filtered(center, query, radius_m, filters)
        .await;
    if let Some(notice) = center_notice {
        outcome.push_notice(notice);
    }

    print_notices(&outcome);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Look up one business and print it as JSON.
///
/// # Errors
///
/// Returns an error if no business has this id.
pub(crate) async fn run_details(config: &AppConfig, id: &str) -> anyhow::Result<()> {
    let orchestrator = SearchOrchestrator::from_config(config)?;
    let business = orchestrator
        .get_details(id)
        .await
        .ok_or_else(|| anyhow::anyhow!("no business found with id {id}"))?;
    println!("{}", serde_json::to_string_pretty(&business)?);
    Ok(())
}
