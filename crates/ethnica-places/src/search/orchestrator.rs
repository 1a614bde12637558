use ethnica_core::{AppConfig, Business, LngLat};

use super::{Notice, ResultSource, SearchFilters, SearchOutcome, SequenceCounter};
use crate::attributes::Seeder;
use crate::error::ProviderError;
use crate::google::GooglePlacesClient;
use crate::http::HttpOptions;
use crate::mapbox::MapboxClient;
use crate::mock::{MockGenerator, MockId};
use crate::provider::{NearbyQuery, PlaceProvider, DEFAULT_RADIUS_M};

/// Runs a search against each provider in order, falling back to the mock
/// generator once the list is exhausted.
///
/// No failure is fatal to a search: unconfigured providers are skipped,
/// failing ones are logged and skipped, and the mock generator always answers.
pub struct SearchOrchestrator {
    providers: Vec<Box<dyn PlaceProvider>>,
    mock: MockGenerator,
    default_radius_m: u32,
    sequence: SequenceCounter,
}

impl SearchOrchestrator {
    #[must_use]
    pub fn new(providers: Vec<Box<dyn PlaceProvider>>, mock: MockGenerator) -> Self {
        Self {
            providers,
            mock,
            default_radius_m: DEFAULT_RADIUS_M,
            sequence: SequenceCounter::default(),
        }
    }

    #[must_use]
    pub fn with_default_radius(mut self, radius_m: u32) -> Self {
        self.default_radius_m = radius_m;
        self
    }

    /// Mapbox, then Google Places through the proxy, then mock data.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if a provider client cannot be constructed
    /// (bad proxy URL, TLS backend failure). Missing keys are not errors.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let options = HttpOptions::from_config(config);
        let seeder = Seeder::new(config.mock_seed);
        let providers: Vec<Box<dyn PlaceProvider>> = vec![
            Box::new(MapboxClient::new(
                config.mapbox_token.as_deref(),
                &options,
                seeder,
            )?),
            Box::new(GooglePlacesClient::new(
                config.google_places_public_key.as_deref(),
                &config.places_proxy_url,
                &options,
                seeder,
            )?),
        ];
        let mock = MockGenerator::new(config.mock_seed, config.mock_count);
        Ok(Self::new(providers, mock).with_default_radius(config.search_radius_meters))
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Search around `center` with no filters.
    ///
    /// The outcome is never empty for a valid center.
    pub async fn search(
        &self,
        center: LngLat,
        query: Option<&str>,
        radius_m: Option<u32>,
    ) -> SearchOutcome {
        self.search_filtered(center, query, radius_m, &SearchFilters::default())
            .await
    }

    /// Search around `center`, then narrow the served list with `filters`.
    ///
    /// Filters run on whichever source answered; they never cause a fallback.
    /// An empty filtered list carries a notice saying so.
    pub async fn search_filtered(
        &self,
        center: LngLat,
        query: Option<&str>,
        radius_m: Option<u32>,
        filters: &SearchFilters,
    ) -> SearchOutcome {
        let sequence = self.sequence.next();
        let request = NearbyQuery::new(center)
            .with_query(query)
            .with_radius(radius_m.unwrap_or(self.default_radius_m));

        if !center.is_valid() {
            tracing::warn!(%center, sequence, "search requested for an invalid coordinate");
            return SearchOutcome {
                center,
                businesses: Vec::new(),
                source: ResultSource::Mock,
                notices: vec![Notice::error("Location is not a valid coordinate")],
                sequence,
            };
        }

        let mut notices = Vec::new();
        let (served, source) = self.serve(&request, sequence, &mut notices).await;
        let served_count = served.len();
        let businesses = filters.apply(served);
        if !filters.is_empty() {
            tracing::debug!(
                before = served_count,
                after = businesses.len(),
                sequence,
                "filters applied"
            );
            if businesses.is_empty() {
                notices.push(Notice::info("No businesses match the selected filters"));
            }
        }

        SearchOutcome {
            center,
            businesses,
            source,
            notices,
            sequence,
        }
    }

    async fn serve(
        &self,
        request: &NearbyQuery,
        sequence: u64,
        notices: &mut Vec<Notice>,
    ) -> (Vec<Business>, ResultSource) {
        for provider in &self.providers {
            let name = provider.name();
            match provider.search_nearby(request).await {
                Ok(businesses) if !businesses.is_empty() => {
                    tracing::info!(
                        provider = name,
                        count = businesses.len(),
                        sequence,
                        "search served by provider"
                    );
                    return (businesses, ResultSource::Provider(name));
                }
                Ok(_) => {
                    tracing::info!(provider = name, sequence, "provider returned no results");
                }
                Err(e) if e.is_not_configured() => {
                    tracing::debug!(provider = name, "provider not configured; skipping");
                    notices.push(Notice::info(format!(
                        "{name} is not configured; skipping"
                    )));
                }
                Err(e) => {
                    tracing::warn!(provider = name, error = %e, sequence, "provider failed; falling back");
                    notices.push(Notice::warning(format!(
                        "{name} is unavailable; trying the next source"
                    )));
                }
            }
        }

        let businesses = match request.term() {
            Some(term) => self.mock.search(request.center, Some(term)),
            None => self.mock.near(
                request.center,
                f64::from(request.radius_m) / 1000.0,
                self.mock.count(),
            ),
        };
        tracing::info!(count = businesses.len(), sequence, "search served by mock data");
        notices.push(Notice::info("Showing sample businesses while live data is unavailable"));
        (businesses, ResultSource::Mock)
    }

    /// Look up one business by id. Provider errors count as "not found".
    pub async fn get_details(&self, id: &str) -> Option<Business> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        if MockId::is_mock(id) {
            return self.mock.details(id);
        }

        for provider in &self.providers {
            let name = provider.name();
            match provider.get_details(id).await {
                Ok(Some(business)) => return Some(business),
                Ok(None) => {}
                Err(e) if e.is_not_configured() => {
                    tracing::debug!(provider = name, "provider not configured; skipping details");
                }
                Err(e) => {
                    tracing::warn!(provider = name, id, error = %e, "details lookup failed");
                }
            }
        }
        tracing::info!(id, "business not found");
        None
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
