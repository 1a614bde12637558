//! Place providers and the search orchestrator that chains them.

pub mod attributes;
pub mod error;
pub mod google;
pub mod http;
pub mod mapbox;
pub mod mock;
pub mod provider;
pub mod search;

pub use attributes::Seeder;
pub use error::ProviderError;
pub use google::{GooglePlacesClient, GooglePlacesUpstream, PlacesStatus};
pub use http::HttpOptions;
pub use mapbox::MapboxClient;
pub use mock::{MockGenerator, MockId};
pub use provider::{NearbyQuery, PlaceProvider, DEFAULT_RADIUS_M};
pub use search::{
    LatestResults, Notice, NoticeLevel, ResultSource, SearchFilters, SearchOrchestrator,
    SearchOutcome,
};
