//! The seam every live place backend implements.

use ethnica_core::{Business, LngLat};
use futures::future::BoxFuture;

use crate::error::ProviderError;

/// Default search radius in meters when the caller does not give one.
pub const DEFAULT_RADIUS_M: u32 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub center: LngLat,
    /// Free-text keyword. Blank strings are treated as absent.
    pub query: Option<String>,
    pub radius_m: u32,
}

impl NearbyQuery {
    #[must_use]
    pub fn new(center: LngLat) -> Self {
        Self {
            center,
            query: None,
            radius_m: DEFAULT_RADIUS_M,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// The keyword, if any, without surrounding whitespace.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// A live source of businesses.
///
/// Implementations must not retry; the orchestrator falls through to the next
/// provider instead.
pub trait PlaceProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn search_nearby<'a>(
        &'a self,
        query: &'a NearbyQuery,
    ) -> BoxFuture<'a, Result<Vec<Business>, ProviderError>>;

    /// Fetch one business by this provider's id. `Ok(None)` means the id is
    /// not known to this provider.
    fn get_details<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Business>, ProviderError>>;
}
