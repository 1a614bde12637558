//! Last-known user location, persisted with a 24-hour expiry.
//!
//! The file holds one JSON object with two fixed keys, `userLocation`
//! (`[lng, lat]`) and `locationTimestamp` (Unix milliseconds). It is a cache:
//! anything unreadable is treated as absent.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::LngLat;

pub const LOCATION_KEY: &str = "userLocation";
pub const TIMESTAMP_KEY: &str = "locationTimestamp";

/// How long a stored location stays usable.
pub const LOCATION_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum LocationCacheError {
    #[error("location cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("location cache encode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedLocation {
    #[serde(rename = "userLocation")]
    pub location: LngLat,
    #[serde(rename = "locationTimestamp")]
    pub timestamp_ms: i64,
}

impl CachedLocation {
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let age_ms = now.timestamp_millis() - self.timestamp_ms;
        (0..Duration::hours(LOCATION_TTL_HOURS).num_milliseconds()).contains(&age_ms)
    }
}

#[derive(Debug, Clone)]
pub struct LocationCache {
    path: PathBuf,
}

impl LocationCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw entry regardless of age. `None` when missing or unreadable.
    #[must_use]
    pub fn entry(&self) -> Option<CachedLocation> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "location cache unreadable");
                return None;
            }
        };
        match serde_json::from_str::<CachedLocation>(&raw) {
            Ok(entry) if entry.location.is_valid() => Some(entry),
            Ok(entry) => {
                tracing::warn!(location = %entry.location, "location cache holds an invalid coordinate");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "location cache is corrupt");
                None
            }
        }
    }

    /// The stored location if it is younger than [`LOCATION_TTL_HOURS`].
    #[must_use]
    pub fn load(&self, now: DateTime<Utc>) -> Option<LngLat> {
        let entry = self.entry()?;
        if entry.is_fresh(now) {
            Some(entry.location)
        } else {
            tracing::debug!(path = %self.path.display(), "cached location expired");
            None
        }
    }

    /// # Errors
    ///
    /// Returns [`LocationCacheError::Io`] if the file or its parent directory
    /// cannot be written.
    pub fn store(&self, location: LngLat, now: DateTime<Utc>) -> Result<(), LocationCacheError> {
        let entry = CachedLocation {
            location,
            timestamp_ms: now.timestamp_millis(),
        };
        let body = serde_json::to_string_pretty(&entry)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| LocationCacheError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, body).map_err(|source| LocationCacheError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// # Errors
    ///
    /// Returns [`LocationCacheError::Io`] if an existing file cannot be removed.
    pub fn clear(&self) -> Result<(), LocationCacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LocationCacheError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Where a resolved search center came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterSource {
    Explicit,
    Cached,
    Default,
}

/// Pick the search center: explicit, then a fresh cached location, then the default.
///
/// An explicit location is written back to the cache. Cache write failures
/// are logged, not returned; the search can still run.
#[must_use]
pub fn resolve_center(
    explicit: Option<LngLat>,
    cache: &LocationCache,
    default: LngLat,
    now: DateTime<Utc>,
) -> (LngLat, CenterSource) {
    if let Some(location) = explicit {
        if let Err(e) = cache.store(location, now) {
            tracing::warn!(error = %e, "could not persist location");
        }
        return (location, CenterSource::Explicit);
    }
    if let Some(location) = cache.load(now) {
        return (location, CenterSource::Cached);
    }
    (default, CenterSource::Default)
}
