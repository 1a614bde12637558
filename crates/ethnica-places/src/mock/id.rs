//! Self-describing mock ids.
//!
//! A mock id carries everything needed to regenerate its record, so details
//! lookups need no stored state.

use std::fmt;

use ethnica_core::LngLat;

pub const NEARBY_PREFIX: &str = "mock:";
pub const QUERY_PREFIX: &str = "mockq:";

#[derive(Debug, Clone, PartialEq)]
pub enum MockId {
    /// `mock:{lng},{lat}:{radius_m}:{count}:{index}`
    Nearby {
        center: LngLat,
        radius_m: u32,
        count: usize,
        index: usize,
    },
    /// `mockq:{lng},{lat}:{index}:{term}`
    Query {
        center: LngLat,
        index: usize,
        term: String,
    },
}

impl MockId {
    /// `true` if `id` uses a mock prefix, whether or not it parses.
    #[must_use]
    pub fn is_mock(id: &str) -> bool {
        id.starts_with(NEARBY_PREFIX) || id.starts_with(QUERY_PREFIX)
    }

    /// `None` for anything malformed.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        if let Some(rest) = id.strip_prefix(QUERY_PREFIX) {
            let mut parts = rest.splitn(3, ':');
            let center = parts.next()?.parse::<LngLat>().ok()?;
            let index = parts.next()?.parse().ok()?;
            let term = parts.next()?.to_string();
            if term.trim().is_empty() {
                return None;
            }
            return Some(Self::Query {
                center,
                index,
                term,
            });
        }

        let rest = id.strip_prefix(NEARBY_PREFIX)?;
        let mut parts = rest.split(':');
        let center = parts.next()?.parse::<LngLat>().ok()?;
        let radius_m = parts.next()?.parse().ok()?;
        let count = parts.next()?.parse().ok()?;
        let index = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::Nearby {
            center,
            radius_m,
            count,
            index,
        })
    }
}

impl fmt::Display for MockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearby {
                center,
                radius_m,
                count,
                index,
            } => write!(f, "{NEARBY_PREFIX}{center}:{radius_m}:{count}:{index}"),
            Self::Query {
                center,
                index,
                term,
            } => write!(f, "{QUERY_PREFIX}{center}:{index}:{term}"),
        }
    }
}
