//! Coordinates and great-circle distance.
//!
//! Everything that crosses a module boundary is `[longitude, latitude]`
//! (GeoJSON order). Only [`haversine_km`] takes latitude first, matching the
//! usual formula layout.

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point serialized as a two-element `[lng, lat]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        [p.lng, p.lat]
    }
}

impl std::fmt::Display for LngLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

impl std::str::FromStr for LngLat {
    type Err = String;

    /// Parses `"lng,lat"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lng, lat) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lng,lat\", got \"{s}\""))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude: {e}"))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude: {e}"))?;
        let point = Self::new(lng, lat);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(format!("coordinate out of range: {point}"))
        }
    }
}

impl LngLat {
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Finite and within `[-180, 180] x [-90, 90]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }

    #[must_use]
    pub fn distance_km(&self, other: &LngLat) -> f64 {
        haversine_km(self.lat, self.lng, other.lat, other.lng)
    }

    /// Rounded to 6 decimal places (~0.1 m), the precision used in synthetic ids.
    #[must_use]
    pub fn snapped(&self) -> Self {
        let snap = |v: f64| (v * 1e6).round() / 1e6;
        Self::new(snap(self.lng), snap(self.lat))
    }

    /// Point `distance_km` away along `bearing_rad` (0 = north, clockwise).
    ///
    /// Great-circle destination, so paths over a pole or across the
    /// antimeridian still land on a valid coordinate.
    #[must_use]
    pub fn offset_km(&self, bearing_rad: f64, distance_km: f64) -> Self {
        let delta = distance_km / EARTH_RADIUS_KM;
        let lat1 = self.lat.to_radians();
        let lng1 = self.lng.to_radians();

        let sin_lat2 = (lat1.sin() * delta.cos()
            + lat1.cos() * delta.sin() * bearing_rad.cos())
        .clamp(-1.0, 1.0);
        let lat2 = sin_lat2.asin();
        let lng2 = lng1
            + (bearing_rad.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * sin_lat2);

        Self::new(wrap_lng(lng2.to_degrees()), lat2.to_degrees().clamp(-90.0, 90.0))
    }
}

/// Great-circle distance in kilometres between two `(lat, lon)` pairs in degrees.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Longitude folded into `[-180, 180)`.
#[must_use]
pub fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// One decimal place, as shown next to a result.
#[must_use]
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 10.0).round() / 10.0
}
