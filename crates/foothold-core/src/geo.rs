//! Geographic primitives: WGS84 coordinates, great-circle distance and
//! inclusive distance bands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FootholdError, Result};

/// Mean Earth radius used for haversine distances, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(FootholdError::invalid_input("latitude")
                .with_reason(format!("{latitude} is outside [-90, 90]")));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(FootholdError::invalid_input("longitude")
                .with_reason(format!("{longitude} is outside [-180, 180]")));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let s1 = (d_lat / 2.0).sin();
        let s2 = (d_lon / 2.0).sin();
        let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }

    /// Exact textual key used to collapse duplicate search results.
    ///
    /// Two points only share a key when both components print identically.
    pub fn dedup_key(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Returns the point `meters` due north (negative: south) of this one.
    pub fn offset_north(&self, meters: f64) -> Self {
        let d_lat = (meters / EARTH_RADIUS_M).to_degrees();
        Self::new(self.latitude + d_lat, self.longitude)
    }

    /// Returns the point `meters` due east (negative: west) of this one.
    pub fn offset_east(&self, meters: f64) -> Self {
        let radius = EARTH_RADIUS_M * self.latitude.to_radians().cos();
        let d_lon = (meters / radius).to_degrees();
        Self::new(self.latitude, self.longitude + d_lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// An inclusive `[min_m, max_m]` distance range in meters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistanceBand {
    pub min_m: f64,
    pub max_m: f64,
}

impl DistanceBand {
    pub const fn new(min_m: f64, max_m: f64) -> Self {
        Self { min_m, max_m }
    }

    /// Whether `distance_m` lies inside the band, bounds included.
    pub fn contains(&self, distance_m: f64) -> bool {
        distance_m >= self.min_m && distance_m <= self.max_m
    }
}

impl fmt::Display for DistanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} m", self.min_m, self.max_m)
    }
}
