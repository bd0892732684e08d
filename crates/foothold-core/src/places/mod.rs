//! Place search collaborators and the candidate pipeline built on them.
//!
//! The traits in this module are the boundary to platform services (device
//! location, points-of-interest search, reverse geocoding). Implementations
//! live outside this crate; the CLI ships an offline catalog and the tests
//! use scripted fakes.
//!
//! ```text
//! PlaceSearch ──▶ CandidateLocator ──▶ CandidateAggregator ──▶ PlanGenerator
//!   (one query)     (band filter,        (concurrent fan-out,
//!                    display names)       dedup, distance sort)
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::geo::Coordinate;

pub mod aggregator;
pub mod locator;

pub use aggregator::CandidateAggregator;
pub use locator::{CandidateLocator, CandidatePlace, LocateRequest};

/// Circular area handed to the place search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRegion {
    pub center: Coordinate,
    pub radius_m: f64,
}

impl SearchRegion {
    pub fn new(center: Coordinate, radius_m: f64) -> Self {
        Self { center, radius_m }
    }
}

/// One raw result from a place search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceHit {
    /// Business or establishment name
    pub name: Option<String>,
    /// Generic placemark name (landmark, building, address label)
    pub placemark_name: Option<String>,
    pub street: Option<String>,
    pub coordinate: Coordinate,
}

impl PlaceHit {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            name: None,
            placemark_name: None,
            street: None,
            coordinate,
        }
    }

    pub fn named(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(coordinate)
        }
    }
}

/// Failure reported by a place search or geocoding backend.
#[derive(Error, Debug)]
pub enum PlaceSearchError {
    #[error("place search is unavailable: {0}")]
    Unavailable(String),
    #[error("place search failed: {0}")]
    Backend(String),
}

/// Device position source.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Best-effort current position; `None` when it cannot be determined.
    async fn current_position(&self) -> Option<Coordinate>;
}

/// Points-of-interest search.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Results in the backend's relevance order. May be empty.
    async fn search(
        &self,
        query: &str,
        region: SearchRegion,
    ) -> Result<Vec<PlaceHit>, PlaceSearchError>;
}

/// Coordinate to street-name lookup.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// Street at `coordinate`, `Ok(None)` when the position has no street.
    async fn street_name(&self, coordinate: Coordinate)
        -> Result<Option<String>, PlaceSearchError>;
}
