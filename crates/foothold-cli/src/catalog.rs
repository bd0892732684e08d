//! Offline place catalog backing `plan generate`.
//!
//! A catalog is a JSON file listing places:
//!
//! ```json
//! {
//!   "places": [
//!     { "name": "Corner Cafe", "category": "cafe", "street": "Main Street",
//!       "latitude": 48.2091, "longitude": 16.3738 }
//!   ]
//! }
//! ```
//!
//! A query matches a place by category or street (case-insensitive) or by a
//! substring of its name. The query `nearby` matches every place. Results
//! keep file order and are limited to the search region.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use foothold_core::{
    geo::Coordinate,
    places::{
        LocationProvider, PlaceHit, PlaceSearch, PlaceSearchError, ReverseGeocoder, SearchRegion,
    },
};
use log::debug;
use serde::Deserialize;

/// Query that matches every place in the catalog.
const MATCH_ALL_QUERY: &str = "nearby";

/// How far the nearest place may be for its street to count as the street
/// at a position.
const STREET_SNAP_RADIUS_M: f64 = 200.0;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPlace {
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl CatalogPlace {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    fn matches(&self, query: &str) -> bool {
        if query.eq_ignore_ascii_case(MATCH_ALL_QUERY) {
            return true;
        }

        let query = query.to_lowercase();
        let same = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase() == query)
        };

        same(&self.category)
            || same(&self.street)
            || self
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceCatalog {
    #[serde(default)]
    pub places: Vec<CatalogPlace>,
}

impl PlaceCatalog {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read place catalog {}", path.display()))?;
        let catalog: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid place catalog {}", path.display()))?;

        debug!("Loaded {} places from {}", catalog.places.len(), path.display());
        Ok(catalog)
    }
}

#[async_trait]
impl PlaceSearch for PlaceCatalog {
    async fn search(
        &self,
        query: &str,
        region: SearchRegion,
    ) -> std::result::Result<Vec<PlaceHit>, PlaceSearchError> {
        Ok(self
            .places
            .iter()
            .filter(|place| place.matches(query))
            .filter(|place| region.center.distance_to(&place.coordinate()) <= region.radius_m)
            .map(|place| PlaceHit {
                name: place.name.clone(),
                placemark_name: None,
                street: place.street.clone(),
                coordinate: place.coordinate(),
            })
            .collect())
    }
}

#[async_trait]
impl ReverseGeocoder for PlaceCatalog {
    async fn street_name(
        &self,
        coordinate: Coordinate,
    ) -> std::result::Result<Option<String>, PlaceSearchError> {
        let nearest = self
            .places
            .iter()
            .filter(|place| place.street.is_some())
            .map(|place| (coordinate.distance_to(&place.coordinate()), place))
            .filter(|(distance, _)| *distance <= STREET_SNAP_RADIUS_M)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        Ok(nearest.and_then(|(_, place)| place.street.clone()))
    }
}

/// Position source for a terminal session, which has no positioning
/// hardware to ask.
pub struct NoDeviceLocation;

#[async_trait]
impl LocationProvider for NoDeviceLocation {
    async fn current_position(&self) -> Option<Coordinate> {
        None
    }
}
