//! Single-query candidate lookup.

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{PlaceHit, PlaceSearch, SearchRegion};
use crate::geo::{Coordinate, DistanceBand};

/// Label used when a result carries no usable name at all.
pub const FALLBACK_PLACE_NAME: &str = "Location";

/// A search result that passed the distance band, ready for selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidatePlace {
    pub name: String,
    pub coordinate: Coordinate,
    /// Great-circle distance from the search origin, in meters
    pub distance_m: f64,
}

/// Parameters of one locator call.
#[derive(Debug, Clone)]
pub struct LocateRequest<'a> {
    pub origin: Coordinate,
    /// Category, free text, or street name passed to the search
    pub query: &'a str,
    pub search_radius_m: f64,
    pub band: DistanceBand,
    /// Only the first `raw_limit` results of the response are considered
    pub raw_limit: Option<usize>,
}

/// Runs one place search and turns the hits into candidates.
#[derive(Clone)]
pub struct CandidateLocator {
    search: Arc<dyn PlaceSearch>,
}

impl CandidateLocator {
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    /// Searches for `request.query` and keeps hits inside the band, in
    /// response order.
    ///
    /// A failing search yields an empty list; the error is logged and never
    /// reaches the caller.
    pub async fn locate(&self, request: &LocateRequest<'_>) -> Vec<CandidatePlace> {
        let region = SearchRegion::new(request.origin, request.search_radius_m);
        let hits = match self.search.search(request.query, region).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Search for '{}' failed, treating as empty: {e}", request.query);
                return Vec::new();
            }
        };

        let limit = request.raw_limit.unwrap_or(usize::MAX);
        let candidates: Vec<CandidatePlace> = hits
            .iter()
            .take(limit)
            .filter_map(|hit| {
                let distance_m = request.origin.distance_to(&hit.coordinate);
                request.band.contains(distance_m).then(|| CandidatePlace {
                    name: display_name(hit),
                    coordinate: hit.coordinate,
                    distance_m,
                })
            })
            .collect();

        debug!(
            "Query '{}': {} hits, {} within {}",
            request.query,
            hits.len(),
            candidates.len(),
            request.band
        );

        candidates
    }
}

/// Resolves the label shown for a hit: establishment name, then placemark
/// name, then street, then [`FALLBACK_PLACE_NAME`].
pub fn display_name(hit: &PlaceHit) -> String {
    [&hit.name, &hit.placemark_name, &hit.street]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_PLACE_NAME)
        .to_string()
}
