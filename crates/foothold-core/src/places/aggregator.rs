//! Concurrent multi-category candidate search.

use std::collections::HashSet;

use futures::future::join_all;
use log::debug;

use super::{CandidateLocator, CandidatePlace, LocateRequest};
use crate::geo::{Coordinate, DistanceBand};

/// Fans a locator out over several categories and merges the results.
#[derive(Clone)]
pub struct CandidateAggregator {
    locator: CandidateLocator,
}

impl CandidateAggregator {
    pub fn new(locator: CandidateLocator) -> Self {
        Self { locator }
    }

    /// Searches every category concurrently and returns the merged,
    /// de-duplicated candidates sorted by ascending distance.
    ///
    /// All category searches finish before anything is merged, so the output
    /// does not depend on the order in which responses arrive.
    pub async fn gather(
        &self,
        origin: Coordinate,
        categories: &[String],
        search_radius_m: f64,
        band: DistanceBand,
    ) -> Vec<CandidatePlace> {
        let requests: Vec<LocateRequest<'_>> = categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(|query| LocateRequest {
                origin,
                query,
                search_radius_m,
                band,
                raw_limit: None,
            })
            .collect();

        let per_category = join_all(requests.iter().map(|r| self.locator.locate(r))).await;

        let raw_total: usize = per_category.iter().map(Vec::len).sum();
        let merged = merge_candidates(per_category);
        debug!(
            "Aggregated {} categories: {raw_total} candidates, {} after de-duplication",
            requests.len(),
            merged.len()
        );

        merged
    }
}

/// Flattens per-category results, drops repeated coordinates (first
/// occurrence wins) and sorts by distance.
///
/// Coordinates are compared by their exact `"lat,lon"` text, so points that
/// differ in any printed digit stay separate.
pub fn merge_candidates(per_category: Vec<Vec<CandidatePlace>>) -> Vec<CandidatePlace> {
    let mut seen = HashSet::new();
    let mut merged: Vec<CandidatePlace> = per_category
        .into_iter()
        .flatten()
        .filter(|c| seen.insert(c.coordinate.dedup_key()))
        .collect();

    merged.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    merged
}
