//! Candidate selection and staging shared by the generation tiers.

use crate::{
    geo::DistanceBand,
    models::StagedTarget,
    places::CandidatePlace,
    settings::WaitSchedule,
};

/// Keeps candidates inside `band`, preserving order, and truncates to `max`.
pub fn select_within(
    mut candidates: Vec<CandidatePlace>,
    band: DistanceBand,
    max: usize,
) -> Vec<CandidatePlace> {
    candidates.retain(|c| band.contains(c.distance_m));
    candidates.truncate(max);
    candidates
}

/// Turns selected candidates into staged targets with progressive wait times.
pub fn stage_targets(candidates: &[CandidatePlace], wait: WaitSchedule) -> Vec<StagedTarget> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, c)| StagedTarget {
            name: c.name.clone(),
            coordinate: c.coordinate,
            wait_time_seconds: wait.wait_for(index),
        })
        .collect()
}
