//! Retrospective progress statistics for a plan.
//!
//! A target counts as reached by a journey when any single point of the
//! journey's path trace lies within the reached radius of it. Visiting order
//! and dwell time are not checked.

use log::debug;

use crate::{
    error::{FootholdError, Result},
    models::{AttemptProgress, ExposureTarget, Journey, PathTrace, PlanProgress},
    settings::{GenerationSettings, DEFAULT_REACHED_RADIUS_M},
    store::PlanStore,
};

/// A journey together with its recorded trace, if it has one.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub journey: Journey,
    pub trace: Option<PathTrace>,
}

/// IDs of the targets the trace reaches, in the order given.
pub fn reached_targets(trace: &PathTrace, targets: &[ExposureTarget], radius_m: f64) -> Vec<u64> {
    targets
        .iter()
        .filter(|target| trace.passes_within(&target.coordinate, radius_m))
        .map(|target| target.id)
        .collect()
}

/// Computes progress for `plan_id` from its targets and attempts.
///
/// Deleted targets and journeys, and journeys linked to other plans, are
/// ignored. A journey without a trace counts as an attempt that reached
/// nothing. Attempts are reported newest first.
pub fn analyze(
    plan_id: u64,
    targets: &[ExposureTarget],
    attempts: Vec<Attempt>,
    reached_radius_m: f64,
) -> PlanProgress {
    let mut targets: Vec<&ExposureTarget> = targets
        .iter()
        .filter(|t| t.plan_id == plan_id && t.lifecycle.is_active())
        .collect();
    targets.sort_by_key(|t| t.order_index);
    let targets: Vec<ExposureTarget> = targets.into_iter().cloned().collect();

    let mut attempts: Vec<Attempt> = attempts
        .into_iter()
        .filter(|a| a.journey.plan_id == Some(plan_id) && a.journey.lifecycle.is_active())
        .collect();
    attempts.sort_by(|a, b| b.journey.started_at.cmp(&a.journey.started_at));

    let per_attempt: Vec<AttemptProgress> = attempts
        .iter()
        .map(|attempt| {
            let reached_target_ids = attempt
                .trace
                .as_ref()
                .map(|trace| reached_targets(trace, &targets, reached_radius_m))
                .unwrap_or_default();

            AttemptProgress {
                journey_id: attempt.journey.id,
                started_at: attempt.journey.started_at,
                completed: attempt.journey.completed,
                targets_reached: count(reached_target_ids.len()),
                reached_target_ids,
            }
        })
        .collect();

    let total_attempts = count(per_attempt.len());
    let reached_sum: u64 = per_attempt
        .iter()
        .map(|a| u64::from(a.targets_reached))
        .sum();

    let average_targets_reached = if total_attempts == 0 {
        0.0
    } else {
        reached_sum as f64 / f64::from(total_attempts)
    };

    PlanProgress {
        plan_id,
        total_targets: count(targets.len()),
        total_attempts,
        completed_attempts: count(per_attempt.iter().filter(|a| a.completed).count()),
        average_targets_reached,
        best_targets_reached: per_attempt
            .iter()
            .map(|a| a.targets_reached)
            .max()
            .unwrap_or(0),
        last_attempt_date: per_attempt.iter().map(|a| a.started_at).max(),
        attempts: per_attempt,
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Reads a plan's targets and attempts from a store and analyzes them.
#[derive(Debug, Clone, Copy)]
pub struct ProgressAnalyzer {
    reached_radius_m: f64,
}

impl Default for ProgressAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_REACHED_RADIUS_M)
    }
}

impl ProgressAnalyzer {
    pub fn new(reached_radius_m: f64) -> Self {
        Self { reached_radius_m }
    }

    /// Uses the reached radius configured in `settings`.
    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self::new(settings.reached_radius_m)
    }

    pub fn reached_radius_m(&self) -> f64 {
        self.reached_radius_m
    }

    /// Progress statistics for an active plan.
    ///
    /// Nothing is cached; every call re-reads the store.
    pub async fn plan_progress(&self, store: &dyn PlanStore, plan_id: u64) -> Result<PlanProgress> {
        if store.plan(plan_id).await?.is_none() {
            return Err(FootholdError::PlanNotFound { id: plan_id });
        }

        let targets = store.active_targets(plan_id).await?;
        let journeys = store.plan_journeys(plan_id).await?;

        let mut attempts = Vec::with_capacity(journeys.len());
        for journey in journeys {
            let trace = store.path_trace(journey.id).await?;
            attempts.push(Attempt { journey, trace });
        }

        let progress = analyze(plan_id, &targets, attempts, self.reached_radius_m);
        debug!(
            "Plan {plan_id}: {} attempts, best {} of {} targets",
            progress.total_attempts, progress.best_targets_reached, progress.total_targets
        );

        Ok(progress)
    }
}
