//! Derived progress statistics for a plan. Never persisted.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// How far one journey got through a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttemptProgress {
    pub journey_id: u64,
    pub started_at: Timestamp,
    pub completed: bool,
    pub targets_reached: u32,
    /// IDs of the reached targets, in plan order
    pub reached_target_ids: Vec<u64>,
}

/// Aggregate completion statistics across every attempt at a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanProgress {
    pub plan_id: u64,
    /// Number of active targets the attempts were measured against
    pub total_targets: u32,
    pub total_attempts: u32,
    pub completed_attempts: u32,
    pub average_targets_reached: f64,
    pub best_targets_reached: u32,
    pub last_attempt_date: Option<Timestamp>,
    /// Per-attempt breakdown, most recent first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<AttemptProgress>,
}

impl PlanProgress {
    pub fn has_attempts(&self) -> bool {
        self.total_attempts > 0
    }
}
