//! Exposure target model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Lifecycle, SyncState};
use crate::geo::Coordinate;

/// A single waypoint of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExposureTarget {
    /// Unique identifier for the target
    pub id: u64,

    /// ID of the owning plan
    pub plan_id: u64,

    pub name: String,

    pub coordinate: Coordinate,

    /// How long to stay at the target, in seconds
    pub wait_time_seconds: u32,

    /// Position within the plan (0-indexed, contiguous among active targets)
    pub order_index: u32,

    #[serde(default)]
    pub lifecycle: Lifecycle,

    #[serde(default)]
    pub sync_state: SyncState,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

/// A target that has been selected but not yet written to the store.
///
/// Generation builds the complete batch of staged targets before the store
/// swaps it in, so the plan never holds a half-written batch.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedTarget {
    pub name: String,
    pub coordinate: Coordinate,
    pub wait_time_seconds: u32,
}
