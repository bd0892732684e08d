//! Journey and path trace models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Lifecycle, SyncState};
use crate::geo::Coordinate;

/// One tracked attempt at following a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journey {
    pub id: u64,

    /// Plan this attempt follows, if any
    pub plan_id: Option<u64>,

    pub started_at: Timestamp,

    /// Whether this is the journey currently being tracked
    pub is_current: bool,

    pub completed: bool,

    #[serde(default)]
    pub lifecycle: Lifecycle,

    #[serde(default)]
    pub sync_state: SyncState,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Journey {
    /// Whether the journey still accepts trace points.
    pub fn is_recording(&self) -> bool {
        self.lifecycle.is_active() && !self.completed
    }
}

/// One sampled position of a path trace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TracePoint {
    pub coordinate: Coordinate,
    pub recorded_at: Timestamp,
}

/// Ordered positions recorded during a journey.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PathTrace {
    pub points: Vec<TracePoint>,
}

impl PathTrace {
    pub fn new(points: Vec<TracePoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether any recorded point lies within `radius_m` of `target`.
    pub fn passes_within(&self, target: &Coordinate, radius_m: f64) -> bool {
        self.points
            .iter()
            .any(|p| p.coordinate.distance_to(target) <= radius_m)
    }
}
