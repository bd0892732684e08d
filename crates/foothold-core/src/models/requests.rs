//! Request types for modifying targets.

use crate::geo::Coordinate;

/// Fields to change on an existing target; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTargetRequest {
    pub name: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub wait_time_seconds: Option<u32>,
}

impl UpdateTargetRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.coordinate.is_none() && self.wait_time_seconds.is_none()
    }
}
