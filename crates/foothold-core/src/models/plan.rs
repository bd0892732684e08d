//! Exposure plan model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ExposureTarget, Lifecycle, SyncState};

/// A named, ordered template of exposure targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExposurePlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Display name; may be empty until generation assigns a default
    pub name: String,

    #[serde(default)]
    pub lifecycle: Lifecycle,

    #[serde(default)]
    pub sync_state: SyncState,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan or its targets last changed (UTC)
    pub updated_at: Timestamp,

    /// Active targets ordered by `order_index`
    #[serde(default)]
    pub targets: Vec<ExposureTarget>,
}

impl ExposurePlan {
    /// Sum of the wait times of all active targets, in seconds.
    pub fn total_wait_seconds(&self) -> u64 {
        self.targets.iter().map(|t| u64::from(t.wait_time_seconds)).sum()
    }
}
