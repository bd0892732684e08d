//! Row lifecycle and sync-state enumerations shared by plans, targets and
//! journeys.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a row is live or soft-deleted.
///
/// Deleted rows are retained so a later sync can propagate the deletion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted,
}

impl FromStr for Lifecycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Lifecycle::Active),
            "deleted" => Ok(Lifecycle::Deleted),
            _ => Err(format!("Invalid lifecycle: {s}")),
        }
    }
}

impl Lifecycle {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Active => "active",
            Lifecycle::Deleted => "deleted",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }
}

/// Whether a row has local changes that have not been pushed yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Clean,
    #[default]
    PendingPush,
}

impl FromStr for SyncState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clean" => Ok(SyncState::Clean),
            "pending_push" | "pendingpush" => Ok(SyncState::PendingPush),
            _ => Err(format!("Invalid sync state: {s}")),
        }
    }
}

impl SyncState {
    /// Database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Clean => "clean",
            SyncState::PendingPush => "pending_push",
        }
    }
}
