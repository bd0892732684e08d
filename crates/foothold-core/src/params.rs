//! Parameter structures for foothold operations.
//!
//! These are the plain, framework-free inputs the [`crate::Planner`] accepts.
//! Front ends wrap them with their own derives (clap arguments in the CLI)
//! and convert with `From` impls, so the core never depends on a UI crate.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │───▶│  Core Params    │───▶│  Domain types   │
//! │  (clap derives) │    │ (serde derives) │    │ (validated)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Raw coordinates arrive as separate latitude/longitude numbers; the
//! `TryFrom` conversions into [`StagedTarget`] and [`UpdateTargetRequest`]
//! are where they get range-checked.

use serde::{Deserialize, Serialize};

use crate::{
    error::{FootholdError, Result},
    geo::Coordinate,
    models::{StagedTarget, UpdateTargetRequest},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
///
/// The name may be left empty; generation assigns a default one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenamePlan {
    pub id: u64,
    pub name: String,
}

/// Parameters for adding a target by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetCreate {
    /// ID of the plan to add the target to
    pub plan_id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// How long to stay at the target, in seconds
    #[serde(default)]
    pub wait_time_seconds: u32,
}

impl TryFrom<&TargetCreate> for StagedTarget {
    type Error = FootholdError;

    fn try_from(params: &TargetCreate) -> Result<Self> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(FootholdError::invalid_input("name").with_reason("Target name is empty"));
        }

        Ok(StagedTarget {
            name: name.to_string(),
            coordinate: Coordinate::checked(params.latitude, params.longitude)?,
            wait_time_seconds: params.wait_time_seconds,
        })
    }
}

/// Parameters for inserting a target at a specific position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsertTarget {
    #[serde(flatten)]
    pub target: TargetCreate,
    /// Position to insert the target at (0-indexed)
    pub position: u32,
}

/// Partial update of a target. Latitude and longitude travel together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTarget {
    pub id: u64,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub wait_time_seconds: Option<u32>,
}

impl TryFrom<&UpdateTarget> for UpdateTargetRequest {
    type Error = FootholdError;

    fn try_from(params: &UpdateTarget) -> Result<Self> {
        let coordinate = match (params.latitude, params.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::checked(latitude, longitude)?),
            (None, None) => None,
            _ => {
                return Err(FootholdError::invalid_input("coordinate")
                    .with_reason("Latitude and longitude must be given together"))
            }
        };

        let name = match &params.name {
            Some(name) if name.trim().is_empty() => {
                return Err(
                    FootholdError::invalid_input("name").with_reason("Target name is empty")
                )
            }
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        Ok(UpdateTargetRequest {
            name,
            coordinate,
            wait_time_seconds: params.wait_time_seconds,
        })
    }
}

/// Parameters for swapping the order of two targets of the same plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapTargets {
    pub target1_id: u64,
    pub target2_id: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartJourney {
    /// Plan the journey follows; free-form journeys have none
    pub plan_id: Option<u64>,
}

/// A position sampled while a journey is being tracked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPosition {
    pub journey_id: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Parameters for generating a plan around an explicit origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePlan {
    pub plan_id: u64,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeneratePlan {
    pub fn origin(&self) -> Result<Coordinate> {
        Coordinate::checked(self.latitude, self.longitude)
    }
}
