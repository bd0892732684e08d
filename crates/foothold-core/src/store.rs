//! The persistence contract the generator and the progress analyzer rely on.

use async_trait::async_trait;

use crate::{
    error::Result,
    generator::FlightGuard,
    models::{ExposurePlan, ExposureTarget, Journey, PathTrace, StagedTarget},
};

/// Read/write access to plans, targets, journeys and traces.
///
/// [`crate::Planner`] implements this on top of SQLite.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Claims the plan for one generation run until the guard is dropped.
    ///
    /// Fails with [`crate::FootholdError::GenerationInProgress`] while another
    /// run against the same store holds the claim.
    fn claim_generation(&self, plan_id: u64) -> Result<FlightGuard>;

    /// An active plan with its active targets.
    async fn plan(&self, plan_id: u64) -> Result<Option<ExposurePlan>>;

    /// Active targets of a plan ordered by `order_index`.
    async fn active_targets(&self, plan_id: u64) -> Result<Vec<ExposureTarget>>;

    /// Atomically retires the plan's active targets and installs `batch` in
    /// its place, naming the plan `default_name` if it is unnamed.
    async fn commit_generated_targets(
        &self,
        plan_id: u64,
        batch: Vec<StagedTarget>,
        default_name: &str,
    ) -> Result<Vec<ExposureTarget>>;

    /// Non-deleted journeys linked to the plan, newest start first.
    async fn plan_journeys(&self, plan_id: u64) -> Result<Vec<Journey>>;

    /// The recorded trace of a journey, if any point was recorded.
    async fn path_trace(&self, journey_id: u64) -> Result<Option<PathTrace>>;
}
