//! [`PlanStore`] backed by the planner's SQLite database.

use async_trait::async_trait;

use super::Planner;
use crate::{
    error::Result,
    generator::FlightGuard,
    models::{ExposurePlan, ExposureTarget, Journey, PathTrace, StagedTarget},
    store::PlanStore,
};

#[async_trait]
impl PlanStore for Planner {
    fn claim_generation(&self, plan_id: u64) -> Result<FlightGuard> {
        self.in_flight.try_acquire(plan_id)
    }

    async fn plan(&self, plan_id: u64) -> Result<Option<ExposurePlan>> {
        self.with_db(move |db| db.get_plan(plan_id)).await
    }

    async fn active_targets(&self, plan_id: u64) -> Result<Vec<ExposureTarget>> {
        self.with_db(move |db| db.get_targets(plan_id)).await
    }

    async fn commit_generated_targets(
        &self,
        plan_id: u64,
        batch: Vec<StagedTarget>,
        default_name: &str,
    ) -> Result<Vec<ExposureTarget>> {
        let default_name = default_name.to_string();
        self.with_db(move |db| db.replace_targets(plan_id, &batch, &default_name))
            .await
    }

    async fn plan_journeys(&self, plan_id: u64) -> Result<Vec<Journey>> {
        self.with_db(move |db| db.get_plan_journeys(plan_id)).await
    }

    async fn path_trace(&self, journey_id: u64) -> Result<Option<PathTrace>> {
        self.with_db(move |db| db.get_path_trace(journey_id)).await
    }
}
