//! Plan operations for the Planner.

use super::Planner;
use crate::{
    error::{FootholdError, Result},
    models::ExposurePlan,
    params::{CreatePlan, Id, RenamePlan},
};

impl Planner {
    /// Creates a plan. An empty name is allowed.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<ExposurePlan> {
        let name = params.name.clone();
        self.with_db(move |db| db.create_plan(&name)).await
    }

    /// Retrieves an active plan with its active targets.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<ExposurePlan>> {
        let plan_id = params.id;
        self.with_db(move |db| db.get_plan(plan_id)).await
    }

    /// Lists active plans, newest first.
    pub async fn list_plans(&self) -> Result<Vec<ExposurePlan>> {
        self.with_db(|db| db.list_plans()).await
    }

    pub async fn rename_plan(&self, params: &RenamePlan) -> Result<ExposurePlan> {
        if params.name.trim().is_empty() {
            return Err(FootholdError::invalid_input("name").with_reason("Plan name is empty"));
        }

        let plan_id = params.id;
        let name = params.name.clone();
        self.with_db(move |db| db.rename_plan(plan_id, &name)).await
    }

    /// Soft-deletes a plan and its targets, returning the plan as it was.
    pub async fn delete_plan(&self, params: &Id) -> Result<ExposurePlan> {
        let plan_id = params.id;
        self.with_db(move |db| {
            let plan = db
                .get_plan(plan_id)?
                .ok_or(FootholdError::PlanNotFound { id: plan_id })?;
            db.delete_plan(plan_id)?;
            Ok(plan)
        })
        .await
    }

    /// Plans, deleted ones included, with local changes not yet pushed.
    pub async fn plans_pending_sync(&self) -> Result<Vec<ExposurePlan>> {
        self.with_db(|db| db.plans_pending_sync()).await
    }

    /// Records that a plan and its targets have been pushed.
    pub async fn mark_plan_synced(&self, params: &Id) -> Result<()> {
        let plan_id = params.id;
        self.with_db(move |db| db.mark_plan_synced(plan_id)).await
    }
}
