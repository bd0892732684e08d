//! Manual target edits for the Planner.
//!
//! Every operation here keeps the surviving targets' `order_index` values a
//! contiguous `0..N` sequence.

use super::Planner;
use crate::{
    error::{FootholdError, Result},
    models::{ExposureTarget, StagedTarget, UpdateTargetRequest},
    params::{Id, InsertTarget, SwapTargets, TargetCreate, UpdateTarget},
};

impl Planner {
    /// Appends a target to the end of a plan.
    pub async fn add_target(&self, params: &TargetCreate) -> Result<ExposureTarget> {
        let plan_id = params.plan_id;
        let staged = StagedTarget::try_from(params)?;
        self.with_db(move |db| db.add_target(plan_id, &staged)).await
    }

    /// Inserts a target at a position, shifting later targets back.
    pub async fn insert_target(&self, params: &InsertTarget) -> Result<ExposureTarget> {
        let plan_id = params.target.plan_id;
        let position = params.position;
        let staged = StagedTarget::try_from(&params.target)?;
        self.with_db(move |db| db.insert_target(plan_id, position, &staged))
            .await
    }

    pub async fn update_target(&self, params: &UpdateTarget) -> Result<ExposureTarget> {
        let target_id = params.id;
        let request = UpdateTargetRequest::try_from(params)?;
        self.with_db(move |db| db.update_target(target_id, request))
            .await
    }

    /// Soft-deletes a target and returns it as it was before removal.
    pub async fn remove_target(&self, params: &Id) -> Result<ExposureTarget> {
        let target_id = params.id;
        self.with_db(move |db| {
            let target = db
                .get_target(target_id)?
                .ok_or(FootholdError::TargetNotFound { id: target_id })?;
            db.remove_target(target_id)?;
            Ok(target)
        })
        .await
    }

    /// Swaps the positions of two targets of the same plan.
    pub async fn swap_targets(&self, params: &SwapTargets) -> Result<()> {
        let (first, second) = (params.target1_id, params.target2_id);
        self.with_db(move |db| db.swap_targets(first, second)).await
    }

    /// Retrieves an active target by ID.
    pub async fn get_target(&self, params: &Id) -> Result<Option<ExposureTarget>> {
        let target_id = params.id;
        self.with_db(move |db| db.get_target(target_id)).await
    }

    /// Lists a plan's active targets in order.
    pub async fn list_targets(&self, params: &Id) -> Result<Vec<ExposureTarget>> {
        let plan_id = params.id;
        self.with_db(move |db| db.get_targets(plan_id)).await
    }
}
