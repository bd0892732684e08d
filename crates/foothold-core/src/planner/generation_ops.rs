//! Plan generation and progress entry points for the Planner.

use super::Planner;
use crate::{
    analyzer::ProgressAnalyzer,
    error::Result,
    generator::PlanGenerator,
    models::{GenerationReport, PlanProgress},
    params::{GeneratePlan, Id},
    places::LocationProvider,
};

impl Planner {
    /// Generates targets for a plan around an explicit origin.
    pub async fn generate_plan(
        &self,
        generator: &PlanGenerator,
        params: &GeneratePlan,
    ) -> Result<GenerationReport> {
        let origin = params.origin()?;
        generator.generate(self, params.plan_id, origin).await
    }

    /// Generates targets for a plan around the device's current position.
    pub async fn generate_plan_here(
        &self,
        generator: &PlanGenerator,
        params: &Id,
        location: &dyn LocationProvider,
    ) -> Result<GenerationReport> {
        generator
            .generate_from_location(self, params.id, location)
            .await
    }

    /// Progress statistics for a plan, measured with `analyzer`'s reached
    /// radius.
    pub async fn plan_progress(
        &self,
        analyzer: &ProgressAnalyzer,
        params: &Id,
    ) -> Result<PlanProgress> {
        analyzer.plan_progress(self, params.id).await
    }
}
