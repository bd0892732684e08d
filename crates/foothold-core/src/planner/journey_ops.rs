//! Journey tracking operations for the Planner.

use jiff::Timestamp;

use super::Planner;
use crate::{
    error::Result,
    geo::Coordinate,
    models::{Journey, PathTrace, TracePoint},
    params::{Id, RecordPosition, StartJourney},
};

impl Planner {
    /// Starts tracking a new journey; any previously current journey stops
    /// being current.
    pub async fn start_journey(&self, params: &StartJourney) -> Result<Journey> {
        let plan_id = params.plan_id;
        self.with_db(move |db| db.start_journey(plan_id, Timestamp::now()))
            .await
    }

    /// Appends the given position to a journey's trace, stamped now.
    pub async fn record_position(&self, params: &RecordPosition) -> Result<TracePoint> {
        let journey_id = params.journey_id;
        let coordinate = Coordinate::checked(params.latitude, params.longitude)?;
        self.with_db(move |db| db.record_trace_point(journey_id, coordinate, Timestamp::now()))
            .await
    }

    pub async fn complete_journey(&self, params: &Id) -> Result<Journey> {
        let journey_id = params.id;
        self.with_db(move |db| db.complete_journey(journey_id)).await
    }

    /// Stops tracking a journey without marking it completed.
    pub async fn end_journey(&self, params: &Id) -> Result<Journey> {
        let journey_id = params.id;
        self.with_db(move |db| db.end_journey(journey_id)).await
    }

    pub async fn delete_journey(&self, params: &Id) -> Result<()> {
        let journey_id = params.id;
        self.with_db(move |db| db.delete_journey(journey_id)).await
    }

    pub async fn get_journey(&self, params: &Id) -> Result<Option<Journey>> {
        let journey_id = params.id;
        self.with_db(move |db| db.get_journey(journey_id)).await
    }

    /// The journey currently being tracked, if any.
    pub async fn current_journey(&self) -> Result<Option<Journey>> {
        self.with_db(|db| db.current_journey()).await
    }

    /// A plan's non-deleted journeys, most recently started first.
    pub async fn list_plan_journeys(&self, params: &Id) -> Result<Vec<Journey>> {
        let plan_id = params.id;
        self.with_db(move |db| db.get_plan_journeys(plan_id)).await
    }

    pub async fn get_path_trace(&self, params: &Id) -> Result<Option<PathTrace>> {
        let journey_id = params.id;
        self.with_db(move |db| db.get_path_trace(journey_id)).await
    }
}
