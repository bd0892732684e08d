//! Core library for foothold, an exposure-plan generator and progress
//! tracker.
//!
//! An exposure plan is an ordered list of real-world places to visit,
//! nearest and shortest stays first, each with a wait time that grows along
//! the list. This crate builds such plans automatically from a place search
//! around an origin, stores them in SQLite, tracks journeys that follow them,
//! and measures how far each journey got.
//!
//! # Layout
//!
//! - [`places`]: collaborator traits for place search, reverse geocoding and
//!   device location, plus the candidate locator and aggregator
//! - [`generator`]: the tiered [`PlanGenerator`]
//! - [`analyzer`]: the [`ProgressAnalyzer`]
//! - [`store`]: the [`PlanStore`] seam both of them use
//! - [`planner`]: the async [`Planner`] façade over the SQLite [`db`]
//! - [`display`]: markdown `Display` wrappers for front ends
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use foothold_core::{
//!     geo::Coordinate,
//!     params::{CreatePlan, GeneratePlan},
//!     places::{PlaceHit, PlaceSearch, PlaceSearchError, ReverseGeocoder, SearchRegion},
//!     PlanGenerator, PlannerBuilder,
//! };
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl PlaceSearch for Offline {
//!     async fn search(
//!         &self,
//!         _query: &str,
//!         region: SearchRegion,
//!     ) -> Result<Vec<PlaceHit>, PlaceSearchError> {
//!         Ok(vec![PlaceHit::named("Corner Cafe", region.center.offset_north(120.0))])
//!     }
//! }
//!
//! #[async_trait]
//! impl ReverseGeocoder for Offline {
//!     async fn street_name(
//!         &self,
//!         _coordinate: Coordinate,
//!     ) -> Result<Option<String>, PlaceSearchError> {
//!         Ok(None)
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path("foothold.db")
//!     .build()
//!     .await?;
//! let plan = planner.create_plan(&CreatePlan::default()).await?;
//!
//! let generator = PlanGenerator::new(Arc::new(Offline), Arc::new(Offline));
//! let report = planner
//!     .generate_plan(
//!         &generator,
//!         &GeneratePlan {
//!             plan_id: plan.id,
//!             latitude: 51.5007,
//!             longitude: -0.1246,
//!         },
//!     )
//!     .await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod db;
pub mod display;
pub mod error;
pub mod generator;
pub mod geo;
pub mod models;
pub mod params;
pub mod places;
pub mod planner;
pub mod settings;
pub mod store;

pub use analyzer::ProgressAnalyzer;
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, Journeys, LocalDateTime, OperationStatus, Plans, Targets,
    UpdateResult,
};
pub use error::{FootholdError, Result};
pub use generator::PlanGenerator;
pub use geo::{Coordinate, DistanceBand};
pub use models::{
    AttemptProgress, ExposurePlan, ExposureTarget, GenerationReport, GenerationStatus, Journey,
    Lifecycle, PathTrace, PlanProgress, StagedTarget, SyncState, Tier, TracePoint,
    UpdateTargetRequest,
};
pub use params::{
    CreatePlan, GeneratePlan, Id, InsertTarget, RecordPosition, RenamePlan, StartJourney,
    SwapTargets, TargetCreate, UpdateTarget,
};
pub use planner::{Planner, PlannerBuilder};
pub use settings::GenerationSettings;
pub use store::PlanStore;
