//! High-level async API over the plan store.
//!
//! [`Planner`] is the entry point front ends use. It holds the database path
//! and the set of plans being generated: every call opens a [`Database`] on a
//! blocking task, runs one query method and returns. Planners opened on the
//! same file share that set.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Front end      │    │    Planner      │    │    Database     │
//! │  (CLI, tests)   │───▶│ (plan_ops, ...) │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                               │
//!                               ▼ PlanStore
//!                  ┌──────────────────────────┐
//!                  │ PlanGenerator            │
//!                  │ ProgressAnalyzer         │
//!                  └──────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use foothold_core::{params::CreatePlan, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path("/tmp/foothold.db")
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         name: "Around the block".to_string(),
//!     })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{FootholdError, Result},
    generator::InFlightPlans,
};

pub mod builder;
pub mod generation_ops;
pub mod journey_ops;
pub mod plan_ops;
pub mod store;
pub mod target_ops;


pub use builder::PlannerBuilder;

/// Main interface for managing plans, targets and journeys.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
    in_flight: InFlightPlans,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            in_flight: InFlightPlans::for_database(&db_path),
            db_path,
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Whether a generation run for `plan_id` currently holds its claim.
    pub fn is_generating(&self, plan_id: u64) -> bool {
        self.in_flight.is_in_flight(plan_id)
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(FootholdError::task_join)?
    }
}
