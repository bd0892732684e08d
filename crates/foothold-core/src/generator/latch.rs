//! Per-plan single-flight guard for generation runs.
//!
//! Claims live with the plan store rather than with a generator, so two
//! independently built generators writing to the same database still exclude
//! each other. [`InFlightPlans::for_database`] hands out one shared set per
//! database file for the whole process.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use log::warn;

use crate::error::{FootholdError, Result};

/// Set of plan IDs with a generation run in progress.
///
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct InFlightPlans {
    plans: Arc<Mutex<HashSet<u64>>>,
}

impl InFlightPlans {
    pub fn new() -> Self {
        Self::default()
    }

    /// The set shared by every store opened on `db_path` in this process.
    ///
    /// `db_path` should already be canonical; differently spelled paths to the
    /// same file get separate sets.
    pub fn for_database(db_path: &Path) -> Self {
        static REGISTRY: OnceLock<Mutex<HashMap<PathBuf, InFlightPlans>>> = OnceLock::new();

        REGISTRY
            .get_or_init(Mutex::default)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(db_path.to_path_buf())
            .or_default()
            .clone()
    }

    /// Claims `plan_id` until the returned guard is dropped.
    ///
    /// Fails with [`FootholdError::GenerationInProgress`] if the plan is
    /// already claimed.
    pub fn try_acquire(&self, plan_id: u64) -> Result<FlightGuard> {
        let mut plans = self.plans.lock().unwrap_or_else(PoisonError::into_inner);
        if !plans.insert(plan_id) {
            warn!("Rejected generation for plan {plan_id}: already in progress");
            return Err(FootholdError::GenerationInProgress { plan_id });
        }

        Ok(FlightGuard {
            plans: Arc::clone(&self.plans),
            plan_id,
        })
    }

    pub fn is_in_flight(&self, plan_id: u64) -> bool {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&plan_id)
    }
}

/// Releases the plan's claim when dropped.
#[derive(Debug)]
pub struct FlightGuard {
    plans: Arc<Mutex<HashSet<u64>>>,
    plan_id: u64,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.plans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.plan_id);
    }
}
