//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::utils::{id_at, parsed_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, FootholdError, Result},
    models::{ExposurePlan, Lifecycle, SyncState},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (name, lifecycle, sync_state, created_at, updated_at) VALUES (?1, 'active', 'pending_push', ?2, ?3)";
const SELECT_PLAN_SQL: &str = "SELECT id, name, lifecycle, sync_state, created_at, updated_at FROM plans WHERE id = ?1 AND lifecycle = 'active'";
const SELECT_ACTIVE_PLANS_SQL: &str = "SELECT id, name, lifecycle, sync_state, created_at, updated_at FROM plans WHERE lifecycle = 'active' ORDER BY id DESC";
const SELECT_PENDING_PLANS_SQL: &str = "SELECT id, name, lifecycle, sync_state, created_at, updated_at FROM plans WHERE sync_state = 'pending_push' ORDER BY id";
const CHECK_PLAN_ACTIVE_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1 AND lifecycle = 'active')";
const RENAME_PLAN_SQL: &str = "UPDATE plans SET name = ?1, sync_state = 'pending_push', updated_at = ?2 WHERE id = ?3 AND lifecycle = 'active'";
const SOFT_DELETE_PLAN_SQL: &str = "UPDATE plans SET lifecycle = 'deleted', sync_state = 'pending_push', updated_at = ?1 WHERE id = ?2 AND lifecycle = 'active'";
const SOFT_DELETE_PLAN_TARGETS_SQL: &str = "UPDATE targets SET lifecycle = 'deleted', sync_state = 'pending_push', updated_at = ?1 WHERE plan_id = ?2 AND lifecycle = 'active'";
const MARK_PLAN_CLEAN_SQL: &str = "UPDATE plans SET sync_state = 'clean' WHERE id = ?1";
const MARK_PLAN_TARGETS_CLEAN_SQL: &str = "UPDATE targets SET sync_state = 'clean' WHERE plan_id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
pub(super) const TOUCH_PLAN_SQL: &str =
    "UPDATE plans SET updated_at = ?1, sync_state = 'pending_push' WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a plan (without targets) from a row.
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<ExposurePlan> {
        Ok(ExposurePlan {
            id: id_at(row, 0)?,
            name: row.get(1)?,
            lifecycle: parsed_at::<Lifecycle>(row, 2)?,
            sync_state: parsed_at::<SyncState>(row, 3)?,
            created_at: timestamp_at(row, 4)?,
            updated_at: timestamp_at(row, 5)?,
            targets: Vec::new(),
        })
    }

    /// Fails with `PlanNotFound` unless the plan exists and is not deleted.
    pub(super) fn ensure_plan_active(tx: &Transaction, plan_id: u64) -> Result<()> {
        let active: bool = tx
            .query_row(CHECK_PLAN_ACTIVE_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check plan existence")?;

        if active {
            Ok(())
        } else {
            Err(FootholdError::PlanNotFound { id: plan_id })
        }
    }

    /// Creates a new plan. The name may be empty; generation fills in a
    /// default name later.
    pub fn create_plan(&mut self, name: &str) -> Result<ExposurePlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(INSERT_PLAN_SQL, params![name.trim(), &now_str, &now_str])
            .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ExposurePlan {
            id,
            name: name.trim().to_string(),
            lifecycle: Lifecycle::Active,
            sync_state: SyncState::PendingPush,
            created_at: now,
            updated_at: now,
            targets: Vec::new(),
        })
    }

    /// Retrieves an active plan by its ID, with its active targets.
    pub fn get_plan(&self, id: u64) -> Result<Option<ExposurePlan>> {
        let mut plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        // Eagerly load targets if plan exists
        if let Some(ref mut plan) = plan {
            plan.targets = self.get_targets(plan.id)?;
        }

        Ok(plan)
    }

    /// Lists all active plans, newest first, each with its active targets.
    pub fn list_plans(&self) -> Result<Vec<ExposurePlan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVE_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        let mut plans = stmt
            .query_map([], Self::build_plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        for plan in &mut plans {
            plan.targets = self.get_targets(plan.id)?;
        }

        Ok(plans)
    }

    /// Renames a plan.
    pub fn rename_plan(&mut self, id: u64, name: &str) -> Result<ExposurePlan> {
        let now_str = Timestamp::now().to_string();
        let changed = self
            .connection
            .execute(RENAME_PLAN_SQL, params![name.trim(), &now_str, id as i64])
            .db_context("Failed to rename plan")?;

        if changed == 0 {
            return Err(FootholdError::PlanNotFound { id });
        }

        self.get_plan(id)?
            .ok_or(FootholdError::PlanNotFound { id })
    }

    /// Soft-deletes a plan together with all of its targets.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();

        let changed = tx
            .execute(SOFT_DELETE_PLAN_SQL, params![&now_str, id as i64])
            .db_context("Failed to delete plan")?;

        if changed == 0 {
            return Err(FootholdError::PlanNotFound { id });
        }

        tx.execute(SOFT_DELETE_PLAN_TARGETS_SQL, params![&now_str, id as i64])
            .db_context("Failed to delete plan targets")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Lists plans (deleted ones included) with changes not yet pushed.
    pub fn plans_pending_sync(&self) -> Result<Vec<ExposurePlan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PENDING_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        let plans = stmt
            .query_map([], Self::build_plan_from_row)
            .db_context("Failed to query pending plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch pending plans")?;

        Ok(plans)
    }

    /// Marks a plan and all of its targets as pushed.
    pub fn mark_plan_synced(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")?;

        if !exists {
            return Err(FootholdError::PlanNotFound { id });
        }

        tx.execute(MARK_PLAN_CLEAN_SQL, params![id as i64])
            .db_context("Failed to mark plan synced")?;
        tx.execute(MARK_PLAN_TARGETS_CLEAN_SQL, params![id as i64])
            .db_context("Failed to mark targets synced")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
