//! Target CRUD operations, ordering, and the generated-batch swap.
//!
//! Among a plan's active targets `order_index` is always the contiguous
//! sequence `0..N`. Every operation that changes the active set re-indexes
//! the survivors in the same transaction.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::{
    plan_queries::TOUCH_PLAN_SQL,
    utils::{id_at, parsed_at, timestamp_at},
};
use crate::{
    error::{DatabaseResultExt, FootholdError, Result},
    geo::Coordinate,
    models::{ExposureTarget, Lifecycle, StagedTarget, SyncState, UpdateTargetRequest},
};

const TARGET_COLUMNS: &str = "id, plan_id, name, latitude, longitude, wait_time_seconds, order_index, lifecycle, sync_state, created_at, updated_at";
const INSERT_TARGET_SQL: &str = "INSERT INTO targets (plan_id, name, latitude, longitude, wait_time_seconds, order_index, lifecycle, sync_state, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'active', 'pending_push', ?7, ?8)";
const COUNT_ACTIVE_TARGETS_SQL: &str =
    "SELECT COUNT(*) FROM targets WHERE plan_id = ?1 AND lifecycle = 'active'";
const SHIFT_ORDERS_UP_SQL: &str = "UPDATE targets SET order_index = order_index + 1, sync_state = 'pending_push' WHERE plan_id = ?1 AND lifecycle = 'active' AND order_index >= ?2";
const SHIFT_ORDERS_DOWN_SQL: &str = "UPDATE targets SET order_index = order_index - 1, sync_state = 'pending_push' WHERE plan_id = ?1 AND lifecycle = 'active' AND order_index > ?2";
const SELECT_TARGET_POSITION_SQL: &str =
    "SELECT plan_id, order_index FROM targets WHERE id = ?1 AND lifecycle = 'active'";
const SOFT_DELETE_TARGET_SQL: &str = "UPDATE targets SET lifecycle = 'deleted', sync_state = 'pending_push', updated_at = ?1 WHERE id = ?2";
const SOFT_DELETE_ACTIVE_TARGETS_SQL: &str = "UPDATE targets SET lifecycle = 'deleted', sync_state = 'pending_push', updated_at = ?1 WHERE plan_id = ?2 AND lifecycle = 'active'";
const UPDATE_TARGET_ORDER_SQL: &str = "UPDATE targets SET order_index = ?1, sync_state = 'pending_push', updated_at = ?2 WHERE id = ?3";
const UPDATE_TARGET_SQL: &str = "UPDATE targets SET name = ?1, latitude = ?2, longitude = ?3, wait_time_seconds = ?4, sync_state = 'pending_push', updated_at = ?5 WHERE id = ?6";
const NAME_EMPTY_PLAN_SQL: &str =
    "UPDATE plans SET name = ?1 WHERE id = ?2 AND trim(name) = ''";

impl super::Database {
    /// Helper function to construct a target from a database row
    fn build_target_from_row(row: &rusqlite::Row) -> rusqlite::Result<ExposureTarget> {
        Ok(ExposureTarget {
            id: id_at(row, 0)?,
            plan_id: id_at(row, 1)?,
            name: row.get(2)?,
            coordinate: Coordinate::new(row.get(3)?, row.get(4)?),
            wait_time_seconds: row.get::<_, i64>(5)? as u32,
            order_index: row.get::<_, i64>(6)? as u32,
            lifecycle: parsed_at::<Lifecycle>(row, 7)?,
            sync_state: parsed_at::<SyncState>(row, 8)?,
            created_at: timestamp_at(row, 9)?,
            updated_at: timestamp_at(row, 10)?,
        })
    }

    fn select_target(tx: &Transaction, target_id: u64) -> Result<ExposureTarget> {
        tx.query_row(
            &format!("SELECT {TARGET_COLUMNS} FROM targets WHERE id = ?1"),
            params![target_id as i64],
            Self::build_target_from_row,
        )
        .optional()
        .db_context("Failed to query target")?
        .ok_or(FootholdError::TargetNotFound { id: target_id })
    }

    fn active_target_count(tx: &Transaction, plan_id: u64) -> Result<u32> {
        let count: i64 = tx
            .query_row(COUNT_ACTIVE_TARGETS_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to count targets")?;
        Ok(count as u32)
    }

    fn insert_target_row(
        tx: &Transaction,
        plan_id: u64,
        staged: &StagedTarget,
        order_index: u32,
        now_str: &str,
    ) -> Result<u64> {
        tx.execute(
            INSERT_TARGET_SQL,
            params![
                plan_id as i64,
                &staged.name,
                staged.coordinate.latitude,
                staged.coordinate.longitude,
                i64::from(staged.wait_time_seconds),
                i64::from(order_index),
                now_str,
                now_str
            ],
        )
        .db_context("Failed to insert target")?;

        Ok(tx.last_insert_rowid() as u64)
    }

    /// Appends a manually created target to the end of a plan.
    pub fn add_target(&mut self, plan_id: u64, target: &StagedTarget) -> Result<ExposureTarget> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::ensure_plan_active(&tx, plan_id)?;

        let next_order = Self::active_target_count(&tx, plan_id)?;
        let now_str = Timestamp::now().to_string();

        let id = Self::insert_target_row(&tx, plan_id, target, next_order, &now_str)?;

        tx.execute(TOUCH_PLAN_SQL, params![&now_str, plan_id as i64])
            .db_context("Failed to update plan timestamp")?;

        let created = Self::select_target(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(created)
    }

    /// Inserts a target at `position`, shifting later targets back by one.
    pub fn insert_target(
        &mut self,
        plan_id: u64,
        position: u32,
        target: &StagedTarget,
    ) -> Result<ExposureTarget> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::ensure_plan_active(&tx, plan_id)?;

        // Allow inserting at the end (position == count)
        let count = Self::active_target_count(&tx, plan_id)?;
        if position > count {
            return Err(FootholdError::invalid_input("position").with_reason(format!(
                "Position {position} is out of range. Plan has {count} targets"
            )));
        }

        tx.execute(
            SHIFT_ORDERS_UP_SQL,
            params![plan_id as i64, i64::from(position)],
        )
        .db_context("Failed to shift target orders")?;

        let now_str = Timestamp::now().to_string();
        let id = Self::insert_target_row(&tx, plan_id, target, position, &now_str)?;

        tx.execute(TOUCH_PLAN_SQL, params![&now_str, plan_id as i64])
            .db_context("Failed to update plan timestamp")?;

        let created = Self::select_target(&tx, id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(created)
    }

    /// Updates a target's name, coordinate and/or wait time.
    pub fn update_target(
        &mut self,
        target_id: u64,
        request: UpdateTargetRequest,
    ) -> Result<ExposureTarget> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = Self::select_target(&tx, target_id)?;
        if !current.lifecycle.is_active() {
            return Err(FootholdError::TargetNotFound { id: target_id });
        }

        if request.is_empty() {
            return Ok(current);
        }

        let name = request.name.unwrap_or(current.name);
        let coordinate = request.coordinate.unwrap_or(current.coordinate);
        let wait = request.wait_time_seconds.unwrap_or(current.wait_time_seconds);
        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_TARGET_SQL,
            params![
                &name,
                coordinate.latitude,
                coordinate.longitude,
                i64::from(wait),
                &now_str,
                target_id as i64
            ],
        )
        .db_context("Failed to update target")?;

        tx.execute(TOUCH_PLAN_SQL, params![&now_str, current.plan_id as i64])
            .db_context("Failed to update plan timestamp")?;

        let updated = Self::select_target(&tx, target_id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Retrieves the active targets of a plan ordered by `order_index`.
    pub fn get_targets(&self, plan_id: u64) -> Result<Vec<ExposureTarget>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TARGET_COLUMNS} FROM targets WHERE plan_id = ?1 AND lifecycle = 'active' ORDER BY order_index"
            ))
            .db_context("Failed to prepare query")?;

        let targets = stmt
            .query_map(params![plan_id as i64], Self::build_target_from_row)
            .db_context("Failed to query targets")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch targets")?;

        Ok(targets)
    }

    /// Retrieves every target row of a plan, soft-deleted ones included.
    pub fn get_targets_including_deleted(&self, plan_id: u64) -> Result<Vec<ExposureTarget>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {TARGET_COLUMNS} FROM targets WHERE plan_id = ?1 ORDER BY id"
            ))
            .db_context("Failed to prepare query")?;

        let targets = stmt
            .query_map(params![plan_id as i64], Self::build_target_from_row)
            .db_context("Failed to query targets")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch targets")?;

        Ok(targets)
    }

    /// Retrieves a single active target by its ID.
    pub fn get_target(&self, target_id: u64) -> Result<Option<ExposureTarget>> {
        let target = self
            .connection
            .query_row(
                &format!(
                    "SELECT {TARGET_COLUMNS} FROM targets WHERE id = ?1 AND lifecycle = 'active'"
                ),
                params![target_id as i64],
                Self::build_target_from_row,
            )
            .optional()
            .db_context("Failed to get target")?;

        Ok(target)
    }

    /// Soft-deletes a target and closes the gap it leaves in the ordering.
    pub fn remove_target(&mut self, target_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (plan_id, order_index): (i64, i64) = tx
            .query_row(SELECT_TARGET_POSITION_SQL, params![target_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query target")?
            .ok_or(FootholdError::TargetNotFound { id: target_id })?;

        let now_str = Timestamp::now().to_string();

        tx.execute(SOFT_DELETE_TARGET_SQL, params![&now_str, target_id as i64])
            .db_context("Failed to delete target")?;

        tx.execute(SHIFT_ORDERS_DOWN_SQL, params![plan_id, order_index])
            .db_context("Failed to update target orders")?;

        tx.execute(TOUCH_PLAN_SQL, params![&now_str, plan_id])
            .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Swaps the order of two active targets within the same plan.
    pub fn swap_targets(&mut self, target_id1: u64, target_id2: u64) -> Result<()> {
        if target_id1 == target_id2 {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let position = |id: u64| -> Result<(i64, i64)> {
            tx.query_row(SELECT_TARGET_POSITION_SQL, params![id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to query target")?
            .ok_or(FootholdError::TargetNotFound { id })
        };

        let (plan_id1, order1) = position(target_id1)?;
        let (plan_id2, order2) = position(target_id2)?;

        if plan_id1 != plan_id2 {
            return Err(FootholdError::invalid_input("target_ids")
                .with_reason("Targets must be from the same plan to swap"));
        }

        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_TARGET_ORDER_SQL,
            params![order2, &now_str, target_id1 as i64],
        )
        .db_context("Failed to update first target order")?;

        tx.execute(
            UPDATE_TARGET_ORDER_SQL,
            params![order1, &now_str, target_id2 as i64],
        )
        .db_context("Failed to update second target order")?;

        tx.execute(TOUCH_PLAN_SQL, params![&now_str, plan_id1])
            .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Replaces a plan's active targets with a generated batch.
    ///
    /// Soft-deletes every active target, inserts `batch` in order with
    /// `order_index` 0..N, and names the plan `default_name` if it is still
    /// unnamed. Runs as one transaction: either the whole batch is swapped
    /// in or the plan is left untouched.
    pub fn replace_targets(
        &mut self,
        plan_id: u64,
        batch: &[StagedTarget],
        default_name: &str,
    ) -> Result<Vec<ExposureTarget>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::ensure_plan_active(&tx, plan_id)?;

        let now_str = Timestamp::now().to_string();

        tx.execute(
            SOFT_DELETE_ACTIVE_TARGETS_SQL,
            params![&now_str, plan_id as i64],
        )
        .db_context("Failed to retire previous targets")?;

        for (index, staged) in batch.iter().enumerate() {
            Self::insert_target_row(&tx, plan_id, staged, index as u32, &now_str)?;
        }

        tx.execute(NAME_EMPTY_PLAN_SQL, params![default_name, plan_id as i64])
            .db_context("Failed to name plan")?;

        tx.execute(TOUCH_PLAN_SQL, params![&now_str, plan_id as i64])
            .db_context("Failed to update plan timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_targets(plan_id)
    }
}
