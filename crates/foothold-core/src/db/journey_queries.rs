//! Journey and path trace operations.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use super::utils::{id_at, parsed_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, FootholdError, Result},
    geo::Coordinate,
    models::{Journey, Lifecycle, PathTrace, SyncState, TracePoint},
};

const JOURNEY_COLUMNS: &str =
    "id, plan_id, started_at, is_current, completed, lifecycle, sync_state, created_at, updated_at";
const INSERT_JOURNEY_SQL: &str = "INSERT INTO journeys (plan_id, started_at, is_current, completed, lifecycle, sync_state, created_at, updated_at) VALUES (?1, ?2, 1, 0, 'active', 'pending_push', ?3, ?4)";
const CLEAR_CURRENT_SQL: &str = "UPDATE journeys SET is_current = 0, updated_at = ?1 WHERE is_current = 1";
const COMPLETE_JOURNEY_SQL: &str = "UPDATE journeys SET completed = 1, is_current = 0, sync_state = 'pending_push', updated_at = ?1 WHERE id = ?2";
const END_JOURNEY_SQL: &str = "UPDATE journeys SET is_current = 0, sync_state = 'pending_push', updated_at = ?1 WHERE id = ?2";
const SOFT_DELETE_JOURNEY_SQL: &str = "UPDATE journeys SET lifecycle = 'deleted', is_current = 0, sync_state = 'pending_push', updated_at = ?1 WHERE id = ?2 AND lifecycle = 'active'";
const NEXT_TRACE_SEQ_SQL: &str =
    "SELECT COALESCE(MAX(seq), -1) + 1 FROM trace_points WHERE journey_id = ?1";
const INSERT_TRACE_POINT_SQL: &str = "INSERT INTO trace_points (journey_id, seq, latitude, longitude, recorded_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_TRACE_SQL: &str = "SELECT latitude, longitude, recorded_at FROM trace_points WHERE journey_id = ?1 ORDER BY seq";

impl super::Database {
    /// Helper function to construct a journey from a database row
    fn build_journey_from_row(row: &rusqlite::Row) -> rusqlite::Result<Journey> {
        Ok(Journey {
            id: id_at(row, 0)?,
            plan_id: row.get::<_, Option<i64>>(1)?.map(|id| id as u64),
            started_at: timestamp_at(row, 2)?,
            is_current: row.get(3)?,
            completed: row.get(4)?,
            lifecycle: parsed_at::<Lifecycle>(row, 5)?,
            sync_state: parsed_at::<SyncState>(row, 6)?,
            created_at: timestamp_at(row, 7)?,
            updated_at: timestamp_at(row, 8)?,
        })
    }

    fn select_active_journey(tx: &Transaction, journey_id: u64) -> Result<Journey> {
        tx.query_row(
            &format!("SELECT {JOURNEY_COLUMNS} FROM journeys WHERE id = ?1 AND lifecycle = 'active'"),
            params![journey_id as i64],
            Self::build_journey_from_row,
        )
        .optional()
        .db_context("Failed to query journey")?
        .ok_or(FootholdError::JourneyNotFound { id: journey_id })
    }

    /// Starts a new journey, optionally following a plan, and makes it the
    /// only current journey.
    pub fn start_journey(
        &mut self,
        plan_id: Option<u64>,
        started_at: Timestamp,
    ) -> Result<Journey> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if let Some(plan_id) = plan_id {
            Self::ensure_plan_active(&tx, plan_id)?;
        }

        let now_str = Timestamp::now().to_string();

        tx.execute(CLEAR_CURRENT_SQL, params![&now_str])
            .db_context("Failed to clear current journey")?;

        tx.execute(
            INSERT_JOURNEY_SQL,
            params![
                plan_id.map(|id| id as i64),
                started_at.to_string(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert journey")?;

        let id = tx.last_insert_rowid() as u64;
        let journey = Self::select_active_journey(&tx, id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(journey)
    }

    /// Retrieves a non-deleted journey by its ID.
    pub fn get_journey(&self, journey_id: u64) -> Result<Option<Journey>> {
        let journey = self
            .connection
            .query_row(
                &format!(
                    "SELECT {JOURNEY_COLUMNS} FROM journeys WHERE id = ?1 AND lifecycle = 'active'"
                ),
                params![journey_id as i64],
                Self::build_journey_from_row,
            )
            .optional()
            .db_context("Failed to get journey")?;

        Ok(journey)
    }

    /// Retrieves the journey currently being tracked, if any.
    pub fn current_journey(&self) -> Result<Option<Journey>> {
        let journey = self
            .connection
            .query_row(
                &format!(
                    "SELECT {JOURNEY_COLUMNS} FROM journeys WHERE is_current = 1 AND lifecycle = 'active' ORDER BY id DESC LIMIT 1"
                ),
                [],
                Self::build_journey_from_row,
            )
            .optional()
            .db_context("Failed to get current journey")?;

        Ok(journey)
    }

    /// Appends a position to a journey's path trace.
    ///
    /// Traces are append-only and only grow while the journey is recording;
    /// completed or deleted journeys reject new points.
    pub fn record_trace_point(
        &mut self,
        journey_id: u64,
        coordinate: Coordinate,
        recorded_at: Timestamp,
    ) -> Result<TracePoint> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let journey = Self::select_active_journey(&tx, journey_id)?;
        if !journey.is_recording() {
            return Err(FootholdError::JourneyClosed { id: journey_id });
        }

        let seq: i64 = tx
            .query_row(NEXT_TRACE_SEQ_SQL, params![journey_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next trace sequence")?;

        tx.execute(
            INSERT_TRACE_POINT_SQL,
            params![
                journey_id as i64,
                seq,
                coordinate.latitude,
                coordinate.longitude,
                recorded_at.to_string()
            ],
        )
        .db_context("Failed to insert trace point")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TracePoint {
            coordinate,
            recorded_at,
        })
    }

    /// Marks a journey completed and stops tracking it.
    pub fn complete_journey(&mut self, journey_id: u64) -> Result<Journey> {
        self.close_journey(journey_id, COMPLETE_JOURNEY_SQL, "Failed to complete journey")
    }

    /// Stops tracking a journey without marking it completed.
    pub fn end_journey(&mut self, journey_id: u64) -> Result<Journey> {
        self.close_journey(journey_id, END_JOURNEY_SQL, "Failed to end journey")
    }

    fn close_journey(&mut self, journey_id: u64, sql: &str, message: &str) -> Result<Journey> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        Self::select_active_journey(&tx, journey_id)?;

        let now_str = Timestamp::now().to_string();
        tx.execute(sql, params![&now_str, journey_id as i64])
            .db_context(message)?;

        let journey = Self::select_active_journey(&tx, journey_id)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(journey)
    }

    /// Soft-deletes a journey. Its trace is retained but no longer counted.
    pub fn delete_journey(&mut self, journey_id: u64) -> Result<()> {
        let now_str = Timestamp::now().to_string();
        let changed = self
            .connection
            .execute(SOFT_DELETE_JOURNEY_SQL, params![&now_str, journey_id as i64])
            .db_context("Failed to delete journey")?;

        if changed == 0 {
            return Err(FootholdError::JourneyNotFound { id: journey_id });
        }

        Ok(())
    }

    /// Lists a plan's non-deleted journeys, most recently started first.
    pub fn get_plan_journeys(&self, plan_id: u64) -> Result<Vec<Journey>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {JOURNEY_COLUMNS} FROM journeys WHERE plan_id = ?1 AND lifecycle = 'active' ORDER BY id DESC"
            ))
            .db_context("Failed to prepare query")?;

        let mut journeys = stmt
            .query_map(params![plan_id as i64], Self::build_journey_from_row)
            .db_context("Failed to query journeys")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch journeys")?;

        // Text timestamps do not sort reliably in SQL; order on the parsed
        // values, keeping newest-inserted first among equal start times.
        journeys.sort_by(|a, b| b.started_at.cmp(&a.started_at));

        Ok(journeys)
    }

    /// Reads a journey's path trace. `None` when no point was ever recorded.
    pub fn get_path_trace(&self, journey_id: u64) -> Result<Option<PathTrace>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_TRACE_SQL)
            .db_context("Failed to prepare query")?;

        let points = stmt
            .query_map(params![journey_id as i64], |row| {
                Ok(TracePoint {
                    coordinate: Coordinate::new(row.get(0)?, row.get(1)?),
                    recorded_at: timestamp_at(row, 2)?,
                })
            })
            .db_context("Failed to query trace points")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch trace points")?;

        if points.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PathTrace::new(points)))
        }
    }
}
