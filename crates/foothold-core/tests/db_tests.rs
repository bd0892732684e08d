use foothold_core::{
    geo::Coordinate, Database, FootholdError, Lifecycle, StagedTarget, SyncState,
    UpdateTargetRequest,
};
use jiff::Timestamp;
use tempfile::NamedTempFile;

const ORIGIN: Coordinate = Coordinate::new(35.0116, 135.7681);

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn staged(name: &str, meters_north: f64, wait: u32) -> StagedTarget {
    StagedTarget {
        name: name.to_string(),
        coordinate: ORIGIN.offset_north(meters_north),
        wait_time_seconds: wait,
    }
}

fn active_names(db: &Database, plan_id: u64) -> Vec<String> {
    db.get_targets(plan_id)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect()
}

fn assert_contiguous(db: &Database, plan_id: u64) {
    let orders: Vec<u32> = db
        .get_targets(plan_id)
        .unwrap()
        .iter()
        .map(|t| t.order_index)
        .collect();
    let expected: Vec<u32> = (0..orders.len() as u32).collect();
    assert_eq!(orders, expected);
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // Reopening applies the schema idempotently
    Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_in_memory_database() {
    let mut db = Database::in_memory().unwrap();
    let plan = db.create_plan("Scratch").unwrap();
    assert!(db.get_plan(plan.id).unwrap().is_some());
}

#[test]
fn test_create_plan_allows_empty_name() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db.create_plan("").expect("Failed to create plan");
    assert!(plan.id > 0);
    assert_eq!(plan.name, "");
    assert_eq!(plan.lifecycle, Lifecycle::Active);
    assert_eq!(plan.sync_state, SyncState::PendingPush);
}

#[test]
fn test_list_plans_newest_first() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.create_plan("First").unwrap();
    let second = db.create_plan("Second").unwrap();
    let removed = db.create_plan("Removed").unwrap();
    db.delete_plan(removed.id).unwrap();

    let ids: Vec<u64> = db.list_plans().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn test_add_and_insert_targets_keep_order() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Ordering").unwrap();

    db.add_target(plan.id, &staged("B", 200.0, 30)).unwrap();
    db.add_target(plan.id, &staged("D", 400.0, 30)).unwrap();
    db.insert_target(plan.id, 0, &staged("A", 100.0, 30)).unwrap();
    db.insert_target(plan.id, 2, &staged("C", 300.0, 30)).unwrap();
    db.insert_target(plan.id, 4, &staged("E", 500.0, 30)).unwrap();

    assert_eq!(active_names(&db, plan.id), vec!["A", "B", "C", "D", "E"]);
    assert_contiguous(&db, plan.id);
}

#[test]
fn test_insert_target_out_of_range() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Ordering").unwrap();
    db.add_target(plan.id, &staged("Only", 100.0, 30)).unwrap();

    match db.insert_target(plan.id, 5, &staged("Late", 200.0, 30)) {
        Err(FootholdError::InvalidInput { field, reason }) => {
            assert_eq!(field, "position");
            assert!(reason.contains("out of range"));
        }
        other => panic!("Expected InvalidInput error, got {other:?}"),
    }
}

#[test]
fn test_add_target_to_missing_or_deleted_plan() {
    let (_temp_file, mut db) = create_test_db();

    assert!(matches!(
        db.add_target(99, &staged("Nowhere", 100.0, 30)),
        Err(FootholdError::PlanNotFound { id: 99 })
    ));

    let plan = db.create_plan("Gone").unwrap();
    db.delete_plan(plan.id).unwrap();
    assert!(matches!(
        db.add_target(plan.id, &staged("Late", 100.0, 30)),
        Err(FootholdError::PlanNotFound { .. })
    ));
}

#[test]
fn test_remove_target_reindexes_survivors() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Removal").unwrap();

    let a = db.add_target(plan.id, &staged("A", 100.0, 30)).unwrap();
    let b = db.add_target(plan.id, &staged("B", 200.0, 45)).unwrap();
    db.add_target(plan.id, &staged("C", 300.0, 60)).unwrap();

    db.remove_target(b.id).unwrap();
    assert_eq!(active_names(&db, plan.id), vec!["A", "C"]);
    assert_contiguous(&db, plan.id);

    db.remove_target(a.id).unwrap();
    assert_eq!(active_names(&db, plan.id), vec!["C"]);
    assert_contiguous(&db, plan.id);

    assert!(db.get_target(b.id).unwrap().is_none());
    assert!(matches!(
        db.remove_target(b.id),
        Err(FootholdError::TargetNotFound { .. })
    ));

    let all = db.get_targets_including_deleted(plan.id).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_swap_targets() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Swap").unwrap();
    let other = db.create_plan("Other").unwrap();

    let a = db.add_target(plan.id, &staged("A", 100.0, 30)).unwrap();
    let b = db.add_target(plan.id, &staged("B", 200.0, 30)).unwrap();
    let foreign = db.add_target(other.id, &staged("X", 300.0, 30)).unwrap();

    db.swap_targets(a.id, b.id).unwrap();
    assert_eq!(active_names(&db, plan.id), vec!["B", "A"]);

    match db.swap_targets(a.id, foreign.id) {
        Err(FootholdError::InvalidInput { field, .. }) => assert_eq!(field, "target_ids"),
        other => panic!("Expected InvalidInput error, got {other:?}"),
    }
}

#[test]
fn test_update_target_partial() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Update").unwrap();
    let target = db.add_target(plan.id, &staged("Old name", 100.0, 30)).unwrap();

    let moved = ORIGIN.offset_east(250.0);
    let updated = db
        .update_target(
            target.id,
            UpdateTargetRequest {
                name: Some("New name".to_string()),
                coordinate: Some(moved),
                wait_time_seconds: None,
            },
        )
        .unwrap();

    assert_eq!(updated.name, "New name");
    assert_eq!(updated.coordinate, moved);
    assert_eq!(updated.wait_time_seconds, 30);
    assert_eq!(updated.order_index, 0);
}

#[test]
fn test_replace_targets_swaps_whole_batch() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("").unwrap();

    db.add_target(plan.id, &staged("Manual", 100.0, 10)).unwrap();

    let batch = vec![
        staged("G1", 120.0, 30),
        staged("G2", 240.0, 45),
        staged("G3", 360.0, 60),
    ];
    let created = db.replace_targets(plan.id, &batch, "Fallback").unwrap();

    let names: Vec<&str> = created.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["G1", "G2", "G3"]);
    let waits: Vec<u32> = created.iter().map(|t| t.wait_time_seconds).collect();
    assert_eq!(waits, vec![30, 45, 60]);
    assert_contiguous(&db, plan.id);

    let plan = db.get_plan(plan.id).unwrap().unwrap();
    assert_eq!(plan.name, "Fallback");

    let deleted: Vec<String> = db
        .get_targets_including_deleted(plan.id)
        .unwrap()
        .into_iter()
        .filter(|t| !t.lifecycle.is_active())
        .map(|t| t.name)
        .collect();
    assert_eq!(deleted, vec!["Manual"]);
}

#[test]
fn test_replace_targets_on_missing_plan_changes_nothing() {
    let (_temp_file, mut db) = create_test_db();
    let result = db.replace_targets(42, &[staged("G1", 120.0, 30)], "Fallback");
    assert!(matches!(result, Err(FootholdError::PlanNotFound { id: 42 })));
    assert!(db.get_targets_including_deleted(42).unwrap().is_empty());
}

#[test]
fn test_delete_plan_soft_deletes_targets() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Cascade").unwrap();
    db.add_target(plan.id, &staged("A", 100.0, 30)).unwrap();
    db.add_target(plan.id, &staged("B", 200.0, 30)).unwrap();

    db.delete_plan(plan.id).unwrap();

    assert!(db.get_plan(plan.id).unwrap().is_none());
    assert!(db.get_targets(plan.id).unwrap().is_empty());
    let retained = db.get_targets_including_deleted(plan.id).unwrap();
    assert_eq!(retained.len(), 2);
    assert!(retained.iter().all(|t| t.lifecycle == Lifecycle::Deleted));
}

#[test]
fn test_sync_state_tracking() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Sync").unwrap();
    db.add_target(plan.id, &staged("A", 100.0, 30)).unwrap();

    assert_eq!(db.plans_pending_sync().unwrap().len(), 1);

    db.mark_plan_synced(plan.id).unwrap();
    assert!(db.plans_pending_sync().unwrap().is_empty());
    let synced = db.get_plan(plan.id).unwrap().unwrap();
    assert_eq!(synced.sync_state, SyncState::Clean);
    assert!(synced.targets.iter().all(|t| t.sync_state == SyncState::Clean));

    db.rename_plan(plan.id, "Sync again").unwrap();
    let pending = db.plans_pending_sync().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "Sync again");

    // Deletions still need pushing
    db.mark_plan_synced(plan.id).unwrap();
    db.delete_plan(plan.id).unwrap();
    let pending = db.plans_pending_sync().unwrap();
    assert_eq!(pending[0].lifecycle, Lifecycle::Deleted);

    assert!(matches!(
        db.mark_plan_synced(404),
        Err(FootholdError::PlanNotFound { id: 404 })
    ));
}

#[test]
fn test_only_one_current_journey() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Journeys").unwrap();

    let first = db.start_journey(Some(plan.id), Timestamp::now()).unwrap();
    let second = db.start_journey(None, Timestamp::now()).unwrap();

    let current = db.current_journey().unwrap().expect("a current journey");
    assert_eq!(current.id, second.id);
    assert_eq!(current.plan_id, None);
    assert!(!db.get_journey(first.id).unwrap().unwrap().is_current);
}

#[test]
fn test_start_journey_for_missing_plan() {
    let (_temp_file, mut db) = create_test_db();
    assert!(matches!(
        db.start_journey(Some(5), Timestamp::now()),
        Err(FootholdError::PlanNotFound { id: 5 })
    ));
}

#[test]
fn test_trace_is_append_only_while_recording() {
    let (_temp_file, mut db) = create_test_db();
    let journey = db.start_journey(None, Timestamp::now()).unwrap();

    assert!(db.get_path_trace(journey.id).unwrap().is_none());

    for meters in [0.0, 10.0, 20.0] {
        db.record_trace_point(journey.id, ORIGIN.offset_north(meters), Timestamp::now())
            .unwrap();
    }

    let trace = db.get_path_trace(journey.id).unwrap().unwrap();
    assert_eq!(trace.len(), 3);
    assert_eq!(trace.points[2].coordinate, ORIGIN.offset_north(20.0));

    db.complete_journey(journey.id).unwrap();
    assert!(matches!(
        db.record_trace_point(journey.id, ORIGIN, Timestamp::now()),
        Err(FootholdError::JourneyClosed { .. })
    ));
}

#[test]
fn test_end_journey_without_completing() {
    let (_temp_file, mut db) = create_test_db();
    let journey = db.start_journey(None, Timestamp::now()).unwrap();

    let ended = db.end_journey(journey.id).unwrap();
    assert!(!ended.is_current);
    assert!(!ended.completed);
    assert!(db.current_journey().unwrap().is_none());
}

#[test]
fn test_deleted_journey_hidden() {
    let (_temp_file, mut db) = create_test_db();
    let plan = db.create_plan("Hidden").unwrap();
    let journey = db.start_journey(Some(plan.id), Timestamp::now()).unwrap();

    db.delete_journey(journey.id).unwrap();

    assert!(db.get_journey(journey.id).unwrap().is_none());
    assert!(db.get_plan_journeys(plan.id).unwrap().is_empty());
    assert!(matches!(
        db.record_trace_point(journey.id, ORIGIN, Timestamp::now()),
        Err(FootholdError::JourneyNotFound { .. })
    ));
    assert!(matches!(
        db.delete_journey(journey.id),
        Err(FootholdError::JourneyNotFound { .. })
    ));
}
