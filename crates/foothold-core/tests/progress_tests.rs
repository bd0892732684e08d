mod common;

use common::{create_test_planner, ORIGIN};
use foothold_core::{
    geo::Coordinate,
    params::{CreatePlan, Id, RecordPosition, StartJourney, TargetCreate},
    Database, FootholdError, GenerationSettings, Planner, ProgressAnalyzer,
};
use jiff::{Timestamp, ToSpan};

async fn plan_with_targets(planner: &Planner, points: &[Coordinate]) -> u64 {
    let plan = planner
        .create_plan(&CreatePlan {
            name: "Progress".to_string(),
        })
        .await
        .unwrap();

    for (i, point) in points.iter().enumerate() {
        planner
            .add_target(&TargetCreate {
                plan_id: plan.id,
                name: format!("Target {i}"),
                latitude: point.latitude,
                longitude: point.longitude,
                wait_time_seconds: 30,
            })
            .await
            .unwrap();
    }

    plan.id
}

async fn walk(planner: &Planner, plan_id: u64, path: &[Coordinate], complete: bool) -> u64 {
    let journey = planner
        .start_journey(&StartJourney {
            plan_id: Some(plan_id),
        })
        .await
        .unwrap();

    for point in path {
        planner
            .record_position(&RecordPosition {
                journey_id: journey.id,
                latitude: point.latitude,
                longitude: point.longitude,
            })
            .await
            .unwrap();
    }

    let id = Id { id: journey.id };
    if complete {
        planner.complete_journey(&id).await.unwrap();
    } else {
        planner.end_journey(&id).await.unwrap();
    }
    journey.id
}

#[tokio::test]
async fn test_two_attempts_aggregate() {
    let (_temp_dir, planner) = create_test_planner().await;
    let targets = [
        ORIGIN.offset_north(150.0),
        ORIGIN.offset_north(450.0),
        ORIGIN.offset_east(700.0),
    ];
    let plan_id = plan_with_targets(&planner, &targets).await;

    walk(
        &planner,
        plan_id,
        &[
            ORIGIN,
            targets[0].offset_east(10.0),
            targets[1].offset_north(-20.0),
            ORIGIN.offset_east(300.0),
        ],
        false,
    )
    .await;
    walk(
        &planner,
        plan_id,
        &[targets[0], targets[1], targets[2].offset_north(5.0)],
        true,
    )
    .await;

    let progress = planner
        .plan_progress(&ProgressAnalyzer::default(), &Id { id: plan_id })
        .await
        .unwrap();

    assert_eq!(progress.total_targets, 3);
    assert_eq!(progress.total_attempts, 2);
    assert_eq!(progress.completed_attempts, 1);
    assert_eq!(progress.best_targets_reached, 3);
    assert_eq!(progress.average_targets_reached, 2.5);
    assert!(progress.last_attempt_date.is_some());

    let reached: Vec<u32> = progress.attempts.iter().map(|a| a.targets_reached).collect();
    let mut sorted = reached.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![2, 3]);
}

#[tokio::test]
async fn test_attempts_ordered_by_start_time() {
    let (temp_dir, planner) = create_test_planner().await;
    let target = ORIGIN.offset_north(300.0);
    let plan_id = plan_with_targets(&planner, &[target]).await;

    let base = Timestamp::from_second(1_700_000_000).unwrap();
    let mut db = Database::new(temp_dir.path().join("test.db")).unwrap();

    let late = db
        .start_journey(Some(plan_id), base.checked_add(2.hours()).unwrap())
        .unwrap();
    let early = db.start_journey(Some(plan_id), base).unwrap();
    db.record_trace_point(early.id, target, base).unwrap();
    db.complete_journey(early.id).unwrap();
    db.end_journey(late.id).unwrap();

    let progress = ProgressAnalyzer::default()
        .plan_progress(&planner, plan_id)
        .await
        .unwrap();

    assert_eq!(progress.attempts[0].journey_id, late.id);
    assert_eq!(progress.attempts[1].journey_id, early.id);
    assert_eq!(progress.last_attempt_date, Some(late.started_at));
    assert_eq!(progress.attempts[0].targets_reached, 0);
    assert_eq!(progress.attempts[1].reached_target_ids.len(), 1);
}

#[tokio::test]
async fn test_deleted_journeys_and_targets_are_not_counted() {
    let (_temp_dir, planner) = create_test_planner().await;
    let targets = [ORIGIN.offset_north(200.0), ORIGIN.offset_east(400.0)];
    let plan_id = plan_with_targets(&planner, &targets).await;

    let discarded = walk(&planner, plan_id, &targets, true).await;
    planner.delete_journey(&Id { id: discarded }).await.unwrap();
    walk(&planner, plan_id, &targets, false).await;

    let second_target = planner.list_targets(&Id { id: plan_id }).await.unwrap()[1].id;
    planner.remove_target(&Id { id: second_target }).await.unwrap();

    let progress = planner
        .plan_progress(&ProgressAnalyzer::default(), &Id { id: plan_id })
        .await
        .unwrap();
    assert_eq!(progress.total_attempts, 1);
    assert_eq!(progress.completed_attempts, 0);
    assert_eq!(progress.total_targets, 1);
    assert_eq!(progress.best_targets_reached, 1);
}

#[tokio::test]
async fn test_journey_without_trace_reaches_nothing() {
    let (_temp_dir, planner) = create_test_planner().await;
    let plan_id = plan_with_targets(&planner, &[ORIGIN.offset_north(100.0)]).await;

    walk(&planner, plan_id, &[], true).await;

    let progress = planner
        .plan_progress(&ProgressAnalyzer::default(), &Id { id: plan_id })
        .await
        .unwrap();
    assert_eq!(progress.total_attempts, 1);
    assert_eq!(progress.best_targets_reached, 0);
    assert_eq!(progress.average_targets_reached, 0.0);
}

#[tokio::test]
async fn test_custom_reached_radius() {
    let (_temp_dir, planner) = create_test_planner().await;
    let target = ORIGIN.offset_north(500.0);
    let plan_id = plan_with_targets(&planner, &[target]).await;
    walk(&planner, plan_id, &[target.offset_east(45.0)], true).await;

    let strict = planner
        .plan_progress(&ProgressAnalyzer::default(), &Id { id: plan_id })
        .await
        .unwrap();
    let settings = GenerationSettings {
        reached_radius_m: 50.0,
        ..Default::default()
    };
    let lenient = planner
        .plan_progress(&ProgressAnalyzer::from_settings(&settings), &Id { id: plan_id })
        .await
        .unwrap();

    assert_eq!(strict.best_targets_reached, 0);
    assert_eq!(lenient.best_targets_reached, 1);
}

#[tokio::test]
async fn test_progress_for_missing_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    let result = planner
        .plan_progress(&ProgressAnalyzer::default(), &Id { id: 77 })
        .await;
    assert!(matches!(result, Err(FootholdError::PlanNotFound { id: 77 })));
}
