//! End-to-end board flow over the fixture source.

use chrono::NaiveDate;
use edusync_core::board::DEFAULT_QUEUE_SIZE;
use edusync_core::{
    load_board, reduce, refresh_board, BoardAction, DueStatus, EnergyLevel, FixtureSource,
    LoadStatus, Priority, Ranker, RankingConfig, TaskRecord, TaskSource,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 29).unwrap()
}

#[tokio::test]
async fn demo_board_recommends_presentation() {
    let (board, rejected) = load_board(&FixtureSource::demo(today()), "demo").await.unwrap();
    assert!(rejected.is_empty());
    assert_eq!(board.status(), &LoadStatus::Loaded);
    assert_eq!(board.energy(), EnergyLevel::Medium);

    let view = board.view(today(), &Ranker::new(), DEFAULT_QUEUE_SIZE);
    // Presentation (High, +2): 3 + 8 = 11; Chapter 5 (High, +3): 3 + 7 = 10;
    // Essay and Lab Report tie at 7 and keep input order
    let order: Vec<_> = view.ranked.iter().map(|e| e.ranked.task.id.as_str()).collect();
    assert_eq!(order, vec!["4", "1", "2", "3", "5"]);
    assert_eq!(view.next.as_ref().unwrap().due_status, DueStatus::Soon { days: 2 });
    assert_eq!(view.stats.total, 5);
    assert_eq!(view.stats.urgent, 2);
    assert_eq!(view.stats.completed, 0);
}

#[tokio::test]
async fn low_energy_prefers_light_work() {
    let source = FixtureSource::demo(today()).with_energy(EnergyLevel::Low);
    let (board, _) = load_board(&source, "demo").await.unwrap();
    assert_eq!(board.energy(), EnergyLevel::Low);

    let view = board.view(today(), &Ranker::new(), DEFAULT_QUEUE_SIZE);
    // Lab Report (Low, +4): 3 + 6 = 9 ties Presentation (High, +2): 1 + 8 = 9
    // and comes first in the input
    assert_eq!(view.next.unwrap().ranked.task.id, "3");
}

#[tokio::test]
async fn refresh_failure_keeps_previous_tasks() {
    let (board, _) = load_board(&FixtureSource::demo(today()), "demo").await.unwrap();
    let (failed, rejected) =
        refresh_board(&board, &FixtureSource::unavailable("maintenance"), "demo").await;

    assert!(rejected.is_empty());
    assert_eq!(failed.tasks().len(), 5);
    assert!(matches!(failed.status(), LoadStatus::Failed(msg) if msg.contains("maintenance")));

    let (recovered, _) = refresh_board(&failed, &FixtureSource::demo(today()), "demo").await;
    assert_eq!(recovered.status(), &LoadStatus::Loaded);
}

#[tokio::test]
async fn refresh_keeps_user_filters() {
    let (board, _) = load_board(&FixtureSource::demo(today()), "demo").await.unwrap();
    let board = reduce(&board, BoardAction::SetPriorityFilter(Some(Priority::High)));
    let (refreshed, _) = refresh_board(&board, &FixtureSource::demo(today()), "demo").await;

    let view = refreshed.view(today(), &Ranker::new(), DEFAULT_QUEUE_SIZE);
    assert_eq!(view.ranked.len(), 2);
    assert_eq!(view.filtered_out, 3);
}

#[tokio::test]
async fn malformed_fixture_records_are_reported() {
    let mut records: Vec<TaskRecord> = FixtureSource::demo(today())
        .list_tasks("demo")
        .await
        .unwrap();
    records[0].due_date = "31/07/2025".into();

    let (board, rejected) = load_board(&FixtureSource::new(records), "demo").await.unwrap();
    assert_eq!(board.tasks().len(), 4);
    assert_eq!(rejected[0].id, "1");
}

#[tokio::test]
async fn capped_overdue_ranking_from_config() {
    let overdue = edusync_core::Task::new(
        "late",
        "Old Essay",
        "English",
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        Priority::Low,
    );
    let fresh = edusync_core::Task::new("fresh", "Quiz", "Math", today(), Priority::High);
    let (board, _) = load_board(&FixtureSource::from_tasks(&[overdue, fresh]), "demo")
        .await
        .unwrap();

    let uncapped = board.view(today(), &Ranker::new(), 5);
    assert_eq!(uncapped.next.unwrap().ranked.task.id, "late");

    let capped = Ranker::with_config(RankingConfig {
        cap_overdue_bonus: true,
        ..Default::default()
    });
    let view = board.view(today(), &capped, 5);
    // late: 1 + 10, fresh: 3 + 10
    assert_eq!(view.next.unwrap().ranked.task.id, "fresh");
}
