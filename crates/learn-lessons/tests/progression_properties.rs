//! Progression and validation properties against the real seeded dataset.

use learn_core::events::ProgressEventKind;
use learn_core::progression::{LessonPhase, ProgressionState};
use learn_core::rule::RuleFailure;
use learn_core::{QueryExecutor, Row};
use learn_db::TutorDb;
use learn_lessons::{Catalog, Direction, ProgressionController};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tokio::sync::mpsc;

async fn db() -> TutorDb {
    TutorDb::in_memory().await.expect("seeded database")
}

fn at(lesson_id: u32) -> ProgressionController {
    ProgressionController::starting_at(Catalog::builtin(), lesson_id).expect("lesson exists")
}

#[tokio::test]
async fn every_reference_query_passes_its_own_rule() {
    let db = db().await;
    for lesson in Catalog::builtin().iter() {
        let task = &lesson.sql_task;
        let result = db
            .execute(&task.reference_query)
            .await
            .unwrap_or_else(|e| panic!("lesson {} reference fails: {e}", lesson.id));
        let outcome = task.rule.evaluate(&task.reference_query, &result);
        assert!(
            outcome.passed,
            "lesson {} rejects its reference: {:?}",
            lesson.id, outcome.failures
        );
    }
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(7)]
fn next_moves_forward_and_resets(#[case] from: u32) {
    let mut ctl = at(from);
    assert_eq!(ctl.navigate(Direction::Next), Some(from + 1));
    assert_eq!(ctl.state(), &ProgressionState::new(from + 1));
}

#[rstest]
#[case(2)]
#[case(5)]
#[case(8)]
fn prev_moves_back_and_resets(#[case] from: u32) {
    let mut ctl = at(from);
    assert_eq!(ctl.navigate(Direction::Prev), Some(from - 1));
    assert_eq!(ctl.state(), &ProgressionState::new(from - 1));
}

#[rstest]
#[case(1, Direction::Prev)]
#[case(8, Direction::Next)]
fn navigation_past_either_end_is_a_no_op(#[case] from: u32, #[case] direction: Direction) {
    let mut ctl = at(from);
    assert_eq!(ctl.navigate(direction), None);
    assert_eq!(ctl.state().active_lesson_id(), from);
}

#[rstest]
#[case(0)]
#[case(9)]
#[case(u32::MAX)]
fn selecting_outside_the_catalog_is_a_no_op(#[case] target: u32) {
    let mut ctl = at(3);
    assert_eq!(ctl.select_lesson(target), None);
    assert_eq!(ctl.state(), &ProgressionState::new(3));
}

#[tokio::test]
async fn selecting_a_lesson_resets_flags() {
    let db = db().await;
    let mut ctl = at(1);
    assert!(ctl.submit_query(&db, "SELECT * FROM movies;").await.passed);
    assert_eq!(ctl.state().phase(), LessonPhase::SqlPassed);

    assert_eq!(ctl.select_lesson(6), Some(6));
    assert_eq!(ctl.state(), &ProgressionState::new(6));
    assert!(ctl.companion().is_none());
}

#[tokio::test]
async fn lesson_one_reference_passes_and_completes_once() {
    let db = db().await;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ctl = ProgressionController::new(Catalog::builtin()).with_events(tx);

    let first = ctl.submit_query(&db, "SELECT * FROM movies;").await;
    assert_eq!(first.result.as_ref().map(|r| r.len()), Ok(14));
    assert!(first.passed && first.completed);
    assert!(ctl.state().companion_step_unlocked());

    let second = ctl.submit_query(&db, "SELECT * FROM movies;").await;
    assert!(second.passed && !second.completed);

    let mut completions = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let ProgressEventKind::LessonCompleted { lesson_id, .. } = event.kind {
            completions.push(lesson_id);
        }
    }
    assert_eq!(completions, vec![1]);
}

#[rstest]
#[case("select * from movies;")]
#[case("SELECT   *\n  FROM movies ;")]
#[case("Select * From Movies;")]
#[tokio::test]
async fn lesson_one_is_case_and_whitespace_insensitive(#[case] query: &str) {
    let db = db().await;
    let mut ctl = at(1);
    assert!(ctl.submit_query(&db, query).await.passed);
}

#[tokio::test]
async fn lesson_one_requires_the_semicolon() {
    let db = db().await;
    let mut ctl = at(1);
    let submission = ctl.submit_query(&db, "SELECT * FROM movies").await;

    assert_eq!(submission.result.as_ref().map(|r| r.len()), Ok(14));
    assert!(!submission.passed);
    let failures = submission.outcome.expect("judged").failures;
    assert_eq!(
        failures,
        vec![RuleFailure::MissingKeyword {
            keyword: ";".to_string()
        }]
    );
    assert_eq!(ctl.state().phase(), LessonPhase::Unattempted);
}

#[tokio::test]
async fn lesson_two_checks_the_column_shape() {
    let db = db().await;
    let mut ctl = at(2);

    let good = ctl.submit_query(&db, "SELECT title, year FROM movies;").await;
    assert!(good.passed);
    let rows = good.result.expect("rows");
    assert!(
        rows.iter()
            .all(|row: &Row| row.len() == 2 && row.columns().eq(["title", "year"]))
    );

    let mut ctl = at(2);
    let star = ctl.submit_query(&db, "SELECT * FROM movies;").await;
    assert!(!star.result.expect("rows").is_empty());
    assert!(!star.passed);
}

#[tokio::test]
async fn lesson_five_rejects_ascending_order() {
    let db = db().await;
    let mut ctl = at(5);

    let ascending = ctl
        .submit_query(
            &db,
            "SELECT title, length_minutes FROM movies ORDER BY length_minutes DESC LIMIT 3;"
                .replace("DESC", "ASC")
                .as_str(),
        )
        .await;
    assert!(!ascending.passed);

    let descending = ctl
        .submit_query(
            &db,
            "SELECT title, length_minutes FROM movies ORDER BY length_minutes DESC LIMIT 3;",
        )
        .await;
    assert!(descending.passed);
    let lengths: Vec<String> = descending
        .result
        .expect("rows")
        .iter()
        .filter_map(|row| row.get("length_minutes").map(ToString::to_string))
        .collect();
    assert_eq!(lengths, vec!["117", "116", "115"]);
}

#[tokio::test]
async fn right_technique_wrong_result_fails() {
    let db = db().await;
    let mut ctl = at(5);
    let off_by_one = ctl
        .submit_query(
            &db,
            "SELECT title, length_minutes FROM movies ORDER BY length_minutes DESC LIMIT 4;",
        )
        .await;
    assert!(!off_by_one.passed);
}

#[tokio::test]
async fn right_result_wrong_technique_fails() {
    let db = db().await;
    let mut ctl = at(4);
    let by_id = ctl
        .submit_query(
            &db,
            "SELECT title, director FROM movies WHERE id IN (1, 2, 3, 7, 12);",
        )
        .await;
    assert_eq!(by_id.result.as_ref().map(|r| r.len()), Ok(5));
    assert!(!by_id.passed);
}

#[tokio::test]
async fn engine_error_is_data_not_a_fault() {
    let db = db().await;
    let mut ctl = at(3);
    let broken = ctl.submit_query(&db, "SELECT title FROM movie WHERE;").await;
    assert!(broken.result.is_err());
    assert!(!broken.passed);
    assert_eq!(ctl.state(), &ProgressionState::new(3));

    let fixed = ctl
        .submit_query(&db, "SELECT title, year FROM movies WHERE year > 2005;")
        .await;
    assert!(fixed.passed);
    assert_eq!(ctl.state().attempts(), 1);
}

#[tokio::test]
async fn independent_seeds_produce_identical_tables() {
    let first = db().await;
    let second = db().await;
    for table in learn_db::dataset::TABLES {
        let query = format!("SELECT * FROM {}", table.name);
        let a = first.execute(&query).await.unwrap();
        let b = second.execute(&query).await.unwrap();
        assert_eq!(a, b, "table {} differs", table.name);
        assert_eq!(a.len(), table.rows);
    }
}
