//! Behaviour of learner query execution against the seeded dataset.

use learn_core::{QueryExecutor, ScalarValue};
use learn_db::TutorDb;
use pretty_assertions::assert_eq;
use rstest::rstest;

async fn db() -> TutorDb {
    TutorDb::in_memory().await.expect("in-memory database opens")
}

#[tokio::test]
async fn select_star_returns_every_movie_in_engine_order() {
    let db = db().await;
    let result = db.execute("SELECT * FROM movies;").await.unwrap();

    assert_eq!(
        result.columns,
        vec![
            "id",
            "title",
            "director",
            "year",
            "length_minutes",
            "language",
            "worldwide_gross_millions"
        ]
    );
    assert_eq!(result.len(), 14);
    assert_eq!(
        result.rows[0].get("title"),
        Some(&ScalarValue::Text("Toy Story".into()))
    );
    assert_eq!(
        result.rows[13].get("title"),
        Some(&ScalarValue::Text("Monsters University".into()))
    );
}

#[tokio::test]
async fn values_keep_their_engine_types() {
    let db = db().await;
    let result = db
        .execute("SELECT id, title, worldwide_gross_millions, NULL AS missing FROM movies WHERE id = 11")
        .await
        .unwrap();

    let row = &result.rows[0];
    assert_eq!(row.get("id"), Some(&ScalarValue::Integer(11)));
    assert_eq!(row.get("title"), Some(&ScalarValue::Text("Toy Story 3".into())));
    assert_eq!(row.get("worldwide_gross_millions"), Some(&ScalarValue::Real(1067.0)));
    assert_eq!(row.get("missing"), Some(&ScalarValue::Null));
}

#[tokio::test]
async fn empty_result_keeps_columns() {
    let db = db().await;
    let result = db
        .execute("SELECT title, year FROM movies WHERE year < 1900")
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.columns, vec!["title", "year"]);
}

#[tokio::test]
async fn duplicate_column_names_collapse_to_last_value() {
    let db = db().await;
    let result = db.execute("SELECT 1 AS n, 2 AS n, 3 AS m").await.unwrap();
    assert_eq!(result.columns, vec!["n", "m"]);
    assert_eq!(result.rows[0].get("n"), Some(&ScalarValue::Integer(2)));
    assert_eq!(result.rows[0].len(), 2);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t")]
#[tokio::test]
async fn blank_queries_are_rejected(#[case] query: &str) {
    let db = db().await;
    let err = db.execute(query).await.unwrap_err();
    assert_eq!(err.message, "Please enter a SQL query");
}

#[tokio::test]
async fn engine_errors_carry_the_engine_message() {
    let db = db().await;
    let err = db.execute("SELECT * FROM moviez").await.unwrap_err();
    assert!(err.message.contains("no such table"), "{}", err.message);

    let err = db.execute("SELEC title FROM movies").await.unwrap_err();
    assert!(err.message.contains("syntax error"), "{}", err.message);
}

#[tokio::test]
async fn database_stays_usable_after_an_error() {
    let db = db().await;
    assert!(db.execute("SELECT nope FROM movies").await.is_err());
    assert_eq!(db.execute("SELECT * FROM theaters").await.unwrap().len(), 5);
}

#[tokio::test]
async fn modifications_persist_within_a_session() {
    let db = db().await;
    let result = db
        .execute("DELETE FROM theaters WHERE capacity < 200")
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(db.execute("SELECT * FROM theaters").await.unwrap().len(), 4);
}

#[tokio::test]
async fn join_columns_follow_select_list() {
    let db = db().await;
    let result = db
        .execute(
            "SELECT movies.title, boxoffice.rating FROM movies \
             JOIN boxoffice ON movies.id = boxoffice.movie_id",
        )
        .await
        .unwrap();
    assert_eq!(result.columns, vec!["title", "rating"]);
    assert_eq!(result.len(), 14);
}

#[rstest]
#[case(";")]
#[case("-- just a comment")]
#[case("/* c */")]
#[tokio::test]
async fn statement_free_input_is_an_empty_result(#[case] query: &str) {
    let db = db().await;
    let result = db.execute(query).await.expect("no engine error");
    assert!(result.columns.is_empty());
    assert!(result.is_empty());
}

#[tokio::test]
async fn referenced_movies_can_be_deleted() {
    let db = db().await;
    db.execute("DELETE FROM movies WHERE id = 1").await.expect("delete runs");

    let orphans = db
        .execute("SELECT movie_id FROM boxoffice WHERE movie_id NOT IN (SELECT id FROM movies)")
        .await
        .unwrap();
    assert_eq!(orphans.len(), 1);
}
