//! Engine source selection and scratch database lifecycle.

use learn_config::{EngineConfig, EngineSourceConfig};
use learn_core::QueryExecutor;
use learn_db::{DatabaseError, EngineSource, SourceLocation, TutorDb, load_engine};

/// A path under a regular file can never become a directory.
fn unusable_dir(root: &std::path::Path) -> std::path::PathBuf {
    let file = root.join("not-a-dir");
    std::fs::write(&file, b"x").unwrap();
    file.join("nested")
}

#[tokio::test]
async fn falls_back_to_the_next_source() {
    let tmp = tempfile::tempdir().unwrap();
    let sources = vec![
        EngineSource::directory("broken", unusable_dir(tmp.path())),
        EngineSource::memory(),
    ];

    let factory = load_engine(&sources).await.unwrap();
    assert_eq!(factory.source().label, "memory");
}

#[tokio::test]
async fn all_sources_failing_lists_each_attempt() {
    let tmp = tempfile::tempdir().unwrap();
    let bad = unusable_dir(tmp.path());
    let sources = vec![
        EngineSource::directory("first", &bad),
        EngineSource::directory("second", &bad),
    ];

    let err = load_engine(&sources).await.unwrap_err();
    let load = match err {
        DatabaseError::EngineLoad(load) => load,
        other => panic!("expected EngineLoad, got {other:?}"),
    };
    let labels: Vec<_> = load.attempts.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["first", "second"]);
}

#[tokio::test]
async fn directory_source_creates_and_removes_scratch_files() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("cache");
    let mut db = TutorDb::open(&[EngineSource::directory("cache", &dir)])
        .await
        .unwrap();
    assert_eq!(
        db.factory().source().location,
        SourceLocation::Directory(dir.clone())
    );
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
    assert_eq!(db.execute("SELECT * FROM movies").await.unwrap().len(), 14);

    db.close();
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[tokio::test]
async fn databases_from_one_factory_are_independent() {
    let factory = load_engine(&[EngineSource::memory()]).await.unwrap();
    let first = factory.create_database().await.unwrap();
    let second = factory.create_database().await.unwrap();

    learn_db::dataset::seed(first.conn()).await.unwrap();
    assert!(learn_db::dataset::verify(second.conn()).await.is_err());

    first.close();
    second.close();
}

#[tokio::test]
async fn opens_from_config_sources() {
    let config = EngineConfig {
        sources: vec![EngineSourceConfig::memory()],
    };
    let db = TutorDb::from_config(&config).await.unwrap();
    assert_eq!(db.factory().source(), &EngineSource::memory());
}
