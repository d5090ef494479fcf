use std::sync::Arc;

use anyhow::Context;
use learn_config::LearnConfig;
use learn_core::events::ProgressEvent;
use learn_db::TutorDb;
use learn_lessons::Catalog;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use crate::progress::Progress;

/// Shared resources for commands that run queries.
pub struct AppContext {
    pub config: LearnConfig,
    pub catalog: Arc<Catalog>,
    pub db: TutorDb,
}

impl AppContext {
    /// Load the engine from the configured sources and seed the sample dataset.
    pub async fn init(config: LearnConfig) -> anyhow::Result<Self> {
        let spinner = Progress::spinner("Loading SQL engine...");
        let db = match TutorDb::from_config(&config.engine).await {
            Ok(db) => {
                spinner.finish_clear();
                db
            }
            Err(error) => {
                spinner.finish_err("SQL engine unavailable");
                return Err(error).context("failed to prepare the sample database");
            }
        };

        Ok(Self {
            config,
            catalog: Catalog::builtin(),
            db,
        })
    }
}

/// Log every progress event under the `sqlearn::progress` target.
///
/// The task drains the channel and ends once the last sender is dropped;
/// await the handle to flush pending events. It resolves to the number of
/// events logged.
pub fn spawn_event_log() -> (UnboundedSender<ProgressEvent>, JoinHandle<usize>) {
    let (sender, mut receiver) = mpsc::unbounded_channel::<ProgressEvent>();
    let task = tokio::spawn(async move {
        let mut logged = 0;
        while let Some(event) = receiver.recv().await {
            let payload = serde_json::to_string(&event).unwrap_or_default();
            tracing::info!(
                target: "sqlearn::progress",
                event = event.name(),
                lesson_id = event.lesson_id(),
                %payload,
                "progress"
            );
            logged += 1;
        }
        logged
    });
    (sender, task)
}
