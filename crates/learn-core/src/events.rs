//! Progress events emitted by the progression controller.
//!
//! Consumers (logging, analytics, progress stores) live outside the core and
//! receive these over a channel. Serialized as flat JSON objects tagged by
//! `event`, e.g. `{"at":"...","event":"lesson_completed","lesson_id":1,"attempts":2}`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ProgressEventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEventKind {
    /// A lesson became active (initially, or after navigation).
    LessonStarted { lesson_id: u32 },
    /// A submission reached the engine; `success` is false on engine errors.
    QueryExecuted { lesson_id: u32, success: bool },
    /// First passing submission of a lesson visit. Never repeated within a visit.
    LessonCompleted { lesson_id: u32, attempts: u32 },
    /// A hint was revealed; `hint_number` is 1-based.
    HintShown { lesson_id: u32, hint_number: usize },
    Navigated { from: u32, to: u32 },
}

impl ProgressEvent {
    /// Stamp `kind` with the current time.
    #[must_use]
    pub fn now(kind: ProgressEventKind) -> Self {
        Self {
            at: Utc::now(),
            kind,
        }
    }

    /// The lesson the event is about (the destination for navigation).
    #[must_use]
    pub const fn lesson_id(&self) -> u32 {
        match self.kind {
            ProgressEventKind::LessonStarted { lesson_id }
            | ProgressEventKind::QueryExecuted { lesson_id, .. }
            | ProgressEventKind::LessonCompleted { lesson_id, .. }
            | ProgressEventKind::HintShown { lesson_id, .. } => lesson_id,
            ProgressEventKind::Navigated { to, .. } => to,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.kind {
            ProgressEventKind::LessonStarted { .. } => "lesson_started",
            ProgressEventKind::QueryExecuted { .. } => "query_executed",
            ProgressEventKind::LessonCompleted { .. } => "lesson_completed",
            ProgressEventKind::HintShown { .. } => "hint_shown",
            ProgressEventKind::Navigated { .. } => "navigated",
        }
    }
}
