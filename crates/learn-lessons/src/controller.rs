//! The Lesson Progression Controller.
//!
//! Owns the active lesson and its [`ProgressionState`]. Callers read state
//! through accessors and request transitions through `submit_query`,
//! `navigate`, and `select_lesson`; nothing else mutates it.

use std::collections::BTreeSet;
use std::sync::Arc;

use learn_core::events::{ProgressEvent, ProgressEventKind};
use learn_core::lesson::{CompanionTask, LessonRecord};
use learn_core::progression::ProgressionState;
use learn_core::rule::ValidationOutcome;
use learn_core::{CoreError, QueryError, QueryExecutor, QueryResult};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// What happened to one submitted query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub lesson_id: u32,
    /// Rows on success, the engine's message on failure.
    pub result: Result<QueryResult, QueryError>,
    /// `None` when the query never produced a result to judge.
    pub outcome: Option<ValidationOutcome>,
    pub passed: bool,
    /// True only for the first passing submission of this lesson visit.
    pub completed: bool,
}

pub struct ProgressionController {
    catalog: Arc<Catalog>,
    state: ProgressionState,
    completed: BTreeSet<u32>,
    events: Option<UnboundedSender<ProgressEvent>>,
}

impl ProgressionController {
    /// Start at the catalog's first lesson.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let first = catalog.first().id;
        Self {
            catalog,
            state: ProgressionState::new(first),
            completed: BTreeSet::new(),
            events: None,
        }
    }

    /// Start at `lesson_id`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LessonNotFound` if the catalog has no such lesson.
    pub fn starting_at(catalog: Arc<Catalog>, lesson_id: u32) -> Result<Self, CoreError> {
        catalog.lesson(lesson_id)?;
        let mut controller = Self::new(catalog);
        controller.state.enter(lesson_id);
        Ok(controller)
    }

    /// Send progress events to `sender`, starting with `LessonStarted` for
    /// the current lesson. A closed receiver is ignored.
    #[must_use]
    pub fn with_events(mut self, sender: UnboundedSender<ProgressEvent>) -> Self {
        self.events = Some(sender);
        self.emit(ProgressEventKind::LessonStarted {
            lesson_id: self.state.active_lesson_id(),
        });
        self
    }

    #[must_use]
    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub const fn state(&self) -> &ProgressionState {
        &self.state
    }

    #[must_use]
    pub fn active_lesson(&self) -> &LessonRecord {
        self.catalog
            .get(self.state.active_lesson_id())
            .unwrap_or_else(|| self.catalog.first())
    }

    /// Lessons passed at least once during this session.
    #[must_use]
    pub const fn completed_lessons(&self) -> &BTreeSet<u32> {
        &self.completed
    }

    #[must_use]
    pub fn is_complete(&self, lesson_id: u32) -> bool {
        self.completed.contains(&lesson_id)
    }

    /// Run `query` for the active lesson and judge the result.
    ///
    /// Engine failures come back in `result` and leave the state untouched.
    /// A passing submission moves the lesson to `sql_passed`; only the first
    /// pass of a visit reports `completed` and emits `LessonCompleted`.
    pub async fn submit_query<E: QueryExecutor>(&mut self, executor: &E, query: &str) -> Submission {
        let lesson_id = self.state.active_lesson_id();

        if query.trim().is_empty() {
            return Submission {
                lesson_id,
                result: Err(QueryError::blank()),
                outcome: None,
                passed: false,
                completed: false,
            };
        }

        let result = executor.execute(query).await;
        self.emit(ProgressEventKind::QueryExecuted {
            lesson_id,
            success: result.is_ok(),
        });

        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                tracing::debug!(lesson_id, error = %e, "submission failed to execute");
                return Submission {
                    lesson_id,
                    result: Err(e),
                    outcome: None,
                    passed: false,
                    completed: false,
                };
            }
        };

        self.state.record_attempt();
        let outcome = self.active_lesson().sql_task.rule.evaluate(query, &rows);
        let passed = outcome.passed;
        let completed = passed && self.state.mark_sql_passed();

        if completed {
            self.completed.insert(lesson_id);
            self.emit(ProgressEventKind::LessonCompleted {
                lesson_id,
                attempts: self.state.attempts(),
            });
        }
        tracing::debug!(lesson_id, passed, failures = outcome.failures.len(), "submission judged");

        Submission {
            lesson_id,
            result: Ok(rows),
            outcome: Some(outcome),
            passed,
            completed,
        }
    }

    /// Step to the neighbouring lesson. `None` (and no change) at either end.
    pub fn navigate(&mut self, direction: Direction) -> Option<u32> {
        let current = self.state.active_lesson_id();
        let target = match direction {
            Direction::Prev => current.checked_sub(1)?,
            Direction::Next => current.checked_add(1)?,
        };
        self.select_lesson(target)
    }

    /// Jump to `lesson_id`, starting a fresh visit. `None` (and no change)
    /// if the id is outside the catalog.
    pub fn select_lesson(&mut self, lesson_id: u32) -> Option<u32> {
        if !self.catalog.contains(lesson_id) {
            return None;
        }
        let from = self.state.active_lesson_id();
        self.state.enter(lesson_id);
        self.emit(ProgressEventKind::Navigated { from, to: lesson_id });
        self.emit(ProgressEventKind::LessonStarted { lesson_id });
        Some(lesson_id)
    }

    /// Reveal the next hint of the active lesson.
    ///
    /// Returns the 1-based hint number and its text, or `None` once every
    /// hint is showing.
    pub fn next_hint(&mut self) -> Option<(usize, &str)> {
        let lesson_id = self.state.active_lesson_id();
        let available = self.active_lesson().hints.len();
        let index = self.state.reveal_hint(available)?;
        self.emit(ProgressEventKind::HintShown {
            lesson_id,
            hint_number: index + 1,
        });
        let hint = self.active_lesson().hints.get(index)?;
        Some((index + 1, hint.as_str()))
    }

    /// Hints revealed so far on this visit, in order.
    #[must_use]
    pub fn revealed_hints(&self) -> &[String] {
        let hints = &self.active_lesson().hints;
        &hints[..self.state.hints_revealed().min(hints.len())]
    }

    /// Every hint of the active lesson. Hints are never consumed.
    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.active_lesson().hints
    }

    /// The companion task, once the SQL step has passed.
    #[must_use]
    pub fn companion(&self) -> Option<&CompanionTask> {
        self.state
            .companion_step_unlocked()
            .then(|| &self.active_lesson().companion_task)
    }

    /// Check a companion answer. Informational only; never changes state.
    #[must_use]
    pub fn check_companion(&self, answer: &str) -> Option<ValidationOutcome> {
        self.companion().map(|task| task.rule.evaluate(answer))
    }

    fn emit(&self, kind: ProgressEventKind) {
        if let Some(sender) = &self.events {
            let _ = sender.send(ProgressEvent::now(kind));
        }
    }
}
