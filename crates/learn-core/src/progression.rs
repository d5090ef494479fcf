//! Per-lesson progression state.
//!
//! ```text
//! unattempted → sql_passed   (terminal until the active lesson changes)
//! ```
//!
//! Changing the active lesson always starts a fresh visit: phase back to
//! `unattempted`, counters cleared.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Phase of the active lesson within the current visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LessonPhase {
    Unattempted,
    SqlPassed,
}

impl LessonPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Unattempted => &[Self::SqlPassed],
            Self::SqlPassed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unattempted => "unattempted",
            Self::SqlPassed => "sql_passed",
        }
    }
}

impl fmt::Display for LessonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progression over one active lesson.
///
/// Fields are read-only outside this crate; only the transition methods
/// below change them, and the progression controller is their only caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressionState {
    active_lesson_id: u32,
    sql_step_passed: bool,
    companion_step_unlocked: bool,
    attempts: u32,
    hints_revealed: usize,
}

impl ProgressionState {
    /// Fresh visit of `lesson_id`.
    #[must_use]
    pub const fn new(lesson_id: u32) -> Self {
        Self {
            active_lesson_id: lesson_id,
            sql_step_passed: false,
            companion_step_unlocked: false,
            attempts: 0,
            hints_revealed: 0,
        }
    }

    #[must_use]
    pub const fn active_lesson_id(&self) -> u32 {
        self.active_lesson_id
    }

    #[must_use]
    pub const fn sql_step_passed(&self) -> bool {
        self.sql_step_passed
    }

    #[must_use]
    pub const fn companion_step_unlocked(&self) -> bool {
        self.companion_step_unlocked
    }

    /// Judged submissions on this visit (engine failures excluded).
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub const fn hints_revealed(&self) -> usize {
        self.hints_revealed
    }

    #[must_use]
    pub const fn phase(&self) -> LessonPhase {
        if self.sql_step_passed {
            LessonPhase::SqlPassed
        } else {
            LessonPhase::Unattempted
        }
    }

    /// Start a new visit of `lesson_id`, clearing both flags and counters.
    pub fn enter(&mut self, lesson_id: u32) {
        *self = Self::new(lesson_id);
    }

    pub const fn record_attempt(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }

    /// Move to `sql_passed`. Returns `true` only on the transition itself;
    /// later calls on the same visit are no-ops returning `false`.
    pub fn mark_sql_passed(&mut self) -> bool {
        if !self.phase().can_transition_to(LessonPhase::SqlPassed) {
            return false;
        }
        self.sql_step_passed = true;
        self.companion_step_unlocked = true;
        true
    }

    /// Count one more revealed hint, capped at `available`.
    /// Returns the zero-based index of the newly revealed hint.
    pub const fn reveal_hint(&mut self, available: usize) -> Option<usize> {
        if self.hints_revealed >= available {
            return None;
        }
        self.hints_revealed += 1;
        Some(self.hints_revealed - 1)
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new(1)
    }
}
