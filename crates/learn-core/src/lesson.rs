use serde::Serialize;

use crate::rule::{CompanionRule, ValidationRule};

/// One unit of curriculum. `id` is 1-based and contiguous within a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub objective: String,
    pub sql_task: SqlTask,
    pub companion_task: CompanionTask,
    pub hints: Vec<String>,
}

/// The gating step: a query run against the sample dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlTask {
    pub concept: String,
    pub example: String,
    pub task_prompt: String,
    pub reference_query: String,
    pub rule: ValidationRule,
}

/// The same idea expressed in a document database. Display-only; unlocked
/// after the SQL step passes and never gates progression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionTask {
    pub concept: String,
    pub example: String,
    pub task_prompt: String,
    pub reference_answer: String,
    pub rule: CompanionRule,
}

/// Short listing entry for catalogs and menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonSummary {
    pub id: u32,
    pub title: String,
    pub objective: String,
}

impl From<&LessonRecord> for LessonSummary {
    fn from(lesson: &LessonRecord) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title.clone(),
            objective: lesson.objective.clone(),
        }
    }
}
