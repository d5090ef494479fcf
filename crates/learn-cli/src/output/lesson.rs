//! Plain-text lesson presentation.

use std::fmt::Write as _;

use learn_core::lesson::{CompanionTask, LessonRecord};

#[derive(Clone, Copy, Debug, Default)]
pub struct LessonView {
    pub total: usize,
    pub hints: bool,
    pub reference: bool,
    pub completed: bool,
}

#[must_use]
pub fn render_lesson(lesson: &LessonRecord, view: LessonView) -> String {
    let mut out = String::new();
    let done = if view.completed { "  ✓" } else { "" };
    let _ = writeln!(
        out,
        "Lesson {} of {}: {}{done}",
        lesson.id, view.total, lesson.title
    );
    let _ = writeln!(out, "{}", lesson.description);
    let _ = writeln!(out, "\nObjective: {}", lesson.objective);

    let task = &lesson.sql_task;
    let _ = writeln!(out, "\n{}", task.concept);
    let _ = writeln!(out, "\nExample:\n  {}", task.example);
    let _ = write!(out, "\nTask: {}", task.task_prompt);
    if view.reference {
        let _ = write!(out, "\nReference: {}", task.reference_query);
    }

    if view.hints {
        out.push_str("\n\nHints:");
        for (number, hint) in lesson.hints.iter().enumerate() {
            let _ = write!(out, "\n  {}. {hint}", number + 1);
        }
    }
    out
}

#[must_use]
pub fn render_companion(task: &CompanionTask) -> String {
    format!(
        "Same idea in Convex:\n{}\n\nExample:\n  {}\n\nTask: {}\nAnswer: {}",
        task.concept, task.example, task.task_prompt, task.reference_answer
    )
}
