use anyhow::Context;
use learn_config::LearnConfig;
use learn_lessons::Catalog;

use crate::cli::root_commands::ShowArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::lesson::{LessonView, render_lesson};
use crate::output::output;

/// Handle `sqlearn show <id>`.
pub fn handle(args: &ShowArgs, config: &LearnConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = Catalog::builtin();
    let lesson = catalog
        .lesson(args.id)
        .with_context(|| format!("lessons are numbered 1 to {}", catalog.len()))?;

    match flags.format {
        OutputFormat::Table => {
            let view = LessonView {
                total: catalog.len(),
                hints: args.hints,
                reference: config.tutor.show_reference,
                completed: false,
            };
            println!("{}", render_lesson(lesson, view));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(lesson, flags.format),
    }
}
