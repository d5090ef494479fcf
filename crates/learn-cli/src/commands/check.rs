use std::sync::Arc;

use anyhow::Context;
use learn_config::LearnConfig;
use learn_lessons::ProgressionController;

use crate::cli::root_commands::CheckArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::results::{SubmissionReport, render_submission};
use crate::output::{output, table_options};

/// Handle `sqlearn check <id> <query>`. Fails when the query does not pass.
pub async fn handle(args: &CheckArgs, config: LearnConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let max_rows = config.tutor.max_display_rows;
    let mut ctx = AppContext::init(config).await?;

    let mut controller = ProgressionController::starting_at(Arc::clone(&ctx.catalog), args.id)
        .with_context(|| format!("lessons are numbered 1 to {}", ctx.catalog.len()))?;
    let submission = controller.submit_query(&ctx.db, &args.query).await;
    ctx.db.close();

    match flags.format {
        OutputFormat::Table => println!("{}", render_submission(&submission, max_rows, table_options())),
        OutputFormat::Json | OutputFormat::Raw => {
            output(&SubmissionReport::from(&submission), flags.format)?;
        }
    }

    if !submission.passed {
        anyhow::bail!("query does not pass lesson {}", args.id);
    }
    Ok(())
}
