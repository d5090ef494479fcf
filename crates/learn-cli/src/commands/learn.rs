use std::io::Write as _;
use std::sync::Arc;

use anyhow::Context;
use learn_config::LearnConfig;
use learn_lessons::{Direction, ProgressionController};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::root_commands::LearnArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::{AppContext, spawn_event_log};
use crate::output::lesson::{LessonView, render_companion, render_lesson};
use crate::output::results::{SubmissionReport, render_submission, render_verdict};
use crate::output::{output, table_options};
use crate::repl::{DotCommand, HELP, Input, InputBuffer};

enum Flow {
    Continue,
    Quit,
}

struct Session {
    ctx: AppContext,
    controller: ProgressionController,
    format: OutputFormat,
}

/// Handle `sqlearn learn`: the interactive tutor loop.
pub async fn handle(args: &LearnArgs, config: LearnConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let start = args.lesson.unwrap_or(config.tutor.start_lesson);
    let ctx = AppContext::init(config).await?;
    let (events, event_log) = spawn_event_log();
    let controller = ProgressionController::starting_at(Arc::clone(&ctx.catalog), start)
        .with_context(|| format!("lessons are numbered 1 to {}", ctx.catalog.len()))?
        .with_events(events);

    let mut session = Session {
        ctx,
        controller,
        format: flags.format,
    };

    println!("Welcome to sqlearn. Type .help for commands.\n");
    session.show_lesson();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = InputBuffer::default();
    loop {
        prompt(buffer.is_empty())?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            println!();
            break;
        };

        let flow = match buffer.feed(&line) {
            Input::Pending => Flow::Continue,
            Input::Invalid(message) => {
                println!("{message}");
                Flow::Continue
            }
            Input::Query(query) => {
                session.submit(&query).await?;
                Flow::Continue
            }
            Input::Command(command) => session.run(command).await?,
        };
        if matches!(flow, Flow::Quit) {
            break;
        }
    }

    let Session { mut ctx, controller, .. } = session;
    ctx.db.close();
    let done = controller.completed_lessons().len();
    drop(controller);
    if let Err(error) = event_log.await {
        tracing::warn!(%error, "progress log task failed");
    }
    println!("Completed {done} of {} lessons. Bye!", ctx.catalog.len());
    Ok(())
}

fn prompt(fresh: bool) -> anyhow::Result<()> {
    print!("{}", if fresh { "sqlearn> " } else { "    ...> " });
    std::io::stdout().flush().context("failed to write prompt")
}

impl Session {
    fn max_rows(&self) -> usize {
        self.ctx.config.tutor.max_display_rows
    }

    fn show_lesson(&self) {
        let lesson = self.controller.active_lesson();
        let view = LessonView {
            total: self.ctx.catalog.len(),
            hints: false,
            reference: self.ctx.config.tutor.show_reference,
            completed: self.controller.is_complete(lesson.id),
        };
        println!("{}\n", render_lesson(lesson, view));
        for (number, hint) in self.controller.revealed_hints().iter().enumerate() {
            println!("Hint {}: {hint}", number + 1);
        }
    }

    async fn submit(&mut self, query: &str) -> anyhow::Result<()> {
        let submission = self.controller.submit_query(&self.ctx.db, query).await;
        match self.format {
            OutputFormat::Table => {
                println!("{}", render_submission(&submission, self.max_rows(), table_options()));
            }
            OutputFormat::Json | OutputFormat::Raw => {
                output(&SubmissionReport::from(&submission), self.format)?;
            }
        }
        if submission.completed {
            if submission.lesson_id < self.ctx.catalog.last_id() {
                println!("Type .companion to compare with Convex, or .next to continue.");
            } else {
                println!("That was the last lesson. Well done!");
            }
        }
        println!();
        Ok(())
    }

    async fn run(&mut self, command: DotCommand) -> anyhow::Result<Flow> {
        match command {
            DotCommand::Next => self.step(Direction::Next, "Already at the last lesson."),
            DotCommand::Prev => self.step(Direction::Prev, "Already at the first lesson."),
            DotCommand::Goto(id) => {
                if self.controller.select_lesson(id).is_some() {
                    self.show_lesson();
                } else {
                    println!("No lesson {id}; lessons are numbered 1 to {}.", self.ctx.catalog.len());
                }
            }
            DotCommand::Lesson => self.show_lesson(),
            DotCommand::Hint => match self.controller.next_hint() {
                Some((number, hint)) => println!("Hint {number}: {hint}"),
                None => println!("No more hints for this lesson."),
            },
            DotCommand::Hints => {
                let revealed = self.controller.revealed_hints();
                if revealed.is_empty() {
                    println!("No hints revealed yet. Type .hint for one.");
                }
                for (number, hint) in revealed.iter().enumerate() {
                    println!("Hint {}: {hint}", number + 1);
                }
            }
            DotCommand::Companion(answer) => self.companion(answer.as_deref()),
            DotCommand::Reset => {
                self.ctx.db.reset().await.context("failed to restore the sample data")?;
                println!("Sample data restored.");
            }
            DotCommand::Tables => {
                let counts = self.ctx.db.table_counts().await?;
                for (name, rows) in counts {
                    println!("  {name:<10} {rows:>3} rows");
                }
            }
            DotCommand::Help => println!("{HELP}"),
            DotCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn step(&mut self, direction: Direction, at_edge: &str) {
        if self.controller.navigate(direction).is_some() {
            self.show_lesson();
        } else {
            println!("{at_edge}");
        }
    }

    fn companion(&self, answer: Option<&str>) {
        let Some(task) = self.controller.companion() else {
            println!("Pass this lesson's SQL task to unlock its companion task.");
            return;
        };
        match answer.and_then(|answer| self.controller.check_companion(answer)) {
            Some(outcome) => println!("{}", render_verdict(&outcome)),
            None => println!("{}", render_companion(task)),
        }
    }
}
