use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List the lessons in order.
    Lessons,
    /// Show one lesson's concept, example and task.
    Show(ShowArgs),
    /// Run a query against a fresh sample database and judge it for a lesson.
    Check(CheckArgs),
    /// Start the interactive tutor.
    Learn(LearnArgs),
    /// List the sample dataset tables.
    Dataset,
    /// Print the effective configuration.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct ShowArgs {
    /// Lesson id (1-based).
    pub id: u32,

    /// Include every hint.
    #[arg(long)]
    pub hints: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Lesson id (1-based).
    pub id: u32,

    /// SQL query to submit.
    pub query: String,
}

#[derive(Clone, Debug, Args)]
pub struct LearnArgs {
    /// Lesson to start at (defaults to `tutor.start_lesson`).
    #[arg(short = 'L', long)]
    pub lesson: Option<u32>,
}
