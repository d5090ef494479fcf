use learn_config::LearnConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: LearnConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Lessons => commands::lessons::handle(flags),
        Commands::Show(args) => commands::show::handle(&args, &config, flags),
        Commands::Check(args) => commands::check::handle(&args, config, flags).await,
        Commands::Learn(args) => commands::learn::handle(&args, config, flags).await,
        Commands::Dataset => commands::dataset::handle(flags),
        Commands::Config => commands::config::handle(&config, flags),
    }
}
