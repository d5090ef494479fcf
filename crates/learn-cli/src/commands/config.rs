use learn_config::LearnConfig;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `sqlearn config`.
pub fn handle(config: &LearnConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Table | OutputFormat::Raw => {
            print!("{}", render_toml(config)?);
            Ok(())
        }
        OutputFormat::Json => output(config, flags.format),
    }
}

fn render_toml(config: &LearnConfig) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
