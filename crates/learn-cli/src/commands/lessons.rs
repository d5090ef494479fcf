use learn_lessons::Catalog;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `sqlearn lessons`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&Catalog::builtin().summaries(), flags.format)
}
