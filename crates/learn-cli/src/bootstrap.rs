use anyhow::Context;
use learn_config::LearnConfig;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config() -> anyhow::Result<LearnConfig> {
    if let Err(error) = dotenvy::dotenv()
        && !error.not_found()
    {
        return Err(error).context("failed to load .env");
    }

    LearnConfig::load().context("failed to load sqlearn configuration")
}
