//! Standalone dashboard binary.
//!
//! Reads the same config file as `farmwatch` and honors the
//! `FARMWATCH_CHANNEL_ID`, `FARMWATCH_READ_API_KEY` and `FARMWATCH_BASE_URL`
//! environment variables.

use std::env;

use anyhow::Result;

use farmwatch_cli::config::{Config, Overrides};
use farmwatch_cli::logging;

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_file(false, false)?;

    let config = Config::load()?;
    let overrides = Overrides {
        channel_id: env_var("FARMWATCH_CHANNEL_ID"),
        read_api_key: env_var("FARMWATCH_READ_API_KEY"),
        base_url: env_var("FARMWATCH_BASE_URL"),
        ..Default::default()
    };
    let settings = config.resolve(&overrides)?;

    farmwatch_cli::tui::run(settings).await
}
