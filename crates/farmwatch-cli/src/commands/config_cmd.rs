//! Config command implementation.

use std::path::Path;

use anyhow::{Context, Result, bail};

use farmwatch_cli::config::{CONFIG_TEMPLATE, Config, write_file};

use crate::cli::ConfigAction;

pub fn cmd_config(action: ConfigAction, path: &Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_from(path)?;
            let content =
                toml::to_string_pretty(&config.redacted()).context("Failed to serialize config")?;
            println!("# {}", path.display());
            print!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            write_file(path, CONFIG_TEMPLATE)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
