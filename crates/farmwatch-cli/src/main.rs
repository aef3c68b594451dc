use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use farmwatch_cli::config::Config;
use farmwatch_cli::logging;

mod cli;
mod commands;
mod format;

use cli::{Cli, Commands};
use commands::{WatchArgs, cmd_config, cmd_read, cmd_watch};
use format::FormatOptions;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let mut cli = Cli::parse();

    #[cfg(feature = "tui")]
    let command = cli
        .command
        .take()
        .unwrap_or_else(|| Commands::Dashboard(cli::DashboardArgs::default()));
    #[cfg(not(feature = "tui"))]
    let Some(command) = cli.command.take() else {
        anyhow::bail!("No command given and the dashboard is not built in; see --help");
    };

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "farmwatch", &mut io::stdout());
        return Ok(());
    }

    let config_path = cli.config.clone().unwrap_or_else(Config::path);

    if let Commands::Config { action } = command {
        return cmd_config(action, &config_path);
    }

    #[cfg(feature = "tui")]
    let in_dashboard = matches!(command, Commands::Dashboard(_));
    #[cfg(not(feature = "tui"))]
    let in_dashboard = false;

    if in_dashboard {
        logging::init_file(cli.verbose, cli.quiet)?;
    } else {
        logging::init_stderr(cli.verbose, cli.quiet);
    }
    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let config = Config::load_from(&config_path)?;
    let mut overrides = cli.overrides();
    let opts = FormatOptions::new(cli.no_color);

    match command {
        #[cfg(feature = "tui")]
        Commands::Dashboard(args) => {
            overrides.theme = args.theme;
            overrides.poll_interval_secs = args.interval;
            let settings = config.resolve(&overrides)?;
            farmwatch_cli::tui::run(settings).await?;
        }
        Commands::Read { format, compact } => {
            let settings = config.resolve(&overrides)?;
            let opts = FormatOptions { compact, ..opts };
            cmd_read(&settings, format, &opts).await?;
        }
        Commands::Watch {
            interval,
            count,
            format,
        } => {
            overrides.poll_interval_secs = interval;
            let settings = config.resolve(&overrides)?;
            cmd_watch(WatchArgs {
                settings: &settings,
                interval: settings.dashboard.poll_interval(),
                count,
                format,
                opts: &opts,
            })
            .await?;
        }
        Commands::Config { .. } | Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
