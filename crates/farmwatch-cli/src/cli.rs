//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use farmwatch_cli::config::Overrides;
use farmwatch_types::Theme;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "farmwatch")]
#[command(author, version, about = "Live status for farm telemetry channels", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Telemetry channel id
    #[arg(long, global = true, env = "FARMWATCH_CHANNEL_ID")]
    pub channel: Option<String>,

    /// Read API key for the channel
    #[arg(long, global = true, env = "FARMWATCH_READ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL
    #[arg(long, global = true, env = "FARMWATCH_BASE_URL")]
    pub base_url: Option<String>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Channel overrides from flags and environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            channel_id: self.channel.clone(),
            read_api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the live terminal dashboard (default)
    #[cfg(feature = "tui")]
    Dashboard(DashboardArgs),

    /// Fetch and print the latest reading
    Read {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON (no pretty-printing)
        #[arg(long)]
        compact: bool,
    },

    /// Poll continuously and print one line per reading
    Watch {
        /// Polling interval in seconds (defaults to the configured interval)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Number of readings to print before exiting (0 for unlimited)
        #[arg(short = 'n', long, default_value = "0")]
        count: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Dashboard options
#[derive(Debug, Clone, Default, Args)]
pub struct DashboardArgs {
    /// Initial theme (dark or light)
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Polling interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,
}

/// Configuration subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration (read key masked)
    Show,

    /// Show configuration file path
    Path,

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
