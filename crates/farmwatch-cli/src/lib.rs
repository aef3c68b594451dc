//! Command-line interface and terminal dashboard for farm telemetry.
//!
//! The `farmwatch` binary reads the latest entry of a telemetry channel and
//! classifies soil moisture, humidity and temperature into Optimal, Warning
//! and Critical bands.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dashboard` | Live terminal dashboard (default) |
//! | `read` | Fetch and print the latest reading |
//! | `watch` | Print a line for every new poll |
//! | `config` | Manage the configuration file |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Settings live in `~/.config/farmwatch/config.toml` (or platform
//! equivalent). See [`config::Config`] for the layout.
//!
//! # Environment Variables
//!
//! - `FARMWATCH_CHANNEL_ID`: Channel id (overridden by `--channel`)
//! - `FARMWATCH_READ_API_KEY`: Read API key (overridden by `--api-key`)
//! - `FARMWATCH_BASE_URL`: Provider base URL (overridden by `--base-url`)
//! - `NO_COLOR`: Disable colored output when set
//!
//! # Examples
//!
//! ```bash
//! farmwatch --channel 3066267 --api-key XXXXXXXX read
//! farmwatch watch --interval 30 --format json
//! ```

// Re-export core dependencies for convenience
pub use farmwatch_core;
pub use farmwatch_types;

pub mod config;
pub mod logging;

// TUI module - publicly exposed for farmwatch-tui crate to use
#[cfg(feature = "tui")]
pub mod tui;
