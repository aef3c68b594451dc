//! Command implementations for the CLI.

mod config_cmd;
mod read;
mod watch;

pub use config_cmd::cmd_config;
pub use read::cmd_read;
pub use watch::{WatchArgs, cmd_watch};
