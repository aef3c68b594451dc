//! Message types for UI/poller communication.
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI loop       | --------------> | TelemetryPoller  |
//! |   (ratatui)      |                 |  (tokio task)    |
//! |                  | <-------------- |                  |
//! +------------------+    PollEvent    +------------------+
//! ```

use farmwatch_types::Reading;

/// Commands sent from the UI to the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Poll once now, in addition to the regular cadence.
    RefreshNow,
}

/// Outcome of one poll, sent from the poller to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A feed entry was fetched; replaces the current reading.
    Updated(Reading),
    /// The provider answered but the feed had no entries.
    Empty,
    /// The poll failed (transport, status code, or payload).
    Failed(String),
}
