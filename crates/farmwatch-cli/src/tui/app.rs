//! Application state for the TUI dashboard.
//!
//! [`App`] wraps the [`DashboardState`] with the view-only settings and
//! transient UI flags (help overlay, status messages, quit request).

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use farmwatch_core::{DashboardState, PollEvent, Thresholds};
use farmwatch_types::Theme;

use crate::config::DashboardConfig;
use super::ui::theme::AppTheme;

/// How long a status message stays in the footer.
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Main application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Reading, theme and clock.
    pub state: DashboardState,
    /// Footer location label.
    pub location: Option<String>,
    /// Footer owner label.
    pub owner: Option<String>,
    /// Show the poll health line.
    pub show_poll_health: bool,
    /// Configured time between polls.
    pub poll_interval: Duration,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Short-lived message shown in the footer, with its creation time.
    pub status_message: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    /// Create a new app from resolved dashboard settings.
    pub fn new(dashboard: &DashboardConfig, thresholds: Thresholds, now: DateTime<Local>) -> Self {
        Self {
            state: DashboardState::new(thresholds, dashboard.theme, now),
            location: dashboard.location.clone(),
            owner: dashboard.owner.clone(),
            show_poll_health: dashboard.show_poll_health,
            poll_interval: dashboard.poll_interval(),
            show_help: false,
            status_message: None,
            should_quit: false,
        }
    }

    /// Apply a poll outcome from the background poller.
    pub fn handle_poll_event(&mut self, event: PollEvent) {
        self.state.apply(event);
    }

    /// Advance the clock.
    pub fn tick_clock(&mut self, now: DateTime<Local>) {
        self.state.tick(now);
    }

    /// Toggle between dark and light theme.
    pub fn toggle_theme(&mut self) {
        self.state.toggle_theme();
        self.push_status_message(format!("Theme: {}", self.state.theme()));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get the current AppTheme based on the theme setting.
    #[must_use]
    pub fn app_theme(&self) -> AppTheme {
        match self.state.theme() {
            Theme::Dark => AppTheme::dark(),
            Theme::Light => AppTheme::light(),
        }
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Replace the status message.
    pub fn push_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Drop the status message once it has expired.
    pub fn clean_expired_messages(&mut self) {
        if self
            .status_message
            .as_ref()
            .is_some_and(|(_, created)| created.elapsed() >= STATUS_MESSAGE_TIMEOUT)
        {
            self.status_message = None;
        }
    }

    /// Get the current status message to display.
    pub fn current_status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(msg, _)| msg.as_str())
    }
}
