//! Dashboard state owned by the UI loop.
//!
//! All mutation goes through [`DashboardState::apply`],
//! [`DashboardState::toggle_theme`] and [`DashboardState::tick`]. Everything
//! shown on screen (statuses, summary, greeting) is derived on demand, so it
//! can never drift from the current reading or clock.

use chrono::{DateTime, Local};

use farmwatch_types::{Reading, SensorKind, Theme};

use crate::clock::Greeting;
use crate::messages::PollEvent;
use crate::summary::SystemSummary;
use crate::thresholds::{StatusInfo, Thresholds};

/// Bookkeeping about poll outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollStats {
    pub successes: u64,
    pub empty_polls: u64,
    pub failures: u64,
    /// Failures since the last answered poll.
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
    /// Local clock time of the last successful fetch.
    pub last_success_at: Option<DateTime<Local>>,
}

impl PollStats {
    /// Whether at least one reading has been received.
    pub fn has_data(&self) -> bool {
        self.successes > 0
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone)]
pub struct DashboardState {
    reading: Reading,
    theme: Theme,
    now: DateTime<Local>,
    poll: PollStats,
    thresholds: Thresholds,
}

impl DashboardState {
    /// Start with the default all-zero reading.
    pub fn new(thresholds: Thresholds, theme: Theme, now: DateTime<Local>) -> Self {
        Self {
            reading: Reading::default(),
            theme,
            now,
            poll: PollStats::default(),
            thresholds,
        }
    }

    /// Apply a poll outcome. Returns `true` if the reading was replaced.
    ///
    /// Only [`PollEvent::Updated`] touches the reading, and it replaces it
    /// whole. Empty feeds and failures leave the previous reading in place.
    pub fn apply(&mut self, event: PollEvent) -> bool {
        match event {
            PollEvent::Updated(reading) => {
                self.reading = reading;
                self.poll.successes += 1;
                self.poll.consecutive_failures = 0;
                self.poll.last_error = None;
                self.poll.last_success_at = Some(self.now);
                true
            }
            PollEvent::Empty => {
                self.poll.empty_polls += 1;
                self.poll.consecutive_failures = 0;
                false
            }
            PollEvent::Failed(message) => {
                self.poll.failures += 1;
                self.poll.consecutive_failures += 1;
                self.poll.last_error = Some(message);
                false
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    /// Advance the displayed clock.
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.now = now;
    }

    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    pub fn poll(&self) -> &PollStats {
        &self.poll
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Classification of one sensor in the current reading.
    pub fn status(&self, kind: SensorKind) -> StatusInfo {
        self.thresholds.classify_reading(&self.reading, kind)
    }

    pub fn summary(&self) -> SystemSummary {
        self.thresholds.summarize(&self.reading)
    }

    pub fn greeting(&self) -> Greeting {
        Greeting::at(&self.now)
    }
}
