//! Wall clock, greeting, and time formatting for the dashboard.
//!
//! The clock is display-only. Readings carry the provider's `created_at`
//! timestamp and are never stamped with local time.

use core::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Timelike};
use time::OffsetDateTime;

/// How often the displayed clock advances.
pub const CLOCK_TICK: Duration = Duration::from_secs(1);

/// Time-of-day greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// Greeting for an hour in 24-hour local time.
    ///
    /// ```
    /// use farmwatch_core::clock::Greeting;
    ///
    /// assert_eq!(Greeting::for_hour(11), Greeting::Morning);
    /// assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
    /// assert_eq!(Greeting::for_hour(18), Greeting::Evening);
    /// ```
    pub fn for_hour(hour: u32) -> Self {
        if hour < 12 {
            Greeting::Morning
        } else if hour < 18 {
            Greeting::Afternoon
        } else {
            Greeting::Evening
        }
    }

    /// Greeting for a point in time.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::for_hour(now.hour())
    }

    pub fn text(self) -> &'static str {
        match self {
            Greeting::Morning => "Good Morning",
            Greeting::Afternoon => "Good Afternoon",
            Greeting::Evening => "Good Evening",
        }
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Convert a provider timestamp into local time.
pub fn to_local(ts: OffsetDateTime) -> Option<DateTime<Local>> {
    Local.timestamp_opt(ts.unix_timestamp(), ts.nanosecond()).single()
}

/// Format the last reading time as `hh:mm AM`, or `N/A` before the first fetch.
pub fn format_reading_time(ts: Option<OffsetDateTime>) -> String {
    ts.and_then(to_local)
        .map(|local| format_hm(&local))
        .unwrap_or_else(|| "N/A".to_string())
}

/// `hh:mm AM` in the timestamp's own zone.
pub fn format_hm<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    ts.format("%I:%M %p").to_string()
}

/// `hh:mm:ss AM` for the live clock.
pub fn format_clock<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    ts.format("%I:%M:%S %p").to_string()
}
