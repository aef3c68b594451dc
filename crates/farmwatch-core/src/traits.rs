//! Trait abstraction over the telemetry provider.
//!
//! [`TelemetrySource`] lets the poller run against the real HTTP client or a
//! [`MockSource`](crate::mock::MockSource) in tests.

use async_trait::async_trait;

use farmwatch_types::Reading;

use crate::error::Result;

/// Something that can report the latest reading of a channel.
///
/// # Example
///
/// ```ignore
/// use farmwatch_core::{TelemetrySource, Result};
///
/// async fn print_latest<S: TelemetrySource>(source: &S) -> Result<()> {
///     if let Some(reading) = source.fetch_latest().await? {
///         println!("soil: {:.1}%", reading.soil_moisture);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Fetch the most recent feed entry.
    ///
    /// Returns `Ok(None)` when the provider answered with an empty feed.
    async fn fetch_latest(&self) -> Result<Option<Reading>>;

    /// Short description for log lines (must not contain secrets).
    fn describe(&self) -> String;
}
