//! Background telemetry polling.
//!
//! [`TelemetryPoller`] runs in its own Tokio task. It fetches once right
//! away, then once per period, and forwards each outcome as a
//! [`PollEvent`]. Failures never stop the loop; the next scheduled tick
//! simply tries again.
//!
//! ```text
//! spawn ──► poll ──► wait(period) ──► poll ──► ...
//!             ▲                        ▲
//!             └── Command::RefreshNow ─┘   (extra poll, cadence unchanged)
//! ```
//!
//! The task ends when the [`PollerHandle`] is stopped, shut down, or
//! dropped, or when the event receiver goes away. A request that is in
//! flight at that moment is dropped and its result is never delivered.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::messages::{Command, PollEvent};
use crate::traits::TelemetrySource;
use farmwatch_types::Reading;

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Shortest accepted poll period.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Consecutive failures logged at `warn` before the poller goes quiet.
const LOUD_FAILURES: u32 = 3;

const COMMAND_BUFFER: usize = 8;

/// Periodic fetcher for a [`TelemetrySource`].
pub struct TelemetryPoller {
    source: Arc<dyn TelemetrySource>,
    period: Duration,
}

impl std::fmt::Debug for TelemetryPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryPoller")
            .field("source", &self.source.describe())
            .field("period", &self.period)
            .finish()
    }
}

impl TelemetryPoller {
    /// Create a poller. Periods shorter than [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn new(source: Arc<dyn TelemetrySource>, period: Duration) -> Self {
        Self {
            source,
            period: period.max(MIN_POLL_INTERVAL),
        }
    }

    /// Poll period in effect.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start polling on the current Tokio runtime.
    pub fn spawn(self, events: mpsc::Sender<PollEvent>) -> PollerHandle {
        let cancel = CancellationToken::new();
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(self.run(events, command_rx, cancel.clone()));

        PollerHandle {
            cancel,
            commands: command_tx,
            task: Some(task),
        }
    }

    async fn run(
        self,
        events: mpsc::Sender<PollEvent>,
        mut commands: mpsc::Receiver<Command>,
        cancel: CancellationToken,
    ) {
        info!(
            source = %self.source.describe(),
            interval_secs = self.period.as_secs(),
            "Telemetry poller started"
        );

        // The first tick of a tokio interval completes immediately.
        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut consecutive_failures = 0u32;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                cmd = commands.recv() => match cmd {
                    Some(Command::RefreshNow) => debug!("Refresh requested"),
                    None => break,
                },
                _ = timer.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                outcome = self.source.fetch_latest() => outcome,
            };

            let event = Self::to_event(outcome, &mut consecutive_failures);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                sent = events.send(event) => {
                    if sent.is_err() {
                        debug!("Event receiver dropped");
                        break;
                    }
                }
            }
        }

        info!("Telemetry poller stopped");
    }

    fn to_event(outcome: Result<Option<Reading>>, consecutive_failures: &mut u32) -> PollEvent {
        match outcome {
            Ok(Some(reading)) => {
                if *consecutive_failures > 0 {
                    info!(
                        failures = *consecutive_failures,
                        "Telemetry source recovered"
                    );
                }
                *consecutive_failures = 0;
                debug!(
                    soil = reading.soil_moisture,
                    temperature = reading.temperature,
                    humidity = reading.humidity,
                    pump = reading.pump_state,
                    "Fetched reading"
                );
                if !reading.invalid_fields.is_empty() {
                    debug!(fields = ?reading.invalid_fields, "Some feed fields were not numeric");
                }
                PollEvent::Updated(reading)
            }
            Ok(None) => {
                *consecutive_failures = 0;
                warn!("Telemetry feed returned no entries");
                PollEvent::Empty
            }
            Err(e) => {
                *consecutive_failures += 1;
                let attempt = *consecutive_failures;
                if attempt <= LOUD_FAILURES {
                    warn!(error = %e, attempt, "Failed to fetch telemetry");
                } else if attempt == LOUD_FAILURES + 1 {
                    error!(
                        error = %e,
                        attempt,
                        "Failed to fetch telemetry repeatedly, will continue trying silently"
                    );
                } else {
                    debug!(error = %e, attempt, "Failed to fetch telemetry");
                }
                PollEvent::Failed(e.to_string())
            }
        }
    }
}

/// Owner's handle to a running poller.
///
/// Dropping the handle cancels the poller.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: CancellationToken,
    commands: mpsc::Sender<Command>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Ask for an extra poll now.
    ///
    /// Returns `false` if the poller has stopped. A refresh that arrives
    /// while others are still queued is coalesced with them.
    pub fn refresh(&self) -> bool {
        match self.commands.try_send(Command::RefreshNow) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => !self.is_stopped(),
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Signal the poller to stop without waiting for it.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the poller has been told to stop or has exited.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled() || self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Stop the poller and wait for its task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!(error = %e, "Telemetry poller task did not exit cleanly");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;
    use tokio::time::Instant;

    fn reading(soil: f64) -> Reading {
        Reading {
            soil_moisture: soil,
            ..Reading::default()
        }
    }

    fn spawn(source: &Arc<MockSource>) -> (PollerHandle, mpsc::Receiver<PollEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let handle = TelemetryPoller::new(source.clone(), DEFAULT_POLL_INTERVAL).spawn(tx);
        (handle, rx)
    }

    #[test]
    fn test_period_is_clamped() {
        let source: Arc<dyn TelemetrySource> = Arc::new(MockSource::new());
        let poller = TelemetryPoller::new(source, Duration::ZERO);
        assert_eq!(poller.period(), MIN_POLL_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_poll_is_immediate() {
        let source = Arc::new(MockSource::with_reading(reading(45.0)));
        let (handle, mut rx) = spawn(&source);
        let start = Instant::now();

        let event = rx.recv().await.unwrap();
        assert_eq!(event, PollEvent::Updated(reading(45.0)));
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(source.fetch_count(), 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_every_period() {
        let source = Arc::new(MockSource::with_reading(reading(45.0)));
        let (handle, mut rx) = spawn(&source);

        rx.recv().await.unwrap();
        let start = Instant::now();
        rx.recv().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_POLL_INTERVAL);
        assert!(elapsed < DEFAULT_POLL_INTERVAL + Duration::from_secs(1));

        rx.recv().await.unwrap();
        assert_eq!(source.fetch_count(), 3);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_polls_early() {
        let source = Arc::new(MockSource::with_reading(reading(45.0)));
        let (handle, mut rx) = spawn(&source);

        rx.recv().await.unwrap();
        let start = Instant::now();
        assert!(handle.refresh());
        rx.recv().await.unwrap();
        assert!(start.elapsed() < DEFAULT_POLL_INTERVAL);
        assert_eq!(source.fetch_count(), 2);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_keep_polling() {
        let source = Arc::new(MockSource::with_reading(reading(45.0)));
        source.push_fail("offline").await;
        source.push_empty().await;
        let (handle, mut rx) = spawn(&source);

        assert!(matches!(rx.recv().await, Some(PollEvent::Failed(msg)) if msg.contains("offline")));
        assert_eq!(rx.recv().await, Some(PollEvent::Empty));
        assert_eq!(rx.recv().await, Some(PollEvent::Updated(reading(45.0))));

        handle.shutdown().await;
    }

    #[test]
    fn test_failure_counter_resets_on_success() {
        let mut failures = 0;
        for _ in 0..5 {
            let event = TelemetryPoller::to_event(
                Err(crate::Error::Http {
                    status: 500,
                    message: "down".into(),
                }),
                &mut failures,
            );
            assert!(matches!(event, PollEvent::Failed(_)));
        }
        assert_eq!(failures, 5);

        let event = TelemetryPoller::to_event(Ok(Some(reading(1.0))), &mut failures);
        assert_eq!(event, PollEvent::Updated(reading(1.0)));
        assert_eq!(failures, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_ends_stream() {
        let source = Arc::new(MockSource::with_reading(reading(45.0)));
        let (handle, mut rx) = spawn(&source);

        rx.recv().await.unwrap();
        handle.shutdown().await;
        assert_eq!(rx.recv().await, None);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let source = Arc::new(MockSource::with_reading(reading(45.0)));
        let (handle, mut rx) = spawn(&source);

        rx.recv().await.unwrap();
        drop(handle);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_result_is_discarded() {
        let source = Arc::new(MockSource::with_reading(reading(45.0)));
        source.set_latency(Duration::from_secs(10));
        let (handle, mut rx) = spawn(&source);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.fetch_count(), 1);

        handle.stop();
        assert!(handle.is_stopped());
        assert!(!handle.refresh());
        handle.shutdown().await;
        assert_eq!(rx.recv().await, None);
    }
}
