//! Mock telemetry source for testing.
//!
//! [`MockSource`] implements [`TelemetrySource`] so the poller and the
//! dashboard can be exercised without a network.
//!
//! # Features
//!
//! - **Scripted outcomes**: queue readings, empty feeds, and failures in order
//! - **Failure injection**: fail every fetch, or only the next N fetches
//! - **Latency simulation**: delay each fetch (works with paused tokio time)

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use farmwatch_types::Reading;

use crate::error::{Error, Result};
use crate::traits::TelemetrySource;

/// One scripted fetch outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOutcome {
    Reading(Reading),
    Empty,
    Fail(String),
}

/// A scripted telemetry source.
///
/// Queued outcomes are consumed first. Once the queue is empty, every fetch
/// returns the current reading (or an empty feed if none is set).
///
/// # Example
///
/// ```
/// use farmwatch_core::{MockSource, TelemetrySource};
/// use farmwatch_types::Reading;
///
/// #[tokio::main]
/// async fn main() {
///     let source = MockSource::new();
///     source.push_fail("offline").await;
///     source.set_reading(Reading::default()).await;
///
///     assert!(source.fetch_latest().await.is_err());
///     assert!(source.fetch_latest().await.unwrap().is_some());
///     assert_eq!(source.fetch_count(), 2);
/// }
/// ```
pub struct MockSource {
    current: RwLock<Option<Reading>>,
    script: RwLock<VecDeque<MockOutcome>>,
    fetch_count: AtomicU32,
    should_fail: AtomicBool,
    fail_message: RwLock<String>,
    /// Number of fetches to fail before falling back to normal behavior.
    remaining_failures: AtomicU32,
    /// Simulated fetch latency in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
}

impl std::fmt::Debug for MockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSource")
            .field("fetch_count", &self.fetch_count.load(Ordering::Relaxed))
            .field("should_fail", &self.should_fail.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Create a mock with no reading and an empty script.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            script: RwLock::new(VecDeque::new()),
            fetch_count: AtomicU32::new(0),
            should_fail: AtomicBool::new(false),
            fail_message: RwLock::new("Mock failure".to_string()),
            remaining_failures: AtomicU32::new(0),
            latency_ms: AtomicU64::new(0),
        }
    }

    /// Create a mock that always answers with `reading`.
    pub fn with_reading(reading: Reading) -> Self {
        Self {
            current: RwLock::new(Some(reading)),
            ..Self::new()
        }
    }

    /// Set the reading returned once the script is exhausted.
    pub async fn set_reading(&self, reading: Reading) {
        *self.current.write().await = Some(reading);
    }

    /// Clear the fallback reading so fetches return an empty feed.
    pub async fn clear_reading(&self) {
        *self.current.write().await = None;
    }

    /// Queue an outcome.
    pub async fn push(&self, outcome: MockOutcome) {
        self.script.write().await.push_back(outcome);
    }

    /// Queue a successful reading.
    pub async fn push_reading(&self, reading: Reading) {
        self.push(MockOutcome::Reading(reading)).await;
    }

    /// Queue an empty feed.
    pub async fn push_empty(&self) {
        self.push(MockOutcome::Empty).await;
    }

    /// Queue a failure.
    pub async fn push_fail(&self, message: impl Into<String>) {
        self.push(MockOutcome::Fail(message.into())).await;
    }

    /// Make every fetch fail until reset.
    pub async fn set_should_fail(&self, fail: bool, message: Option<&str>) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Fail the next `count` fetches, then behave normally.
    pub fn set_transient_failures(&self, count: u32) {
        self.remaining_failures.store(count, Ordering::Relaxed);
    }

    /// Delay every fetch by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of fetches attempted so far.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::Relaxed)
    }

    fn failure(message: String) -> Error {
        Error::Http {
            status: 503,
            message,
        }
    }
}

#[async_trait]
impl TelemetrySource for MockSource {
    async fn fetch_latest(&self) -> Result<Option<Reading>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);

        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        if self.remaining_failures.load(Ordering::Relaxed) > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(Self::failure("Transient mock failure".to_string()));
        }

        if self.should_fail.load(Ordering::Relaxed) {
            return Err(Self::failure(self.fail_message.read().await.clone()));
        }

        if let Some(outcome) = self.script.write().await.pop_front() {
            return match outcome {
                MockOutcome::Reading(reading) => Ok(Some(reading)),
                MockOutcome::Empty => Ok(None),
                MockOutcome::Fail(message) => Err(Self::failure(message)),
            };
        }

        Ok(self.current.read().await.clone())
    }

    fn describe(&self) -> String {
        "mock source".to_string()
    }
}
