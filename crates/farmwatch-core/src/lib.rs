//! Core library for farm telemetry dashboards.
//!
//! This crate reads the latest entry of a channel on a ThingSpeak-compatible
//! telemetry provider, classifies each sensor into Optimal / Warning /
//! Critical bands, and keeps a dashboard state up to date by polling.
//!
//! # Features
//!
//! - Lenient feed decoding with explicit tracking of unparsable fields
//! - Configurable threshold bands with a system-wide summary
//! - Background poller with immediate first fetch and manual refresh
//! - Mock telemetry source for testing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use farmwatch_core::{ChannelConfig, FeedClient, PollEvent, TelemetryPoller};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::new(ChannelConfig::new("3066267", "READ_KEY"))?;
//!     let (tx, mut rx) = tokio::sync::mpsc::channel(16);
//!     let poller = TelemetryPoller::new(Arc::new(client), Duration::from_secs(15)).spawn(tx);
//!
//!     if let Some(PollEvent::Updated(reading)) = rx.recv().await {
//!         println!("Soil moisture: {:.1}%", reading.soil_moisture);
//!     }
//!
//!     poller.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod clock;
pub mod error;
pub mod feed;
pub mod messages;
pub mod mock;
pub mod poller;
pub mod state;
pub mod summary;
pub mod thresholds;
pub mod traits;

// Re-export types crate
pub use farmwatch_types;
pub use farmwatch_types::{
    ColorKey, FeedField, PumpState, Reading, SensorKind, StatusLevel, Theme,
};

pub use client::{ChannelConfig, DEFAULT_BASE_URL, FeedClient};
pub use clock::{CLOCK_TICK, Greeting};
pub use error::{Error, Result};
pub use feed::{FeedEntry, FeedResponse};
pub use messages::{Command, PollEvent};
pub use mock::{MockOutcome, MockSource};
pub use poller::{DEFAULT_POLL_INTERVAL, PollerHandle, TelemetryPoller};
pub use state::{DashboardState, PollStats};
pub use summary::{Banner, SystemSummary};
pub use thresholds::{Band, StatusInfo, ThresholdConfig, Thresholds, classify};
pub use traits::TelemetrySource;
