//! Platform-agnostic types for farm telemetry readings.
//!
//! This crate provides the shared data model used by the farmwatch client
//! library and its front ends. It performs no I/O.
//!
//! # Example
//!
//! ```
//! use farmwatch_types::{PumpState, Reading, Theme};
//!
//! let reading = Reading { pump_state: 1, ..Reading::default() };
//! assert_eq!(reading.pump(), PumpState::Active);
//! assert_eq!(Theme::default().toggle(), Theme::Light);
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{ColorKey, FeedField, PumpState, Reading, SensorKind, StatusLevel, Theme};
