//! Sensor thresholds and status classification.
//!
//! Each sensor kind has a [`Band`] of strict limits. The critical check runs
//! before the warning check and the first match wins; a value sitting exactly
//! on a limit is not past it.
//!
//! | Kind | Critical | Warning | Optimal color |
//! |------|----------|---------|---------------|
//! | soil | `< 30` | `< 40` | green |
//! | temperature | `< 15` or `> 35` | `< 20` or `> 30` | blue |
//! | humidity | `< 25` or `> 90` | `< 35` or `> 80` | cyan |
//! | other | never | never | gray |
//!
//! # Example
//!
//! ```
//! use farmwatch_core::{classify, Thresholds};
//! use farmwatch_types::{SensorKind, StatusLevel};
//!
//! assert_eq!(classify(SensorKind::Soil, 30.0).level, StatusLevel::Warning);
//! assert_eq!(classify(SensorKind::Soil, 40.0).level, StatusLevel::Optimal);
//!
//! let thresholds = Thresholds::default();
//! assert_eq!(thresholds.classify(SensorKind::Temperature, 36.0).level, StatusLevel::Critical);
//! ```

use serde::{Deserialize, Serialize};

use farmwatch_types::{ColorKey, Reading, SensorKind, StatusLevel};

use crate::error::{Error, Result};
use crate::summary::SystemSummary;

/// Result of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    /// Status band.
    pub level: StatusLevel,
    /// Presentation color for the band.
    pub color: ColorKey,
}

/// Strict limits for one sensor kind. `None` disables a side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Band {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_below: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_below: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_above: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_above: Option<f64>,
}

impl Band {
    /// Band with only lower limits.
    pub const fn below(critical: f64, warning: f64) -> Self {
        Self {
            critical_below: Some(critical),
            warning_below: Some(warning),
            warning_above: None,
            critical_above: None,
        }
    }

    /// Band with lower and upper limits.
    pub const fn between(
        critical_below: f64,
        warning_below: f64,
        warning_above: f64,
        critical_above: f64,
    ) -> Self {
        Self {
            critical_below: Some(critical_below),
            warning_below: Some(warning_below),
            warning_above: Some(warning_above),
            critical_above: Some(critical_above),
        }
    }

    /// Evaluate a value against this band.
    pub fn evaluate(&self, value: f64) -> StatusLevel {
        if past(value, self.critical_below, self.critical_above) {
            StatusLevel::Critical
        } else if past(value, self.warning_below, self.warning_above) {
            StatusLevel::Warning
        } else {
            StatusLevel::Optimal
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        let limits = [
            ("critical_below", self.critical_below),
            ("warning_below", self.warning_below),
            ("warning_above", self.warning_above),
            ("critical_above", self.critical_above),
        ];
        for (field, limit) in limits {
            if let Some(v) = limit
                && !v.is_finite()
            {
                return Err(Error::invalid_config(format!(
                    "{name}: {field} must be a finite number, got {v}"
                )));
            }
        }
        if let (Some(c), Some(w)) = (self.critical_below, self.warning_below)
            && w < c
        {
            return Err(Error::invalid_config(format!(
                "{name}: warning_below ({w}) is below critical_below ({c})"
            )));
        }
        if let (Some(c), Some(w)) = (self.critical_above, self.warning_above)
            && w > c
        {
            return Err(Error::invalid_config(format!(
                "{name}: warning_above ({w}) is above critical_above ({c})"
            )));
        }
        if let (Some(lo), Some(hi)) = (self.warning_below, self.warning_above)
            && lo > hi
        {
            return Err(Error::invalid_config(format!(
                "{name}: warning_below ({lo}) is above warning_above ({hi})"
            )));
        }
        Ok(())
    }
}

fn past(value: f64, below: Option<f64>, above: Option<f64>) -> bool {
    below.is_some_and(|limit| value < limit) || above.is_some_and(|limit| value > limit)
}

/// Configuration for all sensor bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default = "default_soil")]
    pub soil: Band,
    #[serde(default = "default_temperature")]
    pub temperature: Band,
    #[serde(default = "default_humidity")]
    pub humidity: Band,
}

fn default_soil() -> Band {
    Band::below(30.0, 40.0)
}

fn default_temperature() -> Band {
    Band::between(15.0, 20.0, 30.0, 35.0)
}

fn default_humidity() -> Band {
    Band::between(25.0, 35.0, 80.0, 90.0)
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            soil: default_soil(),
            temperature: default_temperature(),
            humidity: default_humidity(),
        }
    }
}

impl ThresholdConfig {
    /// Check that warning limits sit inside critical limits.
    pub fn validate(&self) -> Result<()> {
        self.soil.validate("soil")?;
        self.temperature.validate("temperature")?;
        self.humidity.validate("humidity")
    }
}

/// Threshold evaluator for sensor readings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Thresholds {
    config: ThresholdConfig,
}

impl Thresholds {
    /// Create a threshold evaluator, rejecting inconsistent bands.
    pub fn new(config: ThresholdConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Classify a value for a sensor kind.
    pub fn classify(&self, kind: SensorKind, value: f64) -> StatusInfo {
        let level = match kind {
            SensorKind::Soil => self.config.soil.evaluate(value),
            SensorKind::Temperature => self.config.temperature.evaluate(value),
            SensorKind::Humidity => self.config.humidity.evaluate(value),
            SensorKind::Other => StatusLevel::Optimal,
        };
        StatusInfo {
            level,
            color: color_for(kind, level),
        }
    }

    /// Classify the value a reading holds for `kind`.
    pub fn classify_reading(&self, reading: &Reading, kind: SensorKind) -> StatusInfo {
        self.classify(kind, reading.value(kind))
    }

    /// Aggregate soil, humidity and temperature into a summary.
    pub fn summarize(&self, reading: &Reading) -> SystemSummary {
        SystemSummary::from_levels(
            SensorKind::DISPLAYED.map(|kind| self.classify_reading(reading, kind).level),
        )
    }
}

/// Classify a value using the default thresholds.
pub fn classify(kind: SensorKind, value: f64) -> StatusInfo {
    // Default bands are valid by construction.
    Thresholds::default().classify(kind, value)
}

fn color_for(kind: SensorKind, level: StatusLevel) -> ColorKey {
    match (kind, level) {
        (SensorKind::Soil, StatusLevel::Critical) => ColorKey::Red,
        (SensorKind::Soil, StatusLevel::Warning) => ColorKey::Orange,
        (SensorKind::Soil, StatusLevel::Optimal) => ColorKey::Green,
        (SensorKind::Temperature, StatusLevel::Critical) => ColorKey::Red,
        (SensorKind::Temperature, StatusLevel::Warning) => ColorKey::Orange,
        (SensorKind::Temperature, StatusLevel::Optimal) => ColorKey::Blue,
        (SensorKind::Humidity, StatusLevel::Warning) => ColorKey::Orange,
        (SensorKind::Humidity, _) => ColorKey::Cyan,
        (SensorKind::Other, _) => ColorKey::Gray,
    }
}
