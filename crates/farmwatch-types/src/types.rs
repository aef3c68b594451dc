//! Core types for farm telemetry data.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Kind of sensor a value came from.
///
/// Classification thresholds are chosen per kind. Unknown kinds are
/// represented by [`SensorKind::Other`] and always classify as optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SensorKind {
    /// Soil moisture probe (percent).
    Soil,
    /// Air temperature (degrees Celsius).
    Temperature,
    /// Relative humidity (percent).
    Humidity,
    /// Anything else.
    Other,
}

impl SensorKind {
    /// The three sensors shown on the dashboard, in display order.
    pub const DISPLAYED: [SensorKind; 3] =
        [SensorKind::Soil, SensorKind::Humidity, SensorKind::Temperature];

    /// Resolve a sensor kind from a name (case-insensitive).
    ///
    /// This never fails: unrecognized names map to [`SensorKind::Other`].
    ///
    /// ```
    /// use farmwatch_types::SensorKind;
    ///
    /// assert_eq!(SensorKind::from_name("soil"), SensorKind::Soil);
    /// assert_eq!(SensorKind::from_name("Temp"), SensorKind::Temperature);
    /// assert_eq!(SensorKind::from_name("pressure"), SensorKind::Other);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "soil" | "soil_moisture" | "moisture" => SensorKind::Soil,
            "temperature" | "temp" => SensorKind::Temperature,
            "humidity" => SensorKind::Humidity,
            _ => SensorKind::Other,
        }
    }

    /// Title used on dashboard cards.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            SensorKind::Soil => "Soil Moisture",
            SensorKind::Temperature => "Temperature",
            SensorKind::Humidity => "Humidity",
            SensorKind::Other => "Sensor",
        }
    }

    /// Display unit for values of this kind.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Soil | SensorKind::Humidity => "%",
            SensorKind::Temperature => "°C",
            SensorKind::Other => "",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Soil => write!(f, "soil"),
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::Humidity => write!(f, "humidity"),
            SensorKind::Other => write!(f, "other"),
        }
    }
}

impl FromStr for SensorKind {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Classification band for a sensor value.
///
/// # Ordering
///
/// Levels are ordered by severity: `Optimal < Warning < Critical`.
///
/// ```
/// use farmwatch_types::StatusLevel;
///
/// assert!(StatusLevel::Critical > StatusLevel::Warning);
/// assert_eq!(StatusLevel::Warning.to_string(), "Warning");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StatusLevel {
    /// Value is within the healthy range.
    #[default]
    Optimal,
    /// Value is drifting out of range.
    Warning,
    /// Value needs attention now.
    Critical,
}

impl StatusLevel {
    /// Whether this level should draw attention (anything but optimal).
    #[must_use]
    pub fn needs_attention(self) -> bool {
        self != StatusLevel::Optimal
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLevel::Optimal => write!(f, "Optimal"),
            StatusLevel::Warning => write!(f, "Warning"),
            StatusLevel::Critical => write!(f, "Critical"),
        }
    }
}

/// Presentation color attached to a classification.
///
/// Carries no meaning beyond how a status is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorKey {
    Red,
    Orange,
    Green,
    Blue,
    Cyan,
    Gray,
}

/// State of the irrigation pump relay as reported by the field device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PumpState {
    /// Relay open (any reported value other than `1`).
    #[default]
    Inactive,
    /// Relay closed, pump running.
    Active,
}

impl From<i64> for PumpState {
    fn from(value: i64) -> Self {
        if value == 1 {
            PumpState::Active
        } else {
            PumpState::Inactive
        }
    }
}

impl fmt::Display for PumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PumpState::Active => write!(f, "ACTIVE"),
            PumpState::Inactive => write!(f, "INACTIVE"),
        }
    }
}

/// A source field of a feed entry.
///
/// Used to record which values had to be coerced to zero while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FeedField {
    /// `field1`.
    SoilMoisture,
    /// `field2`.
    Temperature,
    /// `field3`.
    Humidity,
    /// `field4`.
    Pump,
    /// `created_at`.
    CreatedAt,
}

impl FeedField {
    /// Name of the field in the provider's payload.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            FeedField::SoilMoisture => "field1",
            FeedField::Temperature => "field2",
            FeedField::Humidity => "field3",
            FeedField::Pump => "field4",
            FeedField::CreatedAt => "created_at",
        }
    }
}

impl fmt::Display for FeedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Local snapshot of the most recent feed entry.
///
/// A reading is always replaced as a whole, never merged. Fields that could
/// not be parsed hold `0` and are listed in `invalid_fields`, so a true zero
/// can be told apart from a parse failure.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Soil moisture in percent (0-100 nominal).
    pub soil_moisture: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Raw pump relay value (0 = inactive, 1 = active).
    pub pump_state: i64,
    /// Creation time of the feed entry, absent until the first successful fetch.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            with = "time::serde::rfc3339::option",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub last_updated: Option<time::OffsetDateTime>,
    /// Source fields that were missing or unparsable.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub invalid_fields: Vec<FeedField>,
}

impl Reading {
    /// Pump relay state.
    #[must_use]
    pub fn pump(&self) -> PumpState {
        PumpState::from(self.pump_state)
    }

    /// Value for the given sensor kind (`0.0` for [`SensorKind::Other`]).
    #[must_use]
    pub fn value(&self, kind: SensorKind) -> f64 {
        match kind {
            SensorKind::Soil => self.soil_moisture,
            SensorKind::Temperature => self.temperature,
            SensorKind::Humidity => self.humidity,
            SensorKind::Other => 0.0,
        }
    }

    /// Whether the given source field was parsed successfully.
    #[must_use]
    pub fn is_field_valid(&self, field: FeedField) -> bool {
        !self.invalid_fields.contains(&field)
    }

    /// Whether the value shown for `kind` came from a parse failure.
    #[must_use]
    pub fn is_coerced(&self, kind: SensorKind) -> bool {
        let field = match kind {
            SensorKind::Soil => FeedField::SoilMoisture,
            SensorKind::Temperature => FeedField::Temperature,
            SensorKind::Humidity => FeedField::Humidity,
            SensorKind::Other => return false,
        };
        !self.is_field_valid(field)
    }
}

/// Dashboard color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseError::UnknownTheme(other.to_string())),
        }
    }
}
