//! Output formatting for readings.

use anyhow::Result;
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use farmwatch_core::clock::{format_clock, format_reading_time};
use farmwatch_core::{StatusInfo, SystemSummary, Thresholds};
use farmwatch_types::{ColorKey, FeedField, PumpState, Reading, SensorKind, StatusLevel};

/// Formatting options for reading output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            compact: false,
        }
    }

    /// Serialize to JSON, respecting the compact setting.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    /// Apply a status color unless colors are disabled.
    fn paint(&self, text: &str, color: ColorKey) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.color(ansi(color)).to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bold().to_string()
        }
    }
}

fn ansi(color: ColorKey) -> AnsiColors {
    match color {
        ColorKey::Red => AnsiColors::Red,
        ColorKey::Orange => AnsiColors::Yellow,
        ColorKey::Green => AnsiColors::Green,
        ColorKey::Blue => AnsiColors::Blue,
        ColorKey::Cyan => AnsiColors::Cyan,
        ColorKey::Gray => AnsiColors::BrightBlack,
    }
}

fn banner_color(summary: &SystemSummary) -> ColorKey {
    if summary.banner() == farmwatch_core::Banner::AllSystemsNominal {
        ColorKey::Green
    } else {
        ColorKey::Orange
    }
}

/// One classified sensor in a machine-readable report.
#[derive(Debug, Clone, Serialize)]
pub struct SensorReport {
    pub value: f64,
    pub unit: &'static str,
    pub status: StatusLevel,
    pub color: ColorKey,
    /// `false` when the value was coerced from an unparsable field.
    pub valid: bool,
}

impl SensorReport {
    fn new(reading: &Reading, kind: SensorKind, info: StatusInfo) -> Self {
        Self {
            value: reading.value(kind),
            unit: kind.unit(),
            status: info.level,
            color: info.color,
            valid: !reading.is_coerced(kind),
        }
    }
}

/// Reading plus its classification, as emitted by `read --format json`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingReport {
    pub soil_moisture: SensorReport,
    pub humidity: SensorReport,
    pub temperature: SensorReport,
    pub pump: PumpState,
    pub pump_state: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub summary: SystemSummary,
    pub banner: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_fields: Vec<FeedField>,
}

impl ReadingReport {
    pub fn new(reading: &Reading, thresholds: &Thresholds) -> Self {
        let sensor = |kind| SensorReport::new(reading, kind, thresholds.classify_reading(reading, kind));
        let summary = thresholds.summarize(reading);
        Self {
            soil_moisture: sensor(SensorKind::Soil),
            humidity: sensor(SensorKind::Humidity),
            temperature: sensor(SensorKind::Temperature),
            pump: reading.pump(),
            pump_state: reading.pump_state,
            last_updated: reading.last_updated.and_then(|ts| ts.format(&Rfc3339).ok()),
            summary,
            banner: summary.banner().text(),
            invalid_fields: reading.invalid_fields.clone(),
        }
    }
}

/// Multi-line text report for `read`.
#[must_use]
pub fn format_reading_text(reading: &Reading, thresholds: &Thresholds, opts: &FormatOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        opts.bold("Last Sensor Reading:"),
        format_reading_time(reading.last_updated)
    ));

    for kind in SensorKind::DISPLAYED {
        let info = thresholds.classify_reading(reading, kind);
        let value = format!("{:.1} {}", reading.value(kind), kind.unit());
        let marker = if info.level.needs_attention() { " (!)" } else { "" };
        let invalid = if reading.is_coerced(kind) {
            " (unreadable field, shown as 0)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {:<15} {:>9}  {}{}{}\n",
            kind.title(),
            value,
            opts.paint(&format!("[{}]", info.level), info.color),
            marker,
            invalid
        ));
    }

    let pump = reading.pump();
    let pump_color = match pump {
        PumpState::Active => ColorKey::Green,
        PumpState::Inactive => ColorKey::Gray,
    };
    out.push_str(&format!(
        "  {:<15} {:>9}\n",
        "Pump System",
        opts.paint(&pump.to_string(), pump_color)
    ));

    let summary = thresholds.summarize(reading);
    out.push_str(&format!(
        "{} {} ({} optimal, {} warnings, {} critical)\n",
        opts.bold("System Status:"),
        opts.paint(summary.banner().text(), banner_color(&summary)),
        summary.optimal,
        summary.warning,
        summary.critical
    ));
    out
}

/// Single line for `watch` output.
#[must_use]
pub fn format_watch_line(
    reading: &Reading,
    thresholds: &Thresholds,
    now: &chrono::DateTime<chrono::Local>,
    opts: &FormatOptions,
) -> String {
    let sensors: Vec<String> = SensorKind::DISPLAYED
        .iter()
        .map(|&kind| {
            let info = thresholds.classify_reading(reading, kind);
            format!(
                "{} {:.1}{} {}",
                kind,
                reading.value(kind),
                kind.unit(),
                opts.paint(&info.level.to_string(), info.color)
            )
        })
        .collect();
    let summary = thresholds.summarize(reading);
    format!(
        "[{}] {} | pump {} | {}\n",
        format_clock(now),
        sensors.join(" | "),
        reading.pump(),
        opts.paint(summary.banner().text(), banner_color(&summary))
    )
}
