//! Configuration file management.
//!
//! Settings come from three places, highest precedence first: command-line
//! flags (or their environment variables), the TOML config file, and
//! built-in defaults.
//!
//! ```toml
//! channel_id = "3066267"
//! read_api_key = "XXXXXXXXXXXXXXXX"
//!
//! [dashboard]
//! theme = "dark"
//! poll_interval_secs = 15
//! location = "North field"
//!
//! [thresholds.soil]
//! critical_below = 30.0
//! warning_below = 40.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use farmwatch_core::{ChannelConfig, DEFAULT_BASE_URL, ThresholdConfig, Thresholds};
use farmwatch_types::Theme;

/// Default poll period in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Telemetry channel id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Read API key for the channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_api_key: Option<String>,

    /// Provider base URL (defaults to the public ThingSpeak API)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Dashboard appearance and cadence
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Status band limits per sensor
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

/// Dashboard-specific configuration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Initial theme: "dark" or "light".
    #[serde(default)]
    pub theme: Theme,

    /// Seconds between telemetry polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Location label shown in the footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Owner label shown in the footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Show poll success/failure counters on the dashboard.
    #[serde(default)]
    pub show_poll_health: bool,
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            location: None,
            owner: None,
            show_poll_health: false,
        }
    }
}

impl DashboardConfig {
    /// Poll period as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Starter file written by `config init`.
pub const CONFIG_TEMPLATE: &str = r#"# farmwatch configuration

# Telemetry channel to read. Both values can also be supplied with
# --channel / FARMWATCH_CHANNEL_ID and --api-key / FARMWATCH_READ_API_KEY.
# channel_id = ""
# read_api_key = ""
# base_url = "https://api.thingspeak.com"

[dashboard]
theme = "dark"
poll_interval_secs = 15
# location = ""
# owner = ""
show_poll_health = false

[thresholds.soil]
critical_below = 30.0
warning_below = 40.0

[thresholds.temperature]
critical_below = 15.0
warning_below = 20.0
warning_above = 30.0
critical_above = 35.0

[thresholds.humidity]
critical_below = 25.0
warning_below = 35.0
warning_above = 80.0
critical_above = 90.0
"#;

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("farmwatch")
            .join("config.toml")
    }

    /// Load config from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load config from `path`, or return defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_file(path, &content)
    }

    /// Copy of this config with the read key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            read_api_key: self.read_api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }

    /// Merge overrides and validate everything needed to run.
    pub fn resolve(&self, overrides: &Overrides) -> Result<Settings> {
        let channel_id = pick(&overrides.channel_id, &self.channel_id).context(
            "No channel id configured. Pass --channel, set FARMWATCH_CHANNEL_ID, \
             or add channel_id to the config file",
        )?;
        let read_api_key = pick(&overrides.read_api_key, &self.read_api_key).context(
            "No read API key configured. Pass --api-key, set FARMWATCH_READ_API_KEY, \
             or add read_api_key to the config file",
        )?;
        let base_url = pick(&overrides.base_url, &self.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut dashboard = self.dashboard.clone();
        if let Some(theme) = overrides.theme {
            dashboard.theme = theme;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            dashboard.poll_interval_secs = secs;
        }
        if dashboard.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be at least 1");
        }

        let thresholds =
            Thresholds::new(self.thresholds.clone()).context("Invalid [thresholds] table")?;

        Ok(Settings {
            channel: ChannelConfig::new(channel_id, read_api_key).with_base_url(base_url),
            dashboard,
            thresholds,
        })
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write config: {}", path.display()))
}

fn pick(preferred: &Option<String>, fallback: &Option<String>) -> Option<String> {
    preferred
        .as_deref()
        .or(fallback.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub channel_id: Option<String>,
    pub read_api_key: Option<String>,
    pub base_url: Option<String>,
    pub theme: Option<Theme>,
    pub poll_interval_secs: Option<u64>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub channel: ChannelConfig,
    pub dashboard: DashboardConfig,
    pub thresholds: Thresholds,
}
