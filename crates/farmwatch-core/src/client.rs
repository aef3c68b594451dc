//! HTTP client for the telemetry provider's channel feed API.
//!
//! # Example
//!
//! ```no_run
//! use farmwatch_core::client::{ChannelConfig, FeedClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FeedClient::new(ChannelConfig::new("3066267", "READ_KEY"))?;
//!
//! match client.fetch_latest().await? {
//!     Some(reading) => println!("Soil moisture: {:.1}%", reading.soil_moisture),
//!     None => println!("Channel has no entries yet"),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use farmwatch_types::Reading;

use crate::error::{Error, Result};
use crate::feed::FeedResponse;
use crate::traits::TelemetrySource;

/// Default provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.thingspeak.com";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which channel to read and how to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Numeric channel id on the provider.
    pub channel_id: String,
    /// Read API key for the channel.
    pub read_api_key: String,
    /// Provider base URL.
    pub base_url: String,
}

impl ChannelConfig {
    /// Channel on the default provider endpoint.
    pub fn new(channel_id: impl Into<String>, read_api_key: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            read_api_key: read_api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// Keeps the read key out of `{:?}` output.
impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("channel_id", &self.channel_id)
            .field("read_api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// HTTP client for one telemetry channel.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    channel: ChannelConfig,
    feed_url: String,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(channel: ChannelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("farmwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Request(e.without_url()))?;
        Self::with_client(channel, client)
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(mut channel: ChannelConfig, client: Client) -> Result<Self> {
        // Normalize URL (remove trailing slash)
        channel.base_url = channel.base_url.trim_end_matches('/').to_string();

        if !channel.base_url.starts_with("http://") && !channel.base_url.starts_with("https://")
        {
            return Err(Error::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                channel.base_url
            )));
        }

        channel.channel_id = channel.channel_id.trim().to_string();
        if channel.channel_id.is_empty() {
            return Err(Error::invalid_config("channel id is empty"));
        }
        if !channel.channel_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid_config(format!(
                "channel id must be numeric, got: {}",
                channel.channel_id
            )));
        }
        if channel.read_api_key.trim().is_empty() {
            return Err(Error::invalid_config("read API key is empty"));
        }

        let feed_url = format!(
            "{}/channels/{}/feeds.json",
            channel.base_url, channel.channel_id
        );

        Ok(Self {
            client,
            channel,
            feed_url,
        })
    }

    /// Channel this client reads.
    pub fn channel(&self) -> &ChannelConfig {
        &self.channel
    }

    /// Feed URL without query parameters.
    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch the raw feed document for the most recent entry.
    pub async fn fetch_feed(&self) -> Result<FeedResponse> {
        debug!(url = %self.feed_url, "Requesting latest feed entry");

        let response = self
            .client
            .get(&self.feed_url)
            .query(&[
                ("api_key", self.channel.read_api_key.as_str()),
                ("results", "1"),
            ])
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: self.feed_url.clone(),
                source: e.without_url(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Request(e.without_url()))?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch and decode the most recent entry.
    ///
    /// Returns `Ok(None)` when `feeds` is missing or empty.
    pub async fn fetch_latest(&self) -> Result<Option<Reading>> {
        Ok(self.fetch_feed().await?.latest_reading())
    }
}

/// Pull a human-readable message out of a provider error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(|m| m.as_str()))
        .map(String::from)
}

#[async_trait]
impl TelemetrySource for FeedClient {
    async fn fetch_latest(&self) -> Result<Option<Reading>> {
        FeedClient::fetch_latest(self).await
    }

    fn describe(&self) -> String {
        format!("channel {} at {}", self.channel.channel_id, self.channel.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FeedClient::new(ChannelConfig::new("3066267", "KEY")).unwrap();
        assert_eq!(
            client.feed_url(),
            "https://api.thingspeak.com/channels/3066267/feeds.json"
        );
    }

    #[test]
    fn test_client_normalizes_url() {
        let channel = ChannelConfig::new("42", "KEY").with_base_url("http://localhost:8080/");
        let client = FeedClient::new(channel).unwrap();
        assert_eq!(client.channel().base_url, "http://localhost:8080");
        assert_eq!(client.feed_url(), "http://localhost:8080/channels/42/feeds.json");
    }

    #[test]
    fn test_client_invalid_url() {
        let channel = ChannelConfig::new("42", "KEY").with_base_url("localhost:8080");
        let result = FeedClient::new(channel);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_client_rejects_bad_channel() {
        assert!(matches!(
            FeedClient::new(ChannelConfig::new("  ", "KEY")),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            FeedClient::new(ChannelConfig::new("abc", "KEY")),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            FeedClient::new(ChannelConfig::new("42", "")),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let channel = ChannelConfig::new("42", "SECRET123");
        let debug = format!("{:?}", channel);
        assert!(!debug.contains("SECRET123"));
        assert!(debug.contains("<redacted>"));

        let client = FeedClient::new(channel).unwrap();
        assert!(!client.describe().contains("SECRET123"));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"status":"400","error":{"message":"Authorization Required"}}"#),
            Some("Authorization Required".to_string())
        );
        assert_eq!(
            error_message(r#"{"error":"bad key"}"#),
            Some("bad key".to_string())
        );
        assert_eq!(error_message("-1"), None);
        assert_eq!(error_message("<html>"), None);
    }
}
