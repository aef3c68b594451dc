//! Read command implementation.

use anyhow::{Context, Result, bail};
use tracing::debug;

use farmwatch_cli::config::Settings;
use farmwatch_core::FeedClient;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, ReadingReport, format_reading_text};

pub async fn cmd_read(settings: &Settings, format: OutputFormat, opts: &FormatOptions) -> Result<()> {
    let client = FeedClient::new(settings.channel.clone()).context("Invalid channel settings")?;
    debug!(url = client.feed_url(), "Fetching latest reading");

    let Some(reading) = client
        .fetch_latest()
        .await
        .context("Failed to fetch the latest reading")?
    else {
        bail!(
            "Channel {} has no entries yet",
            settings.channel.channel_id
        );
    };

    let output = match format {
        OutputFormat::Json => opts.as_json(&ReadingReport::new(&reading, &settings.thresholds))?,
        OutputFormat::Text => format_reading_text(&reading, &settings.thresholds, opts),
    };
    print!("{}", output);
    Ok(())
}
