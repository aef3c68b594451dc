//! Watch command implementation.
//!
//! Runs the same poller as the dashboard and prints one line per reading.
//! Empty feeds and failed polls are logged by the poller and otherwise
//! skipped.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info};

use farmwatch_cli::config::Settings;
use farmwatch_core::{FeedClient, PollEvent, TelemetryPoller};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, ReadingReport, format_watch_line};

/// Arguments for the watch command.
pub struct WatchArgs<'a> {
    pub settings: &'a Settings,
    pub interval: Duration,
    pub count: u32,
    pub format: OutputFormat,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_watch(args: WatchArgs<'_>) -> Result<()> {
    let WatchArgs {
        settings,
        interval,
        count,
        format,
        opts,
    } = args;

    let client = FeedClient::new(settings.channel.clone()).context("Invalid channel settings")?;
    let (event_tx, mut event_rx) = mpsc::channel(16);
    let poller = TelemetryPoller::new(Arc::new(client), interval).spawn(event_tx);

    let json_opts = FormatOptions {
        compact: true,
        ..*opts
    };
    let mut readings_taken: u32 = 0;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
            event = event_rx.recv() => match event {
                Some(PollEvent::Updated(reading)) => {
                    let line = match format {
                        OutputFormat::Json => json_opts.as_json(&ReadingReport::new(&reading, &settings.thresholds))?,
                        OutputFormat::Text => format_watch_line(&reading, &settings.thresholds, &Local::now(), opts),
                    };
                    print!("{}", line);
                    readings_taken += 1;
                    if count > 0 && readings_taken >= count {
                        break;
                    }
                }
                Some(other) => debug!(?other, "Skipping poll without a reading"),
                None => break,
            },
        }
    }

    poller.shutdown().await;
    if count > 0 {
        eprintln!("Completed {} readings.", readings_taken);
    }
    Ok(())
}
