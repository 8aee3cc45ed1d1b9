//! Shared components for CLI commands
//!
//! This module contains common utilities used across the command
//! implementations: logging setup, layered configuration loading, progress
//! bars driven by pipeline events and output writing.

use crate::app::services::feed_pipeline::{ProgressEvent, ProgressSink, ProgressStatus};
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::Result;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}";

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("feed_quality={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults");
    }

    let mut config = Config::load_layered(config_file)?;
    args.apply_overrides(&mut config);
    config.validate()?;

    Ok(config)
}

/// Create a progress bar with the standard style
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Progress sink that drives an indicatif bar from pipeline events
///
/// The bar length follows the `total` carried by events, so it can be
/// created before the feed is loaded.
#[derive(Debug, Clone)]
pub struct ProgressBarSink {
    bar: ProgressBar,
}

impl ProgressBarSink {
    pub fn new(message: &str, visible: bool) -> Self {
        let bar = if visible {
            create_progress_bar(0, message)
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl ProgressSink for ProgressBarSink {
    fn emit(&self, event: ProgressEvent) {
        if let Some(total) = event.total {
            self.bar.set_length(total as u64);
        }
        if let Some(processed) = event.processed {
            self.bar.set_position(processed as u64);
        }

        match event.status {
            ProgressStatus::Analyzing | ProgressStatus::Chunking => {
                if let Some(message) = event.message {
                    self.bar.set_message(message);
                }
            }
            ProgressStatus::Chunk => {
                if let (Some(index), Some(total_chunks)) = (event.chunk_index, event.total_chunks) {
                    self.bar
                        .set_message(format!("chunk {}/{}", index + 1, total_chunks));
                }
            }
            ProgressStatus::Error if event.chunk_index.is_some() => {
                self.bar.println(format!(
                    "⚠️  {}",
                    event.message.as_deref().unwrap_or("Chunk failed")
                ));
            }
            ProgressStatus::Error => {
                self.bar
                    .abandon_with_message(event.message.unwrap_or_else(|| "Cancelled".into()));
            }
            ProgressStatus::Complete => {
                self.bar
                    .finish_with_message(event.message.unwrap_or_else(|| "Done".into()));
            }
        }
    }
}

/// Write rendered output to `output_file`, or stdout when none is given
pub fn write_output(content: &str, output_file: Option<&Path>) -> anyhow::Result<()> {
    match output_file {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Results written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write output to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Disable ANSI colours when output does not go to a terminal
pub fn configure_colors(output_file: Option<&Path>) {
    if output_file.is_some() {
        colored::control::set_override(false);
    }
}

/// RFC 3339 timestamp stamped on machine-readable output
pub fn generated_at() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
