//! Command-line argument definitions for the feed quality tool
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::config::Config;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the feed quality tool
///
/// Audits product-catalog feeds against data-quality rules and derives
/// candidate search terms from them.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "feed-quality",
    version,
    about = "Audit product feeds for data-quality problems",
    long_about = "Runs a battery of independent data-quality rules over every record of a \
                  Google Shopping style product feed (CSV or TSV): identifiers, categories, \
                  required attributes, GTIN format, text defects and likely misspellings. \
                  Large feeds are processed in concurrent chunks with live progress."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run every data-quality rule over a feed
    Analyze(AnalyzeArgs),
    /// Derive candidate search terms from a feed
    SearchTerms(SearchTermsArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/feed-quality/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Records per chunk (one progress update per chunk)
    #[arg(long = "chunk-size", value_name = "COUNT")]
    pub chunk_size: Option<usize>,

    /// Number of chunks evaluated concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Word-frequency dictionary for misspelling checks
    #[arg(long = "dictionary", value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Skip misspelling checks
    #[arg(long = "no-spelling", conflicts_with = "dictionary")]
    pub no_spelling: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress bars.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Write results to a file instead of stdout
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,
}

/// Arguments for the analyze command
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// Feed file (CSV or TSV)
    #[arg(value_name = "FEED")]
    pub feed: PathBuf,

    /// Number of sample findings shown per error type in human output
    #[arg(long = "samples", value_name = "COUNT", default_value_t = 3)]
    pub samples: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the search-terms command
#[derive(Debug, Clone, Parser)]
pub struct SearchTermsArgs {
    /// Feed file (CSV or TSV)
    #[arg(value_name = "FEED")]
    pub feed: PathBuf,

    /// Keyword volume export (CSV) used to estimate search volume
    #[arg(long = "volumes", value_name = "CSV")]
    pub volumes: Option<PathBuf>,

    /// Title words kept for title-based terms
    #[arg(long = "max-title-words", value_name = "COUNT")]
    pub max_title_words: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format, one row per finding or term
    Csv,
}

impl CommonArgs {
    /// Validate paths named on the command line
    pub fn validate(&self, feed: &Path) -> Result<()> {
        if !feed.is_file() {
            return Err(Error::configuration(format!(
                "Feed file does not exist: {}",
                feed.display()
            )));
        }

        if let Some(config_file) = &self.config_file
            && !config_file.exists()
        {
            return Err(Error::configuration(format!(
                "Config file does not exist: {}",
                config_file.display()
            )));
        }

        if let Some(parent) = self.output_file.as_ref().and_then(|file| file.parent())
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(Error::configuration(format!(
                "Output file directory does not exist: {}",
                parent.display()
            )));
        }

        Ok(())
    }

    /// Apply command-line overrides on top of loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(chunk_size) = self.chunk_size {
            config.pipeline.chunk_size = chunk_size;
            config.search_terms.chunk_size = chunk_size;
        }
        if let Some(workers) = self.workers {
            config.pipeline.workers = workers;
        }
        if let Some(dictionary) = &self.dictionary {
            config.spelling.dictionary_path = Some(dictionary.clone());
            config.spelling.enabled = true;
        }
        if self.no_spelling {
            config.spelling.enabled = false;
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
