//! Feed Quality Library
//!
//! A Rust library for auditing product-catalog feeds (Google Shopping and
//! compatible CSV/TSV exports) against a battery of independent data-quality
//! rules.
//!
//! This library provides tools for:
//! - Loading delimited feed files into typed [`FeedItem`] records
//! - Normalizing free text and spreadsheet-corrupted identifiers
//! - Flagging likely misspellings with a symmetric-delete fuzzy dictionary
//! - Running an ordered registry of checkers over every record
//! - Chunked, concurrent evaluation with ordered progress events and cancellation
//! - Deriving candidate search terms from the same catalog

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod checkers;
        pub mod feed_loader;
        pub mod feed_pipeline;
        pub mod fuzzy_matcher;
        pub mod search_terms;
        pub mod text_normalizer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ErrorResult, ErrorType, FeedField, FeedItem};
pub use app::services::feed_pipeline::{AggregationReport, FeedPipeline, ProgressEvent};
pub use config::Config;

/// Result type alias for the feed quality engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feed quality operations
///
/// Validation findings are never represented here: they are ordinary output
/// ([`ErrorResult`]). These variants describe failures of the engine itself.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV/TSV parsing error
    #[error("Feed parsing error in '{file}': {message}")]
    FeedParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// No records could be obtained from the feed source
    #[error("Feed source error: {message}")]
    FeedSource { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration file '{path}': {message}")]
    ConfigFile {
        path: String,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    /// Spelling dictionary could not be loaded
    #[error("Dictionary error: {message}")]
    Dictionary { message: String },

    /// Keyword volume lookup failed
    #[error("Keyword volume lookup failed: {message}")]
    KeywordVolume { message: String },

    /// Report serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a feed parsing error with context
    pub fn feed_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::FeedParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a feed source error
    pub fn feed_source(message: impl Into<String>) -> Self {
        Self::FeedSource {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration file error
    pub fn config_file(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ConfigFile {
            path: path.into(),
            message: source.message().to_string(),
            source,
        }
    }

    /// Create a dictionary error
    pub fn dictionary(message: impl Into<String>) -> Self {
        Self::Dictionary {
            message: message.into(),
        }
    }

    /// Create a keyword volume error
    pub fn keyword_volume(message: impl Into<String>) -> Self {
        Self::KeywordVolume {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::FeedParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
