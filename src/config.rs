//! Configuration management and validation.
//!
//! Provides configuration structures for pipeline chunking and concurrency,
//! spelling dictionary settings and search-term generation, loaded in
//! layers: built-in defaults, then an optional TOML file, then command-line
//! overrides.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILENAME, DEFAULT_CHUNK_SIZE, DEFAULT_DICTIONARY_FILENAME,
    DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_MAX_TITLE_WORDS, DEFAULT_MIN_WORD_LENGTH,
    DEFAULT_PREFIX_LENGTH, DEFAULT_SEARCH_TERM_CHUNK_SIZE, MAX_WORKERS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chunking and concurrency for rule evaluation
    pub pipeline: PipelineConfig,

    /// Spelling dictionary settings
    pub spelling: SpellingConfig,

    /// Search-term generation settings
    pub search_terms: SearchTermConfig,
}

/// Pipeline chunking and concurrency configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Records per chunk; one progress event is emitted per chunk
    pub chunk_size: usize,

    /// Number of chunks evaluated concurrently
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
        }
    }
}

/// Spelling dictionary configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellingConfig {
    /// Enable misspelling checks
    pub enabled: bool,

    /// Word-frequency dictionary file (`word count` per line)
    pub dictionary_path: Option<PathBuf>,

    /// Maximum edit distance for suggestions
    pub max_edit_distance: usize,

    /// Leading characters indexed per dictionary entry
    pub prefix_length: usize,

    /// Shortest word checked for misspellings
    pub min_word_length: usize,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dictionary_path: None,
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
        }
    }
}

/// Search-term generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchTermConfig {
    /// Products per streamed chunk
    pub chunk_size: usize,

    /// Title words kept for the title-core pattern
    pub max_title_words: usize,
}

impl Default for SearchTermConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_SEARCH_TERM_CHUNK_SIZE,
            max_title_words: DEFAULT_MAX_TITLE_WORDS,
        }
    }
}

impl Config {
    /// Default config file location: `<config_dir>/feed-quality/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Default dictionary location: `<data_dir>/feed-quality/frequency_dictionary_en.txt`
    pub fn default_dictionary_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_DICTIONARY_FILENAME))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config_file(origin, e))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load defaults overlaid with an optional config file
    ///
    /// When the spelling section names no dictionary, the default dictionary
    /// location is used if a file exists there.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if config.spelling.dictionary_path.is_none() {
            config.spelling.dictionary_path =
                Self::default_dictionary_path().filter(|path| path.exists());
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.chunk_size == 0 {
            return Err(Error::configuration(
                "Chunk size must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.workers > MAX_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {MAX_WORKERS}"
            )));
        }

        if self.spelling.max_edit_distance > 3 {
            return Err(Error::configuration(
                "Maximum edit distance cannot exceed 3".to_string(),
            ));
        }

        if self.spelling.prefix_length == 0 {
            return Err(Error::configuration(
                "Dictionary prefix length must be at least 1".to_string(),
            ));
        }

        if self.search_terms.chunk_size == 0 {
            return Err(Error::configuration(
                "Search-term chunk size must be greater than 0".to_string(),
            ));
        }

        if self.search_terms.max_title_words < 2 {
            return Err(Error::configuration(
                "Search-term title words must be at least 2".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the pipeline chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.pipeline.chunk_size = chunk_size;
        self
    }

    /// Set the pipeline worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.pipeline.workers = workers;
        self
    }

    /// Set the spelling dictionary path
    pub fn with_dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.spelling.dictionary_path = Some(path.into());
        self
    }

    /// Disable misspelling checks
    pub fn without_spelling(mut self) -> Self {
        self.spelling.enabled = false;
        self
    }
}
