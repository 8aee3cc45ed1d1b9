//! Fuzzy matching for misspelling detection
//!
//! Wraps a symmetric-delete dictionary index (maximum edit distance 2,
//! prefix length 7 by default) behind the [`SpellChecker`] trait so the
//! rule registry can be given a real matcher in production and a fake in
//! tests.
//!
//! # Lifecycle
//!
//! A [`FuzzyMatcher`] is built once and shared (it is cheap to clone). When
//! built from a file path the dictionary is read on first use; the load is
//! guarded by a [`OnceLock`] so exactly one caller performs it while
//! concurrent callers wait for the result. A failed load is logged and the
//! matcher degrades to reporting nothing.

pub mod index;

pub use index::{SymSpellIndex, Suggestion};

use crate::Result;
use crate::config::SpellingConfig;
use crate::constants::{DEFAULT_MAX_EDIT_DISTANCE, DEFAULT_MIN_WORD_LENGTH, DEFAULT_PREFIX_LENGTH};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Misspelling lookups used by text-quality rules
///
/// Methods return `Result` so a failing backend can surface as a chunk
/// fault; the built-in [`FuzzyMatcher`] never fails.
pub trait SpellChecker: Send + Sync {
    /// Dictionary entries close to `word`, closest first
    fn suggestions(&self, word: &str) -> Result<Vec<Suggestion>>;

    /// Whether `word` looks like a misspelling of a dictionary entry
    fn is_likely_misspelled(&self, word: &str) -> Result<bool>;

    /// Suggestions for `word` when it looks misspelled, `None` otherwise
    ///
    /// Backends that can answer both questions from one lookup should
    /// override this.
    fn misspelling(&self, word: &str) -> Result<Option<Vec<Suggestion>>> {
        if self.is_likely_misspelled(word)? {
            self.suggestions(word).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Tuning parameters for a [`FuzzyMatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherSettings {
    pub max_edit_distance: usize,
    pub prefix_length: usize,
    pub min_word_length: usize,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
        }
    }
}

impl From<&SpellingConfig> for MatcherSettings {
    fn from(config: &SpellingConfig) -> Self {
        Self {
            max_edit_distance: config.max_edit_distance,
            prefix_length: config.prefix_length,
            min_word_length: config.min_word_length,
        }
    }
}

#[derive(Debug)]
enum DictionarySource {
    Preloaded,
    File(PathBuf),
    Disabled,
}

struct MatcherInner {
    settings: MatcherSettings,
    source: DictionarySource,
    index: OnceLock<Option<SymSpellIndex>>,
}

/// Dictionary-backed fuzzy matcher
#[derive(Clone)]
pub struct FuzzyMatcher {
    inner: Arc<MatcherInner>,
}

impl fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyMatcher")
            .field("settings", &self.inner.settings)
            .field("source", &self.inner.source)
            .field("loaded", &self.inner.index.get().is_some())
            .finish()
    }
}

impl FuzzyMatcher {
    /// Build a matcher from an in-memory word list
    pub fn from_words<I, S>(words: I, settings: MatcherSettings) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut index = SymSpellIndex::new(settings.max_edit_distance, settings.prefix_length);
        for (word, count) in words {
            index.insert(word.as_ref(), count);
        }

        Self {
            inner: Arc::new(MatcherInner {
                settings,
                source: DictionarySource::Preloaded,
                index: OnceLock::from(Some(index)),
            }),
        }
    }

    /// Build a matcher that reads `path` on first use
    pub fn from_path(path: impl Into<PathBuf>, settings: MatcherSettings) -> Self {
        Self {
            inner: Arc::new(MatcherInner {
                settings,
                source: DictionarySource::File(path.into()),
                index: OnceLock::new(),
            }),
        }
    }

    /// Build a matcher from `path`, loading the dictionary immediately
    pub fn load(path: impl Into<PathBuf>, settings: MatcherSettings) -> Self {
        let matcher = Self::from_path(path, settings);
        matcher.index();
        matcher
    }

    /// Build a matcher from spelling configuration
    ///
    /// Returns a disabled matcher when spelling checks are turned off or no
    /// dictionary path is configured.
    pub fn from_config(config: &SpellingConfig) -> Self {
        match (&config.dictionary_path, config.enabled) {
            (Some(path), true) => Self::from_path(path.clone(), MatcherSettings::from(config)),
            _ => {
                debug!("Spelling checks disabled: no dictionary configured");
                Self::disabled()
            }
        }
    }

    /// A matcher with no dictionary that never reports anything
    pub fn disabled() -> Self {
        Self {
            inner: Arc::new(MatcherInner {
                settings: MatcherSettings::default(),
                source: DictionarySource::Disabled,
                index: OnceLock::from(None),
            }),
        }
    }

    /// Matcher settings
    pub fn settings(&self) -> MatcherSettings {
        self.inner.settings
    }

    /// Whether a dictionary is loaded (triggers a pending lazy load)
    pub fn is_available(&self) -> bool {
        self.index().is_some()
    }

    /// Number of dictionary entries (0 when unavailable)
    pub fn dictionary_size(&self) -> usize {
        self.index().map_or(0, SymSpellIndex::len)
    }

    fn index(&self) -> Option<&SymSpellIndex> {
        self.inner
            .index
            .get_or_init(|| self.load_index())
            .as_ref()
    }

    fn load_index(&self) -> Option<SymSpellIndex> {
        let DictionarySource::File(path) = &self.inner.source else {
            return None;
        };

        match read_dictionary(path, self.inner.settings) {
            Ok(index) => {
                info!(
                    "Loaded spelling dictionary: {} entries from {}",
                    index.len(),
                    path.display()
                );
                Some(index)
            }
            Err(e) => {
                warn!(
                    "Spelling dictionary unavailable, misspelling checks disabled: {}",
                    e
                );
                None
            }
        }
    }
}

fn read_dictionary(path: &Path, settings: MatcherSettings) -> Result<SymSpellIndex> {
    let file = File::open(path).map_err(|e| {
        crate::Error::io(
            format!("Failed to open dictionary {}", path.display()),
            e,
        )
    })?;
    SymSpellIndex::from_reader(
        BufReader::new(file),
        settings.max_edit_distance,
        settings.prefix_length,
    )
}

impl SpellChecker for FuzzyMatcher {
    fn suggestions(&self, word: &str) -> Result<Vec<Suggestion>> {
        Ok(self
            .index()
            .map(|index| index.lookup(word, self.inner.settings.max_edit_distance))
            .unwrap_or_default())
    }

    fn is_likely_misspelled(&self, word: &str) -> Result<bool> {
        Ok(self.misspelling(word)?.is_some())
    }

    fn misspelling(&self, word: &str) -> Result<Option<Vec<Suggestion>>> {
        let Some(index) = self.index() else {
            return Ok(None);
        };

        let word = word.trim();
        if word.chars().count() < self.inner.settings.min_word_length
            || !word.chars().all(char::is_alphabetic)
            || index.contains(word)
        {
            return Ok(None);
        }

        let suggestions = index.lookup(word, self.inner.settings.max_edit_distance);
        Ok((!suggestions.is_empty()).then_some(suggestions))
    }
}
