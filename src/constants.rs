//! Application constants for the feed quality engine
//!
//! This module contains rule thresholds, fixed vocabularies, default values
//! and sentinel strings used throughout the engine.

// =============================================================================
// Record Identity
// =============================================================================

/// Identifier reported for findings on records without a usable `id`
pub const UNKNOWN_ID: &str = "UNKNOWN";

/// Maximum identifier length accepted by Google Merchant Center
pub const MAX_ID_LENGTH: usize = 100;

// =============================================================================
// Category Rules
// =============================================================================

/// Separator between Google product category path segments
pub const CATEGORY_SEPARATOR: char = '>';

/// Minimum number of non-blank category segments for a specific category
pub const MIN_CATEGORY_DEPTH: usize = 3;

/// Case-insensitive marker that makes a category an apparel category
pub const APPAREL_MARKER: &str = "apparel";

// =============================================================================
// Identifier (GTIN) Rules
// =============================================================================

/// Valid GTIN lengths: GTIN-8, UPC (GTIN-12), EAN (GTIN-13), ITF-14 (GTIN-14)
pub const VALID_GTIN_LENGTHS: &[usize] = &[8, 12, 13, 14];

// =============================================================================
// Attribute Vocabularies
// =============================================================================

/// Vocabulary lists matched whole-word and case-insensitively against titles
pub mod vocabulary {
    /// Title words implying a female product
    pub const FEMALE_TERMS: &[&str] = &[
        "women", "womens", "woman", "female", "ladies", "lady", "girl", "girls",
    ];

    /// Title words implying a male product
    pub const MALE_TERMS: &[&str] = &[
        "men",
        "mens",
        "man",
        "male",
        "gentlemen",
        "gents",
        "boy",
        "boys",
    ];

    /// Title words implying a product for children
    pub const KID_TERMS: &[&str] = &[
        "kids", "kid", "children", "child", "childrens", "baby", "babies", "toddler", "infant",
        "junior", "youth",
    ];

    /// Title words implying a product for adults
    pub const ADULT_TERMS: &[&str] = &["adult", "adults", "men", "mens", "women", "womens", "ladies"];

    /// Declared age groups that conflict with adult title terms
    pub const CHILD_AGE_GROUPS: &[&str] = &["infant", "toddler", "newborn", "kids"];

    /// Declared age group that conflicts with kid title terms
    pub const ADULT_AGE_GROUP: &str = "adult";

    /// Declared gender values
    pub const GENDER_FEMALE: &str = "female";
    pub const GENDER_MALE: &str = "male";
    pub const GENDER_UNISEX: &str = "unisex";
}

// =============================================================================
// Text Quality Rules
// =============================================================================

/// Abbreviations discouraged in titles and descriptions
///
/// `in` is handled separately: it is only flagged when it stands alone as a
/// unit, never inside longer words.
pub const DISALLOWED_ABBREVIATIONS: &[&str] = &[
    "approx", "asst", "ea", "excl", "incl", "pcs", "pkg", "pk", "qty", "w/o", "yds",
];

/// Inch abbreviation checked with whitespace/edge guards
pub const INCH_ABBREVIATION: &str = "in";

// =============================================================================
// Fuzzy Matching Defaults
// =============================================================================

/// Maximum edit distance for dictionary suggestions
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Number of leading characters indexed per dictionary entry
pub const DEFAULT_PREFIX_LENGTH: usize = 7;

/// Shortest word considered for misspelling detection
pub const DEFAULT_MIN_WORD_LENGTH: usize = 4;

/// Maximum number of suggestions quoted in a finding's detail text
pub const MAX_SUGGESTIONS_IN_DETAILS: usize = 3;

/// Default dictionary file name under the user data directory
pub const DEFAULT_DICTIONARY_FILENAME: &str = "frequency_dictionary_en.txt";

// =============================================================================
// Pipeline Defaults
// =============================================================================

/// Records per chunk (one progress event per chunk)
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Upper bound on configured worker count
pub const MAX_WORKERS: usize = 256;

/// Products per chunk for search-term generation
pub const DEFAULT_SEARCH_TERM_CHUNK_SIZE: usize = 250;

/// Title words kept for the `title_core` search-term pattern
pub const DEFAULT_MAX_TITLE_WORDS: usize = 4;

/// Application directory name used under the user config/data directories
pub const APP_DIR_NAME: &str = "feed-quality";

/// Configuration file name
pub const CONFIG_FILENAME: &str = "config.toml";
