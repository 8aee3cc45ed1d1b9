//! Text defect detection for titles and descriptions
//!
//! Four independent pattern classes are evaluated; a string may trigger any
//! combination of them.

use crate::app::models::ErrorType;
use crate::constants::{DISALLOWED_ABBREVIATIONS, INCH_ABBREVIATION};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// A class of text defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefectKind {
    /// A word character followed by a comma and a letter ("red,blue")
    MissingSpaceAfterComma,
    /// `--` or `- -`
    RepeatedDashes,
    /// Characters outside letters, digits, whitespace and `. , ; : ( ) -`
    SpecialCharacters,
    /// Words from the disallowed abbreviation list
    Abbreviations,
}

impl DefectKind {
    /// All defect kinds in reporting order
    pub const ALL: &'static [DefectKind] = &[
        DefectKind::MissingSpaceAfterComma,
        DefectKind::RepeatedDashes,
        DefectKind::SpecialCharacters,
        DefectKind::Abbreviations,
    ];

    /// Finding type reported for this defect
    pub fn error_type(&self) -> ErrorType {
        match self {
            DefectKind::MissingSpaceAfterComma => ErrorType::MissingSpaceAfterComma,
            DefectKind::RepeatedDashes => ErrorType::RepeatedDashes,
            DefectKind::SpecialCharacters => ErrorType::SpecialCharacters,
            DefectKind::Abbreviations => ErrorType::Abbreviations,
        }
    }

    /// Check whether `text` exhibits this defect
    pub fn is_present(&self, text: &str) -> bool {
        match self {
            DefectKind::MissingSpaceAfterComma => matches(&MISSING_SPACE, text),
            DefectKind::RepeatedDashes => matches(&REPEATED_DASHES, text),
            DefectKind::SpecialCharacters => matches(&SPECIAL_CHARACTER, text),
            DefectKind::Abbreviations => {
                matches(&ABBREVIATION, text) || matches(&INCH_UNIT, text)
            }
        }
    }
}

static MISSING_SPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\w,\p{L}").ok());

static REPEATED_DASHES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"--|- -").ok());

static SPECIAL_CHARACTER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s.,;:()\-]").ok());

static ABBREVIATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let alternatives = DISALLOWED_ABBREVIATIONS
        .iter()
        .map(|abbreviation| regex::escape(abbreviation))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).ok()
});

// Rust regex has no lookaround, so the whitespace/edge guard is matched
// explicitly instead.
static INCH_UNIT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:^|\s){}(?:\s|$)",
        regex::escape(INCH_ABBREVIATION)
    ))
    .ok()
});

fn matches(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Detect every defect kind present in `raw`
///
/// # Examples
///
/// ```rust
/// use feed_quality::app::services::text_normalizer::{DefectKind, detect_text_defects};
///
/// let defects = detect_text_defects("Shirt -- red,blue");
/// assert!(defects.contains(&DefectKind::RepeatedDashes));
/// assert!(defects.contains(&DefectKind::MissingSpaceAfterComma));
/// assert!(!defects.contains(&DefectKind::SpecialCharacters));
/// ```
pub fn detect_text_defects(raw: &str) -> BTreeSet<DefectKind> {
    DefectKind::ALL
        .iter()
        .copied()
        .filter(|kind| kind.is_present(raw))
        .collect()
}

/// Distinct disallowed characters in order of first appearance
pub fn special_characters(raw: &str) -> Vec<char> {
    let mut found = Vec::new();
    if let Some(re) = SPECIAL_CHARACTER.as_ref() {
        for m in re.find_iter(raw) {
            for c in m.as_str().chars() {
                if !found.contains(&c) {
                    found.push(c);
                }
            }
        }
    }
    found
}

/// Distinct disallowed abbreviations (lowercased) in order of first appearance
pub fn abbreviations(raw: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    if let Some(re) = ABBREVIATION.as_ref() {
        for m in re.find_iter(raw) {
            let abbreviation = m.as_str().to_lowercase();
            if !found.contains(&abbreviation) {
                found.push(abbreviation);
            }
        }
    }
    if matches(&INCH_UNIT, raw) && !found.iter().any(|a| a == INCH_ABBREVIATION) {
        found.push(INCH_ABBREVIATION.to_string());
    }
    found
}

/// Alphabetic tokens of `raw`, split on every non-letter character
pub fn words(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
}
