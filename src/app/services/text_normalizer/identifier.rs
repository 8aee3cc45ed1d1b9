//! Identifier cleaning for GTIN-like numeric codes
//!
//! Spreadsheet tools routinely turn long numeric codes into floating-point
//! scientific notation ("4.00638E+12"). Cleaning reconstructs the integer
//! form so length validation sees the digits the merchant intended.
//!
//! Precision caveat: values are round-tripped through `f64`, so codes whose
//! significant digits exceed what a double can represent are reconstructed
//! approximately. The exported value has usually lost those digits already.

use regex::Regex;
use std::sync::LazyLock;

static SCIENTIFIC_NOTATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)[eE][+-]?\d+$").ok());

/// Check whether a value is written in scientific notation
pub fn is_scientific_notation(raw: &str) -> bool {
    SCIENTIFIC_NOTATION
        .as_ref()
        .is_some_and(|re| re.is_match(raw.trim()))
}

/// Clean an identifier to a plain digit string
///
/// Scientific-notation input is parsed, rounded to the nearest integer and
/// rendered without exponent or sign. Any other input has every non-digit
/// character removed. Empty input yields an empty string.
///
/// The output only ever contains ASCII digits, so cleaning is idempotent.
///
/// # Examples
///
/// ```rust
/// use feed_quality::app::services::text_normalizer::clean_identifier;
///
/// assert_eq!(clean_identifier("1.234567E12"), "1234567000000");
/// assert_eq!(clean_identifier("0 12345-67890 5"), "012345678905");
/// assert_eq!(clean_identifier(""), "");
/// ```
pub fn clean_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(expanded) = expand_scientific_notation(trimmed) {
        return expanded;
    }

    trimmed.chars().filter(char::is_ascii_digit).collect()
}

fn expand_scientific_notation(value: &str) -> Option<String> {
    if !is_scientific_notation(value) {
        return None;
    }

    let parsed: f64 = value.parse().ok()?;
    let rounded = parsed.round().abs();
    if !rounded.is_finite() {
        return None;
    }

    Some(format!("{rounded:.0}"))
}
