//! Text normalization for feed attributes
//!
//! Stateless functions that canonicalize free-text and identifier fields
//! before rules inspect them.
//!
//! # Components
//!
//! - [`identifier`] - Reconstructs numeric identifiers corrupted into
//!   scientific notation by spreadsheet exports, and strips formatting
//! - [`defects`] - Detects punctuation, character and abbreviation defects in
//!   descriptive text, one pattern class per defect kind
//!
//! Each pattern class maps to its own finding type.

pub mod defects;
pub mod identifier;

#[cfg(test)]
pub mod tests;

pub use defects::{DefectKind, abbreviations, detect_text_defects, special_characters, words};
pub use identifier::{clean_identifier, is_scientific_notation};
