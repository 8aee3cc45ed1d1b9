//! Data-quality checkers for catalog feed records
//!
//! Every rule is an independent, side-effect-free object implementing
//! [`Checker`]. Rules are grouped into families:
//!
//! - [`identity`] - Record identifier present and within length limits
//! - [`attributes`] - Title wording that contradicts declared gender/age group
//! - [`category`] - Google product category presence, depth and apparel requirements
//! - [`required`] - Mandatory attributes (product type, image link, availability, price)
//! - [`identifiers`] - GTIN format after scientific-notation repair
//! - [`text_quality`] - Punctuation/character/abbreviation defects and misspellings
//!
//! The [`CheckerRegistry`] runs them in a fixed, documented order; that order
//! is the order of findings within one record in every report.
//!
//! # Failure Handling
//!
//! Rules never signal findings as errors. A rule that fails internally
//! returns [`CheckFault::Rule`] (or panics); the registry logs it and treats
//! it as "no finding" for that record. A failing shared backend returns
//! [`CheckFault::Backend`], which the registry propagates so the pipeline
//! can fail the whole chunk.

pub mod attributes;
pub mod category;
pub mod identifiers;
pub mod identity;
pub mod registry;
pub mod required;
pub mod text_quality;

#[cfg(test)]
pub mod tests;

pub use attributes::{AgeGroupMismatchChecker, GenderMismatchChecker};
pub use category::{ApparelAttributesChecker, GoogleCategoryChecker};
pub use identifiers::GtinChecker;
pub use identity::{IdNotSetChecker, IdTooLongChecker};
pub use registry::CheckerRegistry;
pub use required::RequiredFieldChecker;
pub use text_quality::{SpellingChecker, TextDefectChecker};

use crate::app::models::{ErrorResult, FeedField, FeedItem};

/// Failure of a checker itself (as opposed to a finding)
#[derive(thiserror::Error, Debug)]
pub enum CheckFault {
    /// The rule could not evaluate this record
    #[error("rule '{checker}' failed: {message}")]
    Rule { checker: String, message: String },

    /// Shared infrastructure used by the rule is unavailable
    #[error("rule '{checker}' lost its backend: {source}")]
    Backend {
        checker: String,
        #[source]
        source: crate::Error,
    },
}

impl CheckFault {
    /// Create a rule fault
    pub fn rule(checker: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rule {
            checker: checker.into(),
            message: message.into(),
        }
    }

    /// Create a backend fault
    pub fn backend(checker: impl Into<String>, source: crate::Error) -> Self {
        Self::Backend {
            checker: checker.into(),
            source,
        }
    }

    /// Whether this fault should fail the enclosing chunk
    pub fn is_backend(&self) -> bool {
        matches!(self, CheckFault::Backend { .. })
    }
}

/// Outcome of one checker on one record
pub type CheckResult<T> = std::result::Result<T, CheckFault>;

/// A single data-quality rule
///
/// Implementations must be total over any [`FeedItem`]: optional fields that
/// are absent simply mean the rule declines to run.
pub trait Checker: Send + Sync {
    /// Stable rule name used in logs and fault messages
    fn name(&self) -> &str;

    /// Fields this rule reads; every finding's `affected_field` is one of them
    fn inspects(&self) -> Vec<FeedField>;

    /// Evaluate the rule, returning the single most diagnostic finding
    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>>;

    /// Evaluate the rule, returning every finding
    ///
    /// Defaults to at most one finding. Rules that can report several
    /// independent problems (one per misspelled word) override this.
    fn check_all(&self, item: &FeedItem) -> CheckResult<Vec<ErrorResult>> {
        Ok(self.check(item)?.into_iter().collect())
    }
}
