//! Ordered checker registry
//!
//! Registration order is part of the output contract: findings for one
//! record appear in the order their checkers were registered.

use super::{
    AgeGroupMismatchChecker, ApparelAttributesChecker, CheckFault, Checker, GenderMismatchChecker,
    GoogleCategoryChecker, GtinChecker, IdNotSetChecker, IdTooLongChecker, RequiredFieldChecker,
    SpellingChecker, TextDefectChecker,
};
use crate::app::models::{ErrorResult, ErrorType, FeedField, FeedItem};
use crate::app::services::fuzzy_matcher::SpellChecker;
use crate::app::services::text_normalizer::DefectKind;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::warn;

/// Fields whose free text is checked for defects and misspellings
pub const DESCRIPTIVE_FIELDS: &[FeedField] = &[FeedField::Title, FeedField::Description];

/// Ordered collection of checkers
#[derive(Default)]
pub struct CheckerRegistry {
    checkers: Vec<Box<dyn Checker>>,
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("checkers", &self.names())
            .finish()
    }
}

impl CheckerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard rule set in its documented order
    ///
    /// 1. identifier present, identifier length
    /// 2. gender and age-group mismatches
    /// 3. Google product category (missing or unspecific), apparel attributes
    /// 4. required product type, image link, availability, price
    /// 5. GTIN format
    /// 6. text defects for title, then description (missing space, repeated
    ///    dashes, special characters, abbreviations)
    /// 7. misspellings in title, then description
    pub fn standard(speller: Arc<dyn SpellChecker>) -> Self {
        let mut registry = Self::new();

        registry
            .register(IdNotSetChecker)
            .register(IdTooLongChecker::default())
            .register(GenderMismatchChecker)
            .register(AgeGroupMismatchChecker)
            .register(GoogleCategoryChecker)
            .register(ApparelAttributesChecker)
            .register(RequiredFieldChecker::new(
                FeedField::ProductType,
                ErrorType::MissingProductType,
            ))
            .register(RequiredFieldChecker::new(
                FeedField::ImageLink,
                ErrorType::MissingImageLink,
            ))
            .register(RequiredFieldChecker::new(
                FeedField::Availability,
                ErrorType::MissingAvailability,
            ))
            .register(RequiredFieldChecker::new(
                FeedField::Price,
                ErrorType::MissingPrice,
            ))
            .register(GtinChecker);

        for field in DESCRIPTIVE_FIELDS {
            for kind in DefectKind::ALL {
                registry.register(TextDefectChecker::new(*field, *kind));
            }
        }

        for field in DESCRIPTIVE_FIELDS {
            registry.register(SpellingChecker::new(*field, speller.clone()));
        }

        registry
    }

    /// Append a checker
    pub fn register(&mut self, checker: impl Checker + 'static) -> &mut Self {
        self.checkers.push(Box::new(checker));
        self
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, checker: impl Checker + 'static) -> Self {
        self.register(checker);
        self
    }

    /// Number of registered checkers
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Whether no checkers are registered
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Checker names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.checkers.iter().map(|checker| checker.name()).collect()
    }

    /// Registered checkers in order
    pub fn checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers.iter().map(Box::as_ref)
    }

    /// Run every checker over `item`
    ///
    /// Rule faults and panics are logged and skipped. A backend fault stops
    /// evaluation and is returned so the caller can fail the chunk.
    pub fn evaluate(&self, item: &FeedItem) -> Result<Vec<ErrorResult>, CheckFault> {
        let mut findings = Vec::new();
        self.evaluate_into(item, &mut findings)?;
        Ok(findings)
    }

    /// Run every checker over `item`, appending findings to `findings`
    pub fn evaluate_into(
        &self,
        item: &FeedItem,
        findings: &mut Vec<ErrorResult>,
    ) -> Result<(), CheckFault> {
        for checker in &self.checkers {
            let outcome = catch_unwind(AssertUnwindSafe(|| checker.check_all(item)))
                .unwrap_or_else(|_| Err(CheckFault::rule(checker.name(), "checker panicked")));

            match outcome {
                Ok(mut produced) => findings.append(&mut produced),
                Err(fault) if fault.is_backend() => return Err(fault),
                Err(fault) => {
                    warn!(
                        "Skipping rule '{}' for record {}: {}",
                        checker.name(),
                        item.display_id(),
                        fault
                    );
                }
            }
        }
        Ok(())
    }
}
