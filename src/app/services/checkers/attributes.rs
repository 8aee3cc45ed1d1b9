//! Title wording that contradicts declared gender or age group
//!
//! A mismatch is reported only when the title contains a term for the
//! opposing group and no term for the declared one, so "Men's and Women's
//! Socks" declared `male` passes.

use super::{CheckResult, Checker};
use crate::app::models::{ErrorResult, ErrorType, FeedField, FeedItem};
use crate::constants::vocabulary::{
    ADULT_AGE_GROUP, ADULT_TERMS, CHILD_AGE_GROUPS, FEMALE_TERMS, GENDER_FEMALE, GENDER_MALE,
    KID_TERMS, MALE_TERMS,
};
use regex::Regex;
use std::sync::LazyLock;

/// Whole-word, case-insensitive matcher over a vocabulary list
struct Vocabulary {
    pattern: Option<Regex>,
}

impl Vocabulary {
    fn new(terms: &[&str]) -> Self {
        let alternatives = terms
            .iter()
            .map(|term| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        Self {
            pattern: Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).ok(),
        }
    }

    /// First vocabulary term found in `text`, as written
    fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .as_ref()
            .and_then(|re| re.find(text))
            .map(|m| m.as_str())
    }
}

static FEMALE: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::new(FEMALE_TERMS));
static MALE: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::new(MALE_TERMS));
static KIDS: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::new(KID_TERMS));
static ADULTS: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::new(ADULT_TERMS));

/// Opposing term if the title contradicts the declared group
fn contradiction<'t>(
    title: &'t str,
    declared: &Vocabulary,
    opposing: &Vocabulary,
) -> Option<&'t str> {
    match declared.first_match(title) {
        Some(_) => None,
        None => opposing.first_match(title),
    }
}

/// Reports titles that imply the opposite gender of the declared one
///
/// `unisex` and unrecognized gender values never mismatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderMismatchChecker;

impl Checker for GenderMismatchChecker {
    fn name(&self) -> &str {
        "gender_mismatch"
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![FeedField::Gender, FeedField::Title]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        let (Some(gender), Some(title)) = (
            item.non_blank(FeedField::Gender),
            item.non_blank(FeedField::Title),
        ) else {
            return Ok(None);
        };

        let declared = gender.to_lowercase();
        let conflict = if declared == GENDER_MALE {
            contradiction(title, &MALE, &FEMALE).map(|term| (term, "female"))
        } else if declared == GENDER_FEMALE {
            contradiction(title, &FEMALE, &MALE).map(|term| (term, "male"))
        } else {
            None
        };

        Ok(conflict.map(|(term, implied)| {
            ErrorResult::new(
                item,
                ErrorType::GenderMismatch,
                FeedField::Gender,
                format!(
                    "Title suggests a {implied} product (\"{term}\") but gender is \"{gender}\""
                ),
                gender,
            )
        }))
    }
}

/// Reports titles that imply a different age group than the declared one
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeGroupMismatchChecker;

impl Checker for AgeGroupMismatchChecker {
    fn name(&self) -> &str {
        "age_group_mismatch"
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![FeedField::AgeGroup, FeedField::Title]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        let (Some(age_group), Some(title)) = (
            item.non_blank(FeedField::AgeGroup),
            item.non_blank(FeedField::Title),
        ) else {
            return Ok(None);
        };

        let declared = age_group.to_lowercase();
        let conflict = if declared == ADULT_AGE_GROUP {
            contradiction(title, &ADULTS, &KIDS).map(|term| (term, "children's"))
        } else if CHILD_AGE_GROUPS.contains(&declared.as_str()) {
            contradiction(title, &KIDS, &ADULTS).map(|term| (term, "an adult"))
        } else {
            None
        };

        Ok(conflict.map(|(term, implied)| {
            ErrorResult::new(
                item,
                ErrorType::AgeGroupMismatch,
                FeedField::AgeGroup,
                format!(
                    "Title suggests {implied} product (\"{term}\") but age group is \"{age_group}\""
                ),
                age_group,
            )
        }))
    }
}
