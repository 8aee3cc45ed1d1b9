//! Google product category checks

use super::{CheckResult, Checker};
use crate::app::models::{ErrorResult, ErrorType, FeedField, FeedItem};
use crate::constants::{APPAREL_MARKER, CATEGORY_SEPARATOR, MIN_CATEGORY_DEPTH};

/// Attributes every apparel product must carry, in reporting order
pub const APPAREL_ATTRIBUTES: &[FeedField] = &[
    FeedField::Color,
    FeedField::Size,
    FeedField::Gender,
    FeedField::AgeGroup,
];

/// Number of non-empty `>`-separated levels in a category path
///
/// A numeric taxonomy id has no separators and counts as one level.
pub fn category_depth(category: &str) -> usize {
    category
        .split(CATEGORY_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Whether a category path belongs to the apparel branch
pub fn is_apparel_category(category: &str) -> bool {
    category.to_lowercase().contains(APPAREL_MARKER)
}

/// Reports a missing category, or one with fewer than three levels
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleCategoryChecker;

impl Checker for GoogleCategoryChecker {
    fn name(&self) -> &str {
        "google_product_category"
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![FeedField::GoogleProductCategory]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        let Some(category) = item.non_blank(FeedField::GoogleProductCategory) else {
            return Ok(Some(ErrorResult::new(
                item,
                ErrorType::MissingGoogleProductCategory,
                FeedField::GoogleProductCategory,
                "Google product category is not set",
                "",
            )));
        };

        let depth = category_depth(category);
        if depth >= MIN_CATEGORY_DEPTH {
            return Ok(None);
        }

        Ok(Some(ErrorResult::new(
            item,
            ErrorType::UnspecificGoogleProductCategory,
            FeedField::GoogleProductCategory,
            format!(
                "Google product category has {depth} level(s); at least {MIN_CATEGORY_DEPTH} are required"
            ),
            category,
        )))
    }
}

/// Reports apparel products lacking color, size, gender or age group
///
/// The finding names the first missing attribute as the affected field and
/// lists all of them in the details.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApparelAttributesChecker;

impl Checker for ApparelAttributesChecker {
    fn name(&self) -> &str {
        "apparel_attributes"
    }

    fn inspects(&self) -> Vec<FeedField> {
        let mut fields = vec![FeedField::GoogleProductCategory];
        fields.extend_from_slice(APPAREL_ATTRIBUTES);
        fields
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        let Some(category) = item.non_blank(FeedField::GoogleProductCategory) else {
            return Ok(None);
        };
        if !is_apparel_category(category) {
            return Ok(None);
        }

        let missing: Vec<FeedField> = APPAREL_ATTRIBUTES
            .iter()
            .copied()
            .filter(|field| item.is_blank(*field))
            .collect();

        let Some(first) = missing.first() else {
            return Ok(None);
        };

        let names = missing
            .iter()
            .map(FeedField::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Some(ErrorResult::new(
            item,
            ErrorType::MissingApparelAttributes,
            *first,
            format!("Apparel product in \"{category}\" is missing: {names}"),
            "",
        )))
    }
}
