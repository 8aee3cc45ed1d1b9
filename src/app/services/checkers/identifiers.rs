//! GTIN format check

use super::{CheckResult, Checker};
use crate::app::models::{ErrorResult, ErrorType, FeedField, FeedItem};
use crate::app::services::text_normalizer::{clean_identifier, is_scientific_notation};
use crate::constants::VALID_GTIN_LENGTHS;

/// Reports GTINs whose cleaned digit count is not 8, 12, 13 or 14
///
/// Values are cleaned first, so `4.00638133393E+12` is validated as
/// `4006381333930`. Blank values are skipped. Values containing letters
/// (outside scientific notation) are not numeric codes and are skipped too.
#[derive(Debug, Clone, Copy, Default)]
pub struct GtinChecker;

impl GtinChecker {
    fn is_convertible(raw: &str) -> bool {
        is_scientific_notation(raw) || !raw.chars().any(char::is_alphabetic)
    }
}

impl Checker for GtinChecker {
    fn name(&self) -> &str {
        "gtin_format"
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![FeedField::Gtin]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        let Some(raw) = item.non_blank(FeedField::Gtin) else {
            return Ok(None);
        };
        if !Self::is_convertible(raw) {
            return Ok(None);
        }

        let cleaned = clean_identifier(raw);
        if cleaned.is_empty() || VALID_GTIN_LENGTHS.contains(&cleaned.len()) {
            return Ok(None);
        }

        Ok(Some(ErrorResult::new(
            item,
            ErrorType::InvalidGtin,
            FeedField::Gtin,
            format!(
                "GTIN has {} digits after cleaning; expected 8, 12, 13 or 14",
                cleaned.len()
            ),
            cleaned,
        )))
    }
}
