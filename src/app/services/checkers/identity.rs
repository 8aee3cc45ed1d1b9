//! Record identifier checks

use super::{CheckResult, Checker};
use crate::app::models::{ErrorResult, ErrorType, FeedField, FeedItem};
use crate::constants::MAX_ID_LENGTH;

/// Reports records whose `id` is missing or whitespace-only
#[derive(Debug, Clone, Copy, Default)]
pub struct IdNotSetChecker;

impl Checker for IdNotSetChecker {
    fn name(&self) -> &str {
        "id_not_set"
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![FeedField::Id]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        if !item.is_blank(FeedField::Id) {
            return Ok(None);
        }

        Ok(Some(ErrorResult::new(
            item,
            ErrorType::MissingId,
            FeedField::Id,
            "Product ID is not set",
            item.get(FeedField::Id).unwrap_or_default(),
        )))
    }
}

/// Reports identifiers longer than the allowed maximum (in characters)
#[derive(Debug, Clone, Copy)]
pub struct IdTooLongChecker {
    max_length: usize,
}

impl IdTooLongChecker {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Default for IdTooLongChecker {
    fn default() -> Self {
        Self::new(MAX_ID_LENGTH)
    }
}

impl Checker for IdTooLongChecker {
    fn name(&self) -> &str {
        "id_too_long"
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![FeedField::Id]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        let Some(id) = item.non_blank(FeedField::Id) else {
            return Ok(None);
        };

        let length = id.chars().count();
        if length <= self.max_length {
            return Ok(None);
        }

        Ok(Some(ErrorResult::new(
            item,
            ErrorType::IdTooLong,
            FeedField::Id,
            format!(
                "Product ID is {length} characters long; the maximum is {}",
                self.max_length
            ),
            id,
        )))
    }
}
