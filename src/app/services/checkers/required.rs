//! Mandatory attribute presence

use super::{CheckResult, Checker};
use crate::app::models::{ErrorResult, ErrorType, FeedField, FeedItem};

/// Reports a single attribute that is absent or whitespace-only
#[derive(Debug, Clone)]
pub struct RequiredFieldChecker {
    field: FeedField,
    error_type: ErrorType,
    name: String,
}

impl RequiredFieldChecker {
    pub fn new(field: FeedField, error_type: ErrorType) -> Self {
        Self {
            field,
            error_type,
            name: format!("required_{}", field.as_str()),
        }
    }

    pub fn field(&self) -> FeedField {
        self.field
    }
}

impl Checker for RequiredFieldChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![self.field]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        if !item.is_blank(self.field) {
            return Ok(None);
        }

        Ok(Some(ErrorResult::new(
            item,
            self.error_type,
            self.field,
            format!("{} is not set", self.field.label()),
            item.get(self.field).unwrap_or_default(),
        )))
    }
}
