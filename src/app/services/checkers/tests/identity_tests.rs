//! Tests for identifier checks

use super::*;
use crate::app::models::ErrorType;
use crate::app::services::checkers::{Checker, IdNotSetChecker, IdTooLongChecker};
use proptest::prelude::*;

#[test]
fn test_present_id_passes() {
    let item = create_valid_item("SKU-1");
    assert!(IdNotSetChecker.check(&item).unwrap().is_none());
    assert!(IdTooLongChecker::default().check(&item).unwrap().is_none());
}

#[test]
fn test_missing_id_reports_unknown() {
    let mut item = create_valid_item("SKU-1");
    item.id = None;

    let finding = IdNotSetChecker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::MissingId);
    assert_eq!(finding.id, "UNKNOWN");
    assert_eq!(finding.affected_field, FeedField::Id);
}

#[test]
fn test_whitespace_id_is_missing() {
    let item = create_valid_item("   ");
    let finding = IdNotSetChecker.check(&item).unwrap().unwrap();
    assert_eq!(finding.id, "UNKNOWN");

    // Length is not checked when the id is blank
    assert!(IdTooLongChecker::default().check(&item).unwrap().is_none());
}

#[test]
fn test_id_length_boundary() {
    let checker = IdTooLongChecker::default();

    let at_limit = create_valid_item(&"a".repeat(100));
    assert!(checker.check(&at_limit).unwrap().is_none());

    let over_limit = create_valid_item(&"a".repeat(101));
    let finding = checker.check(&over_limit).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::IdTooLong);
    assert!(finding.details.contains("101"));
    assert_eq!(finding.value.len(), 101);
}

#[test]
fn test_id_length_counts_characters() {
    // 100 two-byte characters are within the limit
    let item = create_valid_item(&"é".repeat(100));
    assert!(IdTooLongChecker::default().check(&item).unwrap().is_none());

    let checker = IdTooLongChecker::new(3);
    assert!(checker.check(&create_valid_item("abcd")).unwrap().is_some());
}

proptest! {
    #[test]
    fn prop_id_findings_follow_length(id in "[A-Za-z0-9-]{1,150}") {
        let item = create_valid_item(&id);
        prop_assert!(IdNotSetChecker.check(&item).unwrap().is_none());

        let too_long = IdTooLongChecker::default().check(&item).unwrap();
        prop_assert_eq!(too_long.is_some(), id.chars().count() > 100);
    }
}
