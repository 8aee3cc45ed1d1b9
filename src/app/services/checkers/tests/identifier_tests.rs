//! Tests for GTIN validation

use super::*;
use crate::app::models::ErrorType;
use crate::app::services::checkers::{Checker, GtinChecker};

fn with_gtin(gtin: &str) -> FeedItem {
    create_valid_item("SKU-1").with(FeedField::Gtin, gtin)
}

#[test]
fn test_valid_lengths_pass() {
    for gtin in ["96385074", "012345678905", "4006381333931", "10012345678902"] {
        assert!(
            GtinChecker.check(&with_gtin(gtin)).unwrap().is_none(),
            "{gtin} should be valid"
        );
    }
}

#[test]
fn test_separators_are_cleaned() {
    assert!(GtinChecker.check(&with_gtin("0 12345-67890 5")).unwrap().is_none());
}

#[test]
fn test_scientific_notation_is_repaired_before_validation() {
    // 4006381333930 has 13 digits
    assert!(
        GtinChecker
            .check(&with_gtin("4.00638133393E+12"))
            .unwrap()
            .is_none()
    );

    let finding = GtinChecker.check(&with_gtin("1.234E+5")).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::InvalidGtin);
    assert_eq!(finding.value, "123400");
    assert!(finding.details.contains("6 digits"));
}

#[test]
fn test_wrong_length_is_invalid() {
    let finding = GtinChecker.check(&with_gtin("12345")).unwrap().unwrap();
    assert_eq!(finding.affected_field, FeedField::Gtin);
    assert_eq!(finding.value, "12345");
}

#[test]
fn test_blank_and_non_numeric_values_are_skipped() {
    let mut item = create_valid_item("SKU-1");
    item.gtin = None;
    assert!(GtinChecker.check(&item).unwrap().is_none());

    assert!(GtinChecker.check(&with_gtin("   ")).unwrap().is_none());
    assert!(GtinChecker.check(&with_gtin("N/A")).unwrap().is_none());
    assert!(GtinChecker.check(&with_gtin("ABC-123")).unwrap().is_none());
    assert!(GtinChecker.check(&with_gtin("--")).unwrap().is_none());
}
