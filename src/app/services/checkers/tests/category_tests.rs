//! Tests for category, apparel and required-attribute checks

use super::*;
use crate::app::models::ErrorType;
use crate::app::services::checkers::{
    ApparelAttributesChecker, Checker, GoogleCategoryChecker, RequiredFieldChecker,
};

#[test]
fn test_missing_category() {
    let mut item = create_valid_item("SKU-1");
    item.google_product_category = Some("  ".to_string());

    let finding = GoogleCategoryChecker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::MissingGoogleProductCategory);
    assert_eq!(finding.affected_field, FeedField::GoogleProductCategory);
}

#[test]
fn test_category_depth_threshold() {
    let shallow = create_valid_item("SKU-1").with(
        FeedField::GoogleProductCategory,
        "Home & Garden > Kitchen",
    );
    let finding = GoogleCategoryChecker.check(&shallow).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::UnspecificGoogleProductCategory);
    assert_eq!(finding.value, "Home & Garden > Kitchen");

    let deep = create_valid_item("SKU-1").with(
        FeedField::GoogleProductCategory,
        "Home & Garden > Kitchen & Dining > Cookware",
    );
    assert!(GoogleCategoryChecker.check(&deep).unwrap().is_none());
}

#[test]
fn test_numeric_category_id_is_unspecific() {
    let item = create_valid_item("SKU-1").with(FeedField::GoogleProductCategory, "1604");
    let finding = GoogleCategoryChecker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::UnspecificGoogleProductCategory);
}

#[test]
fn test_apparel_missing_attributes_lists_all() {
    let mut item = create_valid_item("SKU-1");
    item.color = None;
    item.size = Some(" ".to_string());

    let finding = ApparelAttributesChecker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::MissingApparelAttributes);
    assert_eq!(finding.affected_field, FeedField::Color);
    assert!(finding.details.contains("color, size"));
    assert!(!finding.details.contains("gender"));
}

#[test]
fn test_non_apparel_does_not_need_attributes() {
    let mut item = create_valid_item("SKU-1").with(
        FeedField::GoogleProductCategory,
        "Home & Garden > Kitchen & Dining > Cookware",
    );
    item.color = None;
    item.size = None;
    item.gender = None;
    item.age_group = None;

    assert!(ApparelAttributesChecker.check(&item).unwrap().is_none());
}

#[test]
fn test_complete_apparel_passes() {
    let item = create_valid_item("SKU-1");
    assert!(ApparelAttributesChecker.check(&item).unwrap().is_none());
}

#[test]
fn test_required_field_missing_and_blank() {
    let checker = RequiredFieldChecker::new(FeedField::Price, ErrorType::MissingPrice);
    assert_eq!(checker.name(), "required_price");

    let mut item = create_valid_item("SKU-1");
    assert!(checker.check(&item).unwrap().is_none());

    item.price = None;
    let finding = checker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::MissingPrice);
    assert_eq!(finding.affected_field, FeedField::Price);
    assert_eq!(finding.details, "Price is not set");

    item.price = Some("\t".to_string());
    assert!(checker.check(&item).unwrap().is_some());
}
