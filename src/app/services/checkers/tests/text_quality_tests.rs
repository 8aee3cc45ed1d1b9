//! Tests for text defect and spelling checks

use super::*;
use crate::app::models::ErrorType;
use crate::app::services::checkers::{CheckFault, Checker, SpellingChecker, TextDefectChecker};
use crate::app::services::text_normalizer::DefectKind;
use std::sync::atomic::Ordering;

#[test]
fn test_missing_space_after_comma_in_title() {
    let checker = TextDefectChecker::new(FeedField::Title, DefectKind::MissingSpaceAfterComma);
    assert_eq!(checker.name(), "title_missing_space_after_comma");

    let item = create_valid_item("SKU-1").with(FeedField::Title, "Cotton Shirt red,blue");
    let finding = checker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::MissingSpaceAfterComma);
    assert_eq!(finding.affected_field, FeedField::Title);
    assert_eq!(finding.value, "Cotton Shirt red,blue");
}

#[test]
fn test_special_characters_are_listed() {
    let checker = TextDefectChecker::new(FeedField::Description, DefectKind::SpecialCharacters);
    let item = create_valid_item("SKU-1")
        .with(FeedField::Description, "Great shirt!!! 100% cotton");

    let finding = checker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::SpecialCharacters);
    assert_eq!(finding.affected_field, FeedField::Description);
    assert!(finding.details.ends_with("! %"));
}

#[test]
fn test_abbreviations_are_listed() {
    let checker = TextDefectChecker::new(FeedField::Title, DefectKind::Abbreviations);
    let item = create_valid_item("SKU-1").with(FeedField::Title, "Hex Bolts 12 PCS Qty 3");

    let finding = checker.check(&item).unwrap().unwrap();
    assert_eq!(finding.error_type, ErrorType::Abbreviations);
    assert!(finding.details.contains("pcs, qty"));
}

#[test]
fn test_defect_checkers_skip_blank_fields() {
    let mut item = create_valid_item("SKU-1");
    item.description = None;

    for kind in DefectKind::ALL {
        let checker = TextDefectChecker::new(FeedField::Description, *kind);
        assert!(checker.check(&item).unwrap().is_none());
    }
}

#[test]
fn test_each_distinct_misspelling_is_reported() {
    let speller = FakeSpellChecker::new()
        .with_misspelling("lether", &["leather", "lather", "tether", "lethe"])
        .with_misspelling("jackt", &["jacket"])
        .shared();
    let checker = SpellingChecker::new(FeedField::Title, speller);

    let item = create_valid_item("SKU-1").with(FeedField::Title, "Lether Jackt, lether trim");
    let findings = checker.check_all(&item).unwrap();

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].value, "Lether");
    assert_eq!(findings[1].value, "Jackt");
    assert!(findings.iter().all(|f| f.error_type == ErrorType::PossibleMisspelling));

    // Only the first three suggestions are quoted
    assert!(findings[0].details.contains("\"leather\" or \"lather\" or \"tether\""));
    assert!(!findings[0].details.contains("lethe\""));

    let first = checker.check(&item).unwrap().unwrap();
    assert_eq!(first, findings[0]);
}

#[test]
fn test_each_distinct_word_is_looked_up_once() {
    let speller = Arc::new(CountingSpellChecker::new(
        FakeSpellChecker::new()
            .with_misspelling("lether", &["leather"])
            .with_misspelling("jackt", &["jacket"]),
    ));
    let checker = SpellingChecker::new(FeedField::Title, speller.clone());

    let item = create_valid_item("SKU-1").with(FeedField::Title, "Lether Jackt, lether trim");
    let findings = checker.check_all(&item).unwrap();

    assert_eq!(findings.len(), 2);
    assert!(findings[0].details.contains("\"leather\""));
    // lether, jackt and trim
    assert_eq!(speller.combined_lookups.load(Ordering::SeqCst), 3);
    assert_eq!(speller.split_lookups.load(Ordering::SeqCst), 0);
}

#[test]
fn test_clean_text_has_no_misspellings() {
    let speller = FakeSpellChecker::new()
        .with_misspelling("lether", &["leather"])
        .shared();
    let checker = SpellingChecker::new(FeedField::Description, speller);

    let item = create_valid_item("SKU-1");
    assert!(checker.check_all(&item).unwrap().is_empty());
}

#[test]
fn test_spell_backend_failure_is_backend_fault() {
    let checker = SpellingChecker::new(FeedField::Title, Arc::new(FailingSpellChecker));
    let item = create_valid_item("SKU-1");

    let fault = checker.check_all(&item).unwrap_err();
    assert!(fault.is_backend());
    assert!(matches!(fault, CheckFault::Backend { ref checker, .. } if checker == "title_spelling"));
}
