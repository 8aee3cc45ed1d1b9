//! Tests for report aggregation and summaries

use super::*;
use crate::app::models::ErrorType;
use crate::app::services::feed_pipeline::{AggregationReport, ChunkOutcome};

fn finding(id: &str, error_type: ErrorType) -> ErrorResult {
    ErrorResult::new(
        &FeedItem::new(id),
        error_type,
        FeedField::Price,
        "details",
        "",
    )
}

fn sample_report() -> AggregationReport {
    let mut report = AggregationReport::new(10);
    report.merge_chunk(ChunkOutcome {
        records: 5,
        flagged_records: 2,
        errors: vec![
            finding("A", ErrorType::MissingPrice),
            finding("A", ErrorType::InvalidGtin),
            finding("B", ErrorType::MissingPrice),
        ],
    });
    report.merge_chunk(ChunkOutcome {
        records: 5,
        flagged_records: 1,
        errors: vec![finding("F", ErrorType::Abbreviations)],
    });
    report
}

#[test]
fn test_merge_accumulates_counts_in_order() {
    let report = sample_report();

    assert_eq!(report.processed_products, 10);
    assert_eq!(report.products_with_errors, 3);
    assert_eq!(report.total_errors(), 4);
    assert_eq!(report.count(ErrorType::MissingPrice), 2);
    assert_eq!(report.count(ErrorType::MissingId), 0);

    let ids: Vec<_> = report.errors.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "A", "B", "F"]);
    assert!(report.is_complete());
}

#[test]
fn test_top_error_types_breaks_ties_by_label() {
    let report = sample_report();
    assert_eq!(
        report.top_error_types(2),
        vec![(ErrorType::MissingPrice, 2), (ErrorType::Abbreviations, 1)]
    );
    assert_eq!(report.top_error_types(10).len(), 3);
}

#[test]
fn test_error_rate() {
    let report = sample_report();
    assert!((report.error_rate() - 0.3).abs() < f64::EPSILON);
    assert_eq!(AggregationReport::new(0).error_rate(), 0.0);
}

#[test]
fn test_incomplete_reports() {
    let mut report = sample_report();
    report.record_failed_chunk(2);
    assert!(!report.is_complete());
    assert!(report.summary().contains("1 failed chunk"));

    let mut report = AggregationReport::new(10);
    report.cancelled = true;
    assert!(!report.is_complete());
    assert!(report.summary().ends_with("cancelled"));
}

#[test]
fn test_serializes_as_analysis_result() {
    let json = serde_json::to_value(sample_report()).unwrap();

    assert_eq!(json["totalProducts"], 10);
    assert_eq!(json["errorCounts"]["Missing Price"], 2);
    assert_eq!(json["errors"][0]["errorType"], "Missing Price");
    assert_eq!(json["errors"][0]["affectedField"], "price");
    assert!(json.get("failedChunks").is_none());
    assert_eq!(json["cancelled"], false);

    let restored: AggregationReport = serde_json::from_value(json).unwrap();
    assert_eq!(restored, sample_report());
}
