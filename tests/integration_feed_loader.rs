//! Integration tests reading feed files from disk
//!
//! Feeds are written to temporary directories in the layouts merchants
//! actually export: tab-separated with `g:` prefixes and comma-separated.

use feed_quality::app::services::feed_loader::DelimitedFeedSource;
use feed_quality::app::services::feed_pipeline::{FeedPipeline, FeedSource, NullSink};
use feed_quality::{Config, Error, ErrorType, FeedField};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const HEADER: &[&str] = &[
    "g:id",
    "g:title",
    "g:description",
    "g:brand",
    "g:link",
    "g:image_link",
    "g:availability",
    "g:price",
    "g:condition",
    "g:gtin",
    "g:google_product_category",
    "g:product_type",
    "g:gender",
    "g:age_group",
    "g:color",
    "g:size",
];

fn row(id: &str, price: &str, gtin: &str) -> Vec<String> {
    [
        id,
        "Classic Cotton T-Shirt",
        "Soft organic cotton shirt with a relaxed fit.",
        "Acme",
        "https://example.com/products/tee",
        "https://example.com/images/tee.jpg",
        "in stock",
        price,
        "new",
        gtin,
        "Apparel & Accessories > Clothing > Shirts & Tops",
        "Clothing > Shirts",
        "unisex",
        "adult",
        "Navy",
        "M",
    ]
    .iter()
    .map(|value| value.to_string())
    .collect()
}

fn write_feed(dir: &TempDir, name: &str, delimiter: &str, rows: &[Vec<String>]) -> PathBuf {
    let mut content = HEADER.join(delimiter);
    content.push('\n');
    for values in rows {
        content.push_str(&values.join(delimiter));
        content.push('\n');
    }
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn pipeline() -> FeedPipeline {
    FeedPipeline::from_config(&Config::default().without_spelling().with_chunk_size(2))
}

#[tokio::test]
async fn test_tsv_feed_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_feed(
        &dir,
        "products.tsv",
        "\t",
        &[
            row("SKU-1", "19.99 USD", "4006381333931"),
            row("SKU-2", "", "4.00638E+12"),
            row("", "19.99 USD", "12345"),
        ],
    );

    let report = pipeline()
        .run_source(&DelimitedFeedSource::new(&path), &NullSink, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.total_products, 3);
    assert_eq!(report.products_with_errors, 2);

    let findings: Vec<(&str, ErrorType)> = report
        .errors
        .iter()
        .map(|e| (e.id.as_str(), e.error_type))
        .collect();
    assert_eq!(
        findings,
        vec![
            ("SKU-2", ErrorType::MissingPrice),
            ("UNKNOWN", ErrorType::MissingId),
            ("UNKNOWN", ErrorType::InvalidGtin),
        ]
    );
    assert_eq!(report.errors[2].affected_field, FeedField::Gtin);
    assert_eq!(report.errors[2].value, "12345");
}

#[test]
fn test_comma_feed_is_sniffed() {
    let dir = TempDir::new().unwrap();
    let path = write_feed(
        &dir,
        "products.csv",
        ",",
        &[row("SKU-1", "19.99 USD", "4006381333931")],
    );

    // The description contains no comma, so rows split cleanly
    let items = DelimitedFeedSource::new(&path).load().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id.as_deref(), Some("SKU-1"));
    assert_eq!(items[0].get(FeedField::Gtin), Some("4006381333931"));
}

#[tokio::test]
async fn test_header_only_feed_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_feed(&dir, "empty.tsv", "\t", &[]);

    let result = pipeline()
        .run_source(&DelimitedFeedSource::new(&path), &NullSink, CancellationToken::new())
        .await;
    assert!(matches!(result, Err(Error::FeedSource { .. })));
}

#[test]
fn test_missing_feed_is_io_error() {
    let result = DelimitedFeedSource::new("/nonexistent/products.tsv").load();
    assert!(matches!(result, Err(Error::Io { .. })));
}
