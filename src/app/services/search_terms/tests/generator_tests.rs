//! Tests for candidate derivation and streamed generation

use super::*;
use crate::app::services::feed_pipeline::{NullSink, ProgressEvent, ProgressStatus};
use crate::app::services::search_terms::{
    CsvVolumeTable, NoVolumeData, SearchTermGenerator, TermPattern, candidate_terms,
    product_type_leaf,
};
use crate::config::SearchTermConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn generator() -> SearchTermGenerator {
    SearchTermGenerator::new(Arc::new(NoVolumeData), SearchTermConfig::default())
}

#[test]
fn test_product_type_leaf() {
    let catalog = create_catalog();
    assert_eq!(product_type_leaf(&catalog[0]), Some("Running Shoes"));
    // Numeric category ids carry no words
    assert_eq!(product_type_leaf(&catalog[2]), None);

    let item = FeedItem::new("X").with(
        FeedField::GoogleProductCategory,
        "Home & Garden > Kitchen & Dining > Cookware > ",
    );
    assert_eq!(product_type_leaf(&item), Some("Cookware"));
}

#[test]
fn test_candidate_terms_for_one_product() {
    let candidates = candidate_terms(&create_catalog()[0], 4);
    assert_eq!(
        candidates,
        vec![
            (TermPattern::BrandProductType, "acme running shoes".to_string()),
            (TermPattern::ColorProductType, "blue running shoes".to_string()),
            (TermPattern::GenderProductType, "men's running shoes".to_string()),
            (TermPattern::TitleCore, "trail running shoes blue".to_string()),
        ]
    );
}

#[test]
fn test_single_word_and_duplicate_candidates_are_dropped() {
    assert!(candidate_terms(&create_catalog()[2], 4).is_empty());

    let item = FeedItem::new("X")
        .with(FeedField::Brand, "Blue")
        .with(FeedField::Color, "blue")
        .with(FeedField::ProductType, "Mugs");
    let candidates = candidate_terms(&item, 4);
    assert_eq!(
        candidates,
        vec![(TermPattern::BrandProductType, "blue mugs".to_string())]
    );
}

#[test]
fn test_generate_deduplicates_across_feed() {
    let terms = generator().generate(&create_catalog());
    assert_eq!(terms.len(), 7);

    let first = &terms[0];
    assert_eq!(first.id, "st-1");
    assert_eq!(first.search_term, "acme running shoes");
    assert_eq!(first.product_name, "Acme Trail Running Shoes - Blue");
    assert_eq!(first.matching_products, 2);

    assert_eq!(terms[5].search_term, "women's running shoes");
    assert_eq!(terms[6].id, "st-7");
    assert!(terms.iter().all(|t| t.estimated_volume.is_none()));
}

#[test]
fn test_keyword_metrics_are_attached() {
    let table = CsvVolumeTable::parse(VOLUME_CSV.as_bytes(), "inline").unwrap();
    let generator = SearchTermGenerator::new(Arc::new(table), SearchTermConfig::default());

    let terms = generator.generate(&create_catalog());
    assert_eq!(terms[0].estimated_volume, Some(1200));
    let red = terms
        .iter()
        .find(|t| t.search_term == "red running shoes")
        .unwrap();
    assert_eq!(red.estimated_volume, Some(300));
    assert!(red.keyword_metrics.is_some());
}

#[test]
fn test_provider_failure_degrades_to_no_data() {
    let generator =
        SearchTermGenerator::new(Arc::new(UnreachableProvider), SearchTermConfig::default());
    let terms = generator.generate(&create_catalog());
    assert_eq!(terms.len(), 7);
    assert!(terms.iter().all(|t| t.keyword_metrics.is_none()));
}

#[test]
fn test_search_term_serialization() {
    let terms = generator().generate(&create_catalog());
    let json = serde_json::to_value(&terms[0]).unwrap();
    assert_eq!(json["productName"], "Acme Trail Running Shoes - Blue");
    assert_eq!(json["searchTerm"], "acme running shoes");
    assert_eq!(json["pattern"], "brand_product_type");
    assert_eq!(json["matchingProducts"], 2);
}

#[tokio::test]
async fn test_streamed_generation_events() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let events = events.clone();
        move |event: ProgressEvent| events.lock().unwrap().push(event)
    };

    let report = generator()
        .with_chunk_size(1)
        .run(create_catalog(), &sink, CancellationToken::new())
        .await
        .unwrap();

    let events = events.lock().unwrap();
    let statuses: Vec<_> = events.iter().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![
            ProgressStatus::Analyzing,
            ProgressStatus::Chunking,
            ProgressStatus::Chunk,
            ProgressStatus::Chunk,
            ProgressStatus::Chunk,
            ProgressStatus::Complete,
        ]
    );

    let per_chunk: Vec<usize> = events
        .iter()
        .filter_map(|e| e.search_terms())
        .map(|terms| terms.len())
        .collect();
    assert_eq!(per_chunk, vec![4, 3, 0]);
    assert_eq!(events[3].chunk_index, Some(1));
    assert_eq!(events[3].total_chunks, Some(3));

    assert_eq!(report.terms, generator().generate(&create_catalog()));
    assert_eq!(report.processed_products, 3);
    assert!(!report.cancelled);
}

#[tokio::test]
async fn test_cancelled_generation() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let events = events.clone();
        move |event: ProgressEvent| events.lock().unwrap().push(event)
    };

    let report = generator()
        .run(create_catalog(), &sink, cancel)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.processed_products, 0);
    assert!(report.terms.is_empty());

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2].status, ProgressStatus::Error);
}

#[test]
fn test_slow_volume_lookups_leave_the_runtime_responsive() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    let ticks = Arc::new(AtomicUsize::new(0));
    let report = runtime.block_on(async {
        let ticker = {
            let ticks = ticks.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_millis(5));
                loop {
                    interval.tick().await;
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        let provider = SlowProvider {
            delay: Duration::from_millis(20),
        };
        let report = SearchTermGenerator::new(Arc::new(provider), SearchTermConfig::default())
            .with_chunk_size(5)
            .run(create_distinct_catalog(25), &NullSink, CancellationToken::new())
            .await
            .unwrap();

        ticker.abort();
        report
    });

    assert_eq!(report.processed_products, 25);
    assert_eq!(report.terms.len(), 50);
    // Two lookups of 20ms per product; the ticker must run in between
    assert!(ticks.load(Ordering::SeqCst) > 1);
}
