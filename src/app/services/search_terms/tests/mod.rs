//! Tests for search-term generation

pub mod generator_tests;

use crate::app::models::{FeedField, FeedItem};
use crate::app::services::search_terms::{KeywordMetrics, KeywordVolumeProvider};
use std::time::Duration;

/// Two running shoes from one brand and a mug that yields no terms
pub fn create_catalog() -> Vec<FeedItem> {
    vec![
        FeedItem::new("SKU-1")
            .with(FeedField::Title, "Acme Trail Running Shoes - Blue")
            .with(FeedField::Brand, "Acme")
            .with(FeedField::Color, "Blue")
            .with(FeedField::Gender, "male")
            .with(FeedField::ProductType, "Footwear > Shoes > Running Shoes"),
        FeedItem::new("SKU-2")
            .with(FeedField::Title, "Acme Road Running Shoes")
            .with(FeedField::Brand, "Acme")
            .with(FeedField::Color, "Red")
            .with(FeedField::Gender, "Female")
            .with(FeedField::ProductType, "Footwear > Shoes > Running Shoes"),
        FeedItem::new("SKU-3")
            .with(FeedField::Title, "Mug")
            .with(FeedField::GoogleProductCategory, "1604"),
    ]
}

pub const VOLUME_CSV: &str = "\
term,avg_monthly_searches,competition,competition_index,low_top_page_bid,high_top_page_bid
Acme Running  Shoes,1200,high,87,0.45,1.90
red running shoes,300,Low,12,,
";

/// Provider whose service is always down
pub struct UnreachableProvider;

impl KeywordVolumeProvider for UnreachableProvider {
    fn metrics(&self, _term: &str) -> crate::Result<Option<KeywordMetrics>> {
        Err(crate::Error::keyword_volume("service unreachable"))
    }
}

/// Provider that blocks for `delay` on every lookup
pub struct SlowProvider {
    pub delay: Duration,
}

impl KeywordVolumeProvider for SlowProvider {
    fn metrics(&self, _term: &str) -> crate::Result<Option<KeywordMetrics>> {
        std::thread::sleep(self.delay);
        Ok(None)
    }
}

/// `count` distinct shoes, each yielding fresh candidate terms
pub fn create_distinct_catalog(count: usize) -> Vec<FeedItem> {
    (0..count)
        .map(|i| {
            FeedItem::new(format!("SKU-{i}"))
                .with(FeedField::Title, format!("Model{i} Trail Shoes"))
                .with(FeedField::Brand, format!("Brand{i}"))
                .with(FeedField::ProductType, "Footwear > Shoes")
        })
        .collect()
}
