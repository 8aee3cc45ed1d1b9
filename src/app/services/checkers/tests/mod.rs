//! Tests for data-quality checkers
//!
//! Each checker family has its own test file; fixtures and fake spell
//! checkers shared between them live here.

pub mod category_tests;
pub mod identifier_tests;
pub mod identity_tests;
pub mod text_quality_tests;

use crate::Result;
use crate::app::models::{FeedField, FeedItem};
use crate::app::services::fuzzy_matcher::{SpellChecker, Suggestion};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fully populated apparel record that passes every standard rule
pub fn create_valid_item(id: &str) -> FeedItem {
    FeedItem::new(id)
        .with(FeedField::Title, "Classic Cotton T-Shirt")
        .with(
            FeedField::Description,
            "Soft organic cotton shirt with a relaxed fit.",
        )
        .with(FeedField::Brand, "Acme")
        .with(FeedField::Link, "https://example.com/products/tee")
        .with(FeedField::ImageLink, "https://example.com/images/tee.jpg")
        .with(FeedField::Availability, "in stock")
        .with(FeedField::Price, "19.99 USD")
        .with(FeedField::Condition, "new")
        .with(FeedField::Gtin, "4006381333931")
        .with(
            FeedField::GoogleProductCategory,
            "Apparel & Accessories > Clothing > Shirts & Tops",
        )
        .with(FeedField::ProductType, "Clothing > Shirts")
        .with(FeedField::Gender, "unisex")
        .with(FeedField::AgeGroup, "adult")
        .with(FeedField::Color, "Navy")
        .with(FeedField::Size, "M")
}

/// Spell checker with a fixed table of misspellings
#[derive(Debug, Default)]
pub struct FakeSpellChecker {
    misspellings: HashMap<String, Vec<String>>,
}

impl FakeSpellChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_misspelling(mut self, word: &str, suggestions: &[&str]) -> Self {
        self.misspellings.insert(
            word.to_lowercase(),
            suggestions.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn shared(self) -> Arc<dyn SpellChecker> {
        Arc::new(self)
    }
}

impl SpellChecker for FakeSpellChecker {
    fn suggestions(&self, word: &str) -> Result<Vec<Suggestion>> {
        Ok(self
            .misspellings
            .get(&word.to_lowercase())
            .map(|terms| {
                terms
                    .iter()
                    .map(|term| Suggestion {
                        term: term.clone(),
                        distance: 1,
                        count: 1,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn is_likely_misspelled(&self, word: &str) -> Result<bool> {
        Ok(self.misspellings.contains_key(&word.to_lowercase()))
    }
}

/// Spell checker whose backend is always down
#[derive(Debug, Default)]
pub struct FailingSpellChecker;

impl SpellChecker for FailingSpellChecker {
    fn suggestions(&self, _word: &str) -> Result<Vec<Suggestion>> {
        Err(crate::Error::dictionary("dictionary service unreachable"))
    }

    fn is_likely_misspelled(&self, _word: &str) -> Result<bool> {
        Err(crate::Error::dictionary("dictionary service unreachable"))
    }
}

/// Spell checker that counts how often each lookup is made
#[derive(Debug, Default)]
pub struct CountingSpellChecker {
    inner: FakeSpellChecker,
    pub combined_lookups: AtomicUsize,
    pub split_lookups: AtomicUsize,
}

impl CountingSpellChecker {
    pub fn new(inner: FakeSpellChecker) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }
}

impl SpellChecker for CountingSpellChecker {
    fn suggestions(&self, word: &str) -> Result<Vec<Suggestion>> {
        self.split_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.suggestions(word)
    }

    fn is_likely_misspelled(&self, word: &str) -> Result<bool> {
        self.split_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.is_likely_misspelled(word)
    }

    fn misspelling(&self, word: &str) -> Result<Option<Vec<Suggestion>>> {
        self.combined_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.misspelling(word)
    }
}

/// Standard registry with a spell checker that flags nothing
pub fn quiet_speller() -> Arc<dyn SpellChecker> {
    FakeSpellChecker::new().shared()
}
