//! Candidate search-term derivation
//!
//! Every product yields up to four candidate terms built from its brand,
//! color, gender, title and the leaf of its product type. Terms are
//! deduplicated across the feed and annotated with keyword metrics.

use super::keywords::{KeywordMetrics, KeywordVolumeProvider, normalize_keyword};
use crate::{Error, Result};
use crate::app::models::{FeedField, FeedItem};
use crate::app::services::feed_pipeline::{
    ProgressEvent, ProgressPayload, ProgressSink, ProgressStage, ProgressStatus,
};
use crate::config::SearchTermConfig;
use crate::constants::CATEGORY_SEPARATOR;
use crate::constants::vocabulary::{GENDER_FEMALE, GENDER_MALE};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How a search term was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermPattern {
    /// `{brand} {leaf}`
    BrandProductType,
    /// `{color} {leaf}`
    ColorProductType,
    /// `{women's|men's} {leaf}`
    GenderProductType,
    /// Leading title words without the brand
    TitleCore,
}

impl TermPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            TermPattern::BrandProductType => "brand_product_type",
            TermPattern::ColorProductType => "color_product_type",
            TermPattern::GenderProductType => "gender_product_type",
            TermPattern::TitleCore => "title_core",
        }
    }
}

impl fmt::Display for TermPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate search term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTerm {
    /// `st-<n>` in discovery order
    pub id: String,
    /// Title of the first product producing the term
    pub product_name: String,
    pub search_term: String,
    pub pattern: TermPattern,
    pub estimated_volume: Option<u64>,
    pub keyword_metrics: Option<KeywordMetrics>,
    /// Distinct products producing the term
    pub matching_products: usize,
}

/// Result of a search-term pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTermReport {
    pub total_products: usize,
    pub processed_products: usize,
    pub terms: Vec<SearchTerm>,
    #[serde(default)]
    pub cancelled: bool,
}

/// Last non-blank segment of the product type, else of the Google category
///
/// Purely numeric category ids carry no words and are ignored.
pub fn product_type_leaf(item: &FeedItem) -> Option<&str> {
    last_segment(item, FeedField::ProductType).or_else(|| {
        last_segment(item, FeedField::GoogleProductCategory)
            .filter(|leaf| !leaf.chars().all(|c| c.is_ascii_digit()))
    })
}

fn last_segment(item: &FeedItem, field: FeedField) -> Option<&str> {
    item.non_blank(field)?
        .split(CATEGORY_SEPARATOR)
        .map(str::trim)
        .rfind(|segment| !segment.is_empty())
}

/// Candidate terms for one product, without duplicates
pub fn candidate_terms(item: &FeedItem, max_title_words: usize) -> Vec<(TermPattern, String)> {
    let mut candidates = Vec::new();
    let leaf = product_type_leaf(item);

    if let Some(leaf) = leaf {
        if let Some(brand) = item.non_blank(FeedField::Brand) {
            candidates.push((TermPattern::BrandProductType, format!("{brand} {leaf}")));
        }
        if let Some(color) = item.non_blank(FeedField::Color) {
            candidates.push((TermPattern::ColorProductType, format!("{color} {leaf}")));
        }
        let gender_word = item
            .non_blank(FeedField::Gender)
            .map(str::to_lowercase)
            .and_then(|gender| match gender.as_str() {
                GENDER_FEMALE => Some("women's"),
                GENDER_MALE => Some("men's"),
                _ => None,
            });
        if let Some(gender_word) = gender_word {
            candidates.push((
                TermPattern::GenderProductType,
                format!("{gender_word} {leaf}"),
            ));
        }
    }

    if let Some(core) = title_core(item, max_title_words) {
        candidates.push((TermPattern::TitleCore, core));
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|(pattern, term)| (pattern, normalize_keyword(&term)))
        .filter(|(_, term)| term.split(' ').count() >= 2)
        .filter(|(_, term)| seen.insert(term.clone()))
        .collect()
}

fn title_core(item: &FeedItem, max_words: usize) -> Option<String> {
    let title = item.non_blank(FeedField::Title)?;
    let brand_words: HashSet<String> = item
        .non_blank(FeedField::Brand)
        .map(|brand| brand.split_whitespace().map(str::to_lowercase).collect())
        .unwrap_or_default();

    let cleaned: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let words: Vec<&str> = cleaned
        .split_whitespace()
        .map(|word| word.trim_matches(|c| c == '-' || c == '\''))
        .filter(|word| !word.is_empty())
        .filter(|word| !brand_words.contains(&word.to_lowercase()))
        .take(max_words)
        .collect();

    Some(words.join(" "))
}

/// Derives search terms from a feed
#[derive(Clone)]
pub struct SearchTermGenerator {
    provider: Arc<dyn KeywordVolumeProvider>,
    config: SearchTermConfig,
}

impl fmt::Debug for SearchTermGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchTermGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Accumulated terms across chunks
#[derive(Default)]
struct TermIndex {
    terms: Vec<SearchTerm>,
    positions: HashMap<String, usize>,
}

impl SearchTermGenerator {
    pub fn new(provider: Arc<dyn KeywordVolumeProvider>, config: SearchTermConfig) -> Self {
        Self { provider, config }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    /// Derive all terms in one go
    pub fn generate(&self, items: &[FeedItem]) -> Vec<SearchTerm> {
        let mut index = TermIndex::default();
        for item in items {
            self.absorb(&mut index, item);
        }
        index.terms
    }

    /// Derive terms chunk by chunk, streaming newly discovered terms
    ///
    /// Emits `analyzing`, then `chunking`, then one `chunk` event per chunk
    /// whose payload holds the terms first seen in that chunk, then
    /// `complete` (or `error` when cancelled). Match counts in chunk payloads
    /// reflect the feed read so far; the returned report is authoritative.
    pub async fn run(
        &self,
        items: Vec<FeedItem>,
        sink: &dyn ProgressSink,
        cancel: CancellationToken,
    ) -> Result<SearchTermReport> {
        let start_time = Instant::now();
        let total = items.len();
        let chunk_size = self.config.chunk_size.max(1);
        let total_chunks = total.div_ceil(chunk_size);

        info!(
            "Generating search terms for {} products in {} chunks",
            total, total_chunks
        );

        sink.emit(
            ProgressEvent::new(ProgressStatus::Analyzing)
                .with_stage(ProgressStage::SearchTerms)
                .with_counts(0, total)
                .with_message(format!("Analyzing {total} products")),
        );
        sink.emit(
            ProgressEvent::new(ProgressStatus::Chunking)
                .with_stage(ProgressStage::SearchTerms)
                .with_counts(0, total)
                .with_message(format!("Processing in {total_chunks} chunks")),
        );

        let records = Arc::new(items);
        let mut index = TermIndex::default();
        let mut processed = 0;
        let mut cancelled = false;

        for chunk_index in 0..total_chunks {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let start = chunk_index * chunk_size;
            let end = (start + chunk_size).min(total);
            let first_new = index.terms.len();

            index = match self.absorb_chunk(index, &records, start, end).await {
                Ok(index) => index,
                Err(e) => {
                    warn!("Search-term chunk {} failed: {}", chunk_index, e);
                    sink.emit(
                        ProgressEvent::new(ProgressStatus::Error)
                            .with_stage(ProgressStage::SearchTerms)
                            .with_counts(processed, total)
                            .with_message(format!("Chunk {chunk_index} failed: {e}")),
                    );
                    return Err(Error::processing_interrupted(format!(
                        "search-term chunk {chunk_index} failed: {e}"
                    )));
                }
            };
            processed = end;

            let discovered = index.terms[first_new..].to_vec();
            debug!(
                "Search-term chunk {} discovered {} terms",
                chunk_index,
                discovered.len()
            );

            sink.emit(
                ProgressEvent::new(ProgressStatus::Chunk)
                    .with_stage(ProgressStage::SearchTerms)
                    .with_counts(processed, total)
                    .with_chunk(chunk_index, total_chunks)
                    .with_payload(ProgressPayload::SearchTerms(discovered)),
            );
        }

        let report = SearchTermReport {
            total_products: total,
            processed_products: processed,
            terms: index.terms,
            cancelled,
        };

        let status = if cancelled {
            warn!("Search-term generation cancelled after {} products", processed);
            ProgressStatus::Error
        } else {
            ProgressStatus::Complete
        };
        sink.emit(
            ProgressEvent::new(status)
                .with_stage(ProgressStage::SearchTerms)
                .with_counts(processed, total)
                .with_message(format!(
                    "{} search terms from {} of {} products",
                    report.terms.len(),
                    processed,
                    total
                )),
        );

        info!(
            "Search-term generation finished in {:.2}s: {} terms",
            start_time.elapsed().as_secs_f64(),
            report.terms.len()
        );

        Ok(report)
    }

    /// Absorb `records[start..end]` on the blocking pool
    ///
    /// Volume lookups may block, so the index moves into the blocking task
    /// and back out once the chunk is done.
    async fn absorb_chunk(
        &self,
        index: TermIndex,
        records: &Arc<Vec<FeedItem>>,
        start: usize,
        end: usize,
    ) -> std::result::Result<TermIndex, JoinError> {
        let generator = self.clone();
        let records = Arc::clone(records);

        tokio::task::spawn_blocking(move || {
            let mut index = index;
            for item in &records[start..end] {
                generator.absorb(&mut index, item);
            }
            index
        })
        .await
    }

    fn absorb(&self, index: &mut TermIndex, item: &FeedItem) {
        for (pattern, term) in candidate_terms(item, self.config.max_title_words) {
            if let Some(position) = index.positions.get(&term) {
                index.terms[*position].matching_products += 1;
                continue;
            }

            let keyword_metrics = self.lookup_metrics(&term);
            index.positions.insert(term.clone(), index.terms.len());
            index.terms.push(SearchTerm {
                id: format!("st-{}", index.terms.len() + 1),
                product_name: item
                    .non_blank(FeedField::Title)
                    .unwrap_or_else(|| item.display_id())
                    .to_string(),
                search_term: term,
                pattern,
                estimated_volume: keyword_metrics.as_ref().map(|m| m.avg_monthly_searches),
                keyword_metrics,
                matching_products: 1,
            });
        }
    }

    fn lookup_metrics(&self, term: &str) -> Option<KeywordMetrics> {
        match self.provider.metrics(term) {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!("No keyword volume for '{}': {}", term, e);
                None
            }
        }
    }
}
