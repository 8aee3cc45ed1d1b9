//! Search-term generation
//!
//! Derives candidate search terms from catalog records and enriches them
//! with keyword metrics from an injected provider. Shares the progress
//! event contract of the analysis pipeline.

pub mod generator;
pub mod keywords;

#[cfg(test)]
pub mod tests;

pub use generator::{
    SearchTerm, SearchTermGenerator, SearchTermReport, TermPattern, candidate_terms,
    product_type_leaf,
};
pub use keywords::{
    Competition, CsvVolumeTable, KeywordMetrics, KeywordVolumeProvider, NoVolumeData,
    normalize_keyword,
};
