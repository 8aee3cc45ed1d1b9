//! Aggregated analysis results

use crate::app::models::{ErrorResult, ErrorType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Findings from one successfully evaluated chunk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkOutcome {
    /// Records evaluated in the chunk
    pub records: usize,
    /// Records with at least one finding
    pub flagged_records: usize,
    /// Findings in record order, then rule order
    pub errors: Vec<ErrorResult>,
}

/// Result of one analysis pass
///
/// Serialized as the `AnalysisResult` document: `totalProducts`,
/// `errorCounts` keyed by error label, and the ordered `errors` list, plus
/// the completeness fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationReport {
    /// Records in the input
    pub total_products: usize,

    /// Records actually evaluated (excludes failed and unscheduled chunks)
    pub processed_products: usize,

    /// Records with at least one finding
    pub products_with_errors: usize,

    /// Finding count per error type
    pub error_counts: BTreeMap<ErrorType, usize>,

    /// All findings in input order
    pub errors: Vec<ErrorResult>,

    /// Zero-based indices of chunks that failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_chunks: Vec<usize>,

    /// Whether the pass stopped early on request
    #[serde(default)]
    pub cancelled: bool,
}

impl AggregationReport {
    /// Empty report for an input of `total_products` records
    pub fn new(total_products: usize) -> Self {
        Self {
            total_products,
            ..Default::default()
        }
    }

    /// Fold a chunk's findings into the report
    ///
    /// Chunks must be merged in ascending chunk order to keep `errors` in
    /// input order.
    pub fn merge_chunk(&mut self, outcome: ChunkOutcome) {
        self.processed_products += outcome.records;
        self.products_with_errors += outcome.flagged_records;
        for error in &outcome.errors {
            *self.error_counts.entry(error.error_type).or_insert(0) += 1;
        }
        self.errors.extend(outcome.errors);
    }

    /// Note a chunk that could not be evaluated
    pub fn record_failed_chunk(&mut self, chunk_index: usize) {
        self.failed_chunks.push(chunk_index);
    }

    /// Total number of findings
    pub fn total_errors(&self) -> usize {
        self.errors.len()
    }

    /// Findings of one type
    pub fn count(&self, error_type: ErrorType) -> usize {
        self.error_counts.get(&error_type).copied().unwrap_or(0)
    }

    /// Most frequent error types, ties broken by label
    pub fn top_error_types(&self, limit: usize) -> Vec<(ErrorType, usize)> {
        let mut counts: Vec<(ErrorType, usize)> = self
            .error_counts
            .iter()
            .map(|(error_type, count)| (*error_type, *count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));
        counts.truncate(limit);
        counts
    }

    /// Fraction of processed records with at least one finding
    pub fn error_rate(&self) -> f64 {
        if self.processed_products == 0 {
            0.0
        } else {
            self.products_with_errors as f64 / self.processed_products as f64
        }
    }

    /// Whether every record was evaluated
    pub fn is_complete(&self) -> bool {
        !self.cancelled
            && self.failed_chunks.is_empty()
            && self.processed_products == self.total_products
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} findings across {} of {} products ({:.1}% with errors)",
            self.total_errors(),
            self.processed_products,
            self.total_products,
            self.error_rate() * 100.0
        );
        if !self.failed_chunks.is_empty() {
            summary.push_str(&format!(", {} failed chunk(s)", self.failed_chunks.len()));
        }
        if self.cancelled {
            summary.push_str(", cancelled");
        }
        summary
    }
}

impl fmt::Display for AggregationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
