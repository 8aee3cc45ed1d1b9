//! Chunked, concurrent rule evaluation
//!
//! Input is partitioned into fixed-size chunks. Up to `workers` chunks are
//! evaluated at once on the blocking thread pool; finished chunks are held
//! back until every earlier chunk has been flushed, so progress events and
//! report order never depend on scheduling.

use super::progress::{ProgressEvent, ProgressPayload, ProgressSink, ProgressStage, ProgressStatus};
use super::report::{AggregationReport, ChunkOutcome};
use crate::app::models::FeedItem;
use crate::app::services::checkers::{CheckFault, CheckerRegistry};
use crate::app::services::fuzzy_matcher::{FuzzyMatcher, SpellChecker};
use crate::config::{Config, PipelineConfig};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Supplier of feed records
///
/// A source that cannot produce records fails the pass before any progress
/// event is emitted.
pub trait FeedSource: Send + Sync {
    fn load(&self) -> Result<Vec<FeedItem>>;
}

impl FeedSource for Vec<FeedItem> {
    fn load(&self) -> Result<Vec<FeedItem>> {
        Ok(self.clone())
    }
}

pub(super) type ChunkResult = std::result::Result<std::result::Result<ChunkOutcome, CheckFault>, JoinError>;

/// Drives a [`CheckerRegistry`] over a feed
#[derive(Debug, Clone)]
pub struct FeedPipeline {
    registry: Arc<CheckerRegistry>,
    config: PipelineConfig,
}

impl FeedPipeline {
    pub fn new(registry: CheckerRegistry, config: PipelineConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    /// Standard rules with the configured spelling dictionary
    pub fn from_config(config: &Config) -> Self {
        let matcher: Arc<dyn SpellChecker> = Arc::new(FuzzyMatcher::from_config(&config.spelling));
        Self::new(CheckerRegistry::standard(matcher), config.pipeline.clone())
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of chunks an input of `total` records is split into
    pub fn chunk_count(&self, total: usize) -> usize {
        total.div_ceil(self.config.chunk_size.max(1))
    }

    /// Load records from `source` and analyze them
    ///
    /// Load failures and empty feeds are returned as errors without emitting
    /// any event.
    pub async fn run_source(
        &self,
        source: &dyn FeedSource,
        sink: &dyn ProgressSink,
        cancel: CancellationToken,
    ) -> Result<AggregationReport> {
        let records = source.load()?;
        if records.is_empty() {
            return Err(Error::feed_source("Feed contains no records"));
        }
        self.run(records, sink, cancel).await
    }

    /// Analyze `records`, emitting one `chunk` event per chunk and a final
    /// `complete` (or `error` when cancelled) event
    ///
    /// A chunk whose evaluation fails emits an `error` event carrying its
    /// index and is left out of the report; the pass continues.
    pub async fn run(
        &self,
        records: Vec<FeedItem>,
        sink: &dyn ProgressSink,
        cancel: CancellationToken,
    ) -> Result<AggregationReport> {
        let start_time = Instant::now();
        let total = records.len();
        let chunk_size = self.config.chunk_size.max(1);
        let workers = self.config.workers.max(1);
        let total_chunks = self.chunk_count(total);
        let records = Arc::new(records);

        info!(
            "Analyzing {} products in {} chunks of {} with {} workers",
            total, total_chunks, chunk_size, workers
        );

        let mut report = AggregationReport::new(total);
        let mut tasks: JoinSet<(usize, ChunkResult)> = JoinSet::new();
        let mut pending: BTreeMap<usize, ChunkResult> = BTreeMap::new();
        let mut next_chunk = 0;
        let mut next_flush = 0;

        loop {
            while tasks.len() < workers && next_chunk < total_chunks && !cancel.is_cancelled() {
                self.spawn_chunk(&mut tasks, &records, next_chunk, chunk_size);
                next_chunk += 1;
            }

            let Some(joined) = tasks.join_next().await else {
                break;
            };
            match joined {
                Ok((index, result)) => {
                    pending.insert(index, result);
                }
                Err(e) => error!("Chunk task ended without reporting its chunk: {}", e),
            }

            while let Some(result) = pending.remove(&next_flush) {
                self.flush_chunk(&mut report, next_flush, total_chunks, result, sink);
                next_flush += 1;
            }
        }

        self.finish(&mut report, pending, next_flush, next_chunk, total_chunks, sink);

        info!(
            "Analysis finished in {:.2}s: {}",
            start_time.elapsed().as_secs_f64(),
            report.summary()
        );

        Ok(report)
    }

    fn spawn_chunk(
        &self,
        tasks: &mut JoinSet<(usize, ChunkResult)>,
        records: &Arc<Vec<FeedItem>>,
        index: usize,
        chunk_size: usize,
    ) {
        let registry = Arc::clone(&self.registry);
        let records = Arc::clone(records);
        let start = index * chunk_size;
        let end = (start + chunk_size).min(records.len());

        debug!("Scheduling chunk {} (records {}..{})", index, start, end);

        tasks.spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                evaluate_chunk(&registry, &records[start..end])
            })
            .await;
            (index, result)
        });
    }

    /// Flush the chunks still outstanding after the scheduler stops and emit
    /// the terminal event
    ///
    /// Every chunk in `next_flush..scheduled` is flushed in order; one with
    /// no buffered result is recorded as failed.
    pub(super) fn finish(
        &self,
        report: &mut AggregationReport,
        mut pending: BTreeMap<usize, ChunkResult>,
        next_flush: usize,
        scheduled: usize,
        total_chunks: usize,
        sink: &dyn ProgressSink,
    ) {
        for index in next_flush..scheduled {
            match pending.remove(&index) {
                Some(result) => self.flush_chunk(report, index, total_chunks, result, sink),
                None => self.fail_chunk(report, index, total_chunks, "chunk task was lost", sink),
            }
        }

        let total = report.total_products;
        if scheduled < total_chunks {
            report.cancelled = true;
            warn!(
                "Analysis cancelled after {} of {} chunks",
                scheduled, total_chunks
            );
            sink.emit(
                ProgressEvent::new(ProgressStatus::Error)
                    .with_stage(ProgressStage::Analysis)
                    .with_counts(report.processed_products, total)
                    .with_message(format!(
                        "Analysis cancelled: {} of {} products processed",
                        report.processed_products, total
                    )),
            );
        } else {
            sink.emit(
                ProgressEvent::new(ProgressStatus::Complete)
                    .with_stage(ProgressStage::Analysis)
                    .with_counts(report.processed_products, total)
                    .with_message(report.summary()),
            );
        }
    }

    fn flush_chunk(
        &self,
        report: &mut AggregationReport,
        index: usize,
        total_chunks: usize,
        result: ChunkResult,
        sink: &dyn ProgressSink,
    ) {
        let failure = match result {
            Ok(Ok(outcome)) => {
                let errors = outcome.errors.clone();
                debug!(
                    "Chunk {} complete: {} records, {} findings",
                    index,
                    outcome.records,
                    errors.len()
                );
                report.merge_chunk(outcome);
                sink.emit(
                    ProgressEvent::new(ProgressStatus::Chunk)
                        .with_stage(ProgressStage::Analysis)
                        .with_counts(report.processed_products, report.total_products)
                        .with_chunk(index, total_chunks)
                        .with_payload(ProgressPayload::Errors(errors)),
                );
                return;
            }
            Ok(Err(fault)) => fault.to_string(),
            Err(join_error) if join_error.is_panic() => "evaluation panicked".to_string(),
            Err(join_error) => join_error.to_string(),
        };

        self.fail_chunk(report, index, total_chunks, &failure, sink);
    }

    fn fail_chunk(
        &self,
        report: &mut AggregationReport,
        index: usize,
        total_chunks: usize,
        failure: &str,
        sink: &dyn ProgressSink,
    ) {
        error!("Chunk {} of {} failed: {}", index, total_chunks, failure);
        report.record_failed_chunk(index);
        sink.emit(
            ProgressEvent::new(ProgressStatus::Error)
                .with_stage(ProgressStage::Analysis)
                .with_counts(report.processed_products, report.total_products)
                .with_chunk(index, total_chunks)
                .with_message(format!(
                    "Chunk {} of {} failed: {}",
                    index + 1,
                    total_chunks,
                    failure
                )),
        );
    }
}

/// Run every rule over one chunk
pub fn evaluate_chunk(
    registry: &CheckerRegistry,
    records: &[FeedItem],
) -> std::result::Result<ChunkOutcome, CheckFault> {
    let mut outcome = ChunkOutcome {
        records: records.len(),
        ..Default::default()
    };

    for item in records {
        let before = outcome.errors.len();
        registry.evaluate_into(item, &mut outcome.errors)?;
        if outcome.errors.len() > before {
            outcome.flagged_records += 1;
        }
    }

    Ok(outcome)
}
