//! Feed analysis pipeline
//!
//! Runs the checker registry over a feed in chunks, streams progress events
//! and aggregates findings into an [`AggregationReport`].
//!
//! # Event Sequence
//!
//! For an input split into `n` chunks a pass emits `n` events with status
//! `chunk` (or `error` for a chunk that failed), in ascending chunk order,
//! followed by exactly one terminal event: `complete`, or `error` when the
//! pass was cancelled before every chunk was scheduled.

pub mod pipeline;
pub mod progress;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use pipeline::{FeedPipeline, FeedSource, evaluate_chunk};
pub use progress::{
    ChannelSink, NullSink, ProgressEvent, ProgressPayload, ProgressSink, ProgressStage,
    ProgressStatus, ProgressStream,
};
pub use report::{AggregationReport, ChunkOutcome};
