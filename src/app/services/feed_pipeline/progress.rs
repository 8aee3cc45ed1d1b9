//! Progress events and sinks
//!
//! A pass reports advancement through a [`ProgressSink`]. Events are
//! transient: each one is handed to the sink exactly once and never stored
//! by the engine. Closures, channels and terminal progress bars all
//! implement the sink trait.

use crate::app::models::ErrorResult;
use crate::app::services::search_terms::SearchTerm;
use futures::Stream;
use serde::Serialize;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Status tag of a progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Analyzing,
    Chunking,
    Chunk,
    Complete,
    Error,
}

/// Which pass produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    Analysis,
    SearchTerms,
}

/// Partial results carried by a `chunk` event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "camelCase")]
pub enum ProgressPayload {
    Errors(Vec<ErrorResult>),
    SearchTerms(Vec<SearchTerm>),
}

/// One progress notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<ProgressStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_chunks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ProgressPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProgressEvent {
    pub fn new(status: ProgressStatus) -> Self {
        Self {
            status,
            stage: None,
            processed: None,
            total: None,
            chunk_index: None,
            total_chunks: None,
            payload: None,
            message: None,
        }
    }

    pub fn with_stage(mut self, stage: ProgressStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_counts(mut self, processed: usize, total: usize) -> Self {
        self.processed = Some(processed);
        self.total = Some(total);
        self
    }

    pub fn with_chunk(mut self, chunk_index: usize, total_chunks: usize) -> Self {
        self.chunk_index = Some(chunk_index);
        self.total_chunks = Some(total_chunks);
        self
    }

    pub fn with_payload(mut self, payload: ProgressPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether this event ends a pass
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            ProgressStatus::Complete | ProgressStatus::Error
        ) && self.chunk_index.is_none()
    }

    /// Errors carried by a `chunk` event
    pub fn errors(&self) -> Option<&[ErrorResult]> {
        match &self.payload {
            Some(ProgressPayload::Errors(errors)) => Some(errors),
            _ => None,
        }
    }

    /// Search terms carried by a `chunk` event
    pub fn search_terms(&self) -> Option<&[SearchTerm]> {
        match &self.payload {
            Some(ProgressPayload::SearchTerms(terms)) => Some(terms),
            _ => None,
        }
    }
}

/// Receiver of progress events
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}

/// Sink forwarding events over an unbounded channel
///
/// Events emitted after the receiving side is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    /// Create a connected sink and stream pair
    pub fn channel() -> (ChannelSink, ProgressStream) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (ChannelSink { sender }, ProgressStream { receiver })
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.sender.send(event);
    }
}

/// Stream of progress events fed by a [`ChannelSink`]
///
/// Ends once every sink clone has been dropped.
#[derive(Debug)]
pub struct ProgressStream {
    receiver: mpsc::UnboundedReceiver<ProgressEvent>,
}

impl Stream for ProgressStream {
    type Item = ProgressEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
