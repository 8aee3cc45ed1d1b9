//! Tests for the feed analysis pipeline
//!
//! Shared fixtures: synthetic feeds, a recording progress sink and a rule
//! whose backend fails on demand.

pub mod report_tests;

use crate::app::models::{ErrorResult, FeedField, FeedItem};
use crate::app::services::checkers::tests::{create_valid_item, quiet_speller};
use crate::app::services::checkers::{CheckFault, CheckResult, Checker, CheckerRegistry};
use crate::app::services::feed_pipeline::{FeedPipeline, ProgressEvent, ProgressSink};
use crate::config::PipelineConfig;
use std::sync::{Arc, Mutex};

/// Identifier that makes [`FlakyBackendRule`] fail
pub const BACKEND_FAILURE_ID: &str = "BACKEND-DOWN";

/// `count` valid records where every `missing_price_every`-th lacks a price
pub fn create_test_items(count: usize, missing_price_every: usize) -> Vec<FeedItem> {
    (0..count)
        .map(|i| {
            let mut item = create_valid_item(&format!("SKU-{i:05}"));
            if missing_price_every > 0 && i % missing_price_every == 0 {
                item.price = None;
            }
            item
        })
        .collect()
}

/// Pipeline with the standard rules and no spelling dictionary
pub fn create_test_pipeline(chunk_size: usize, workers: usize) -> FeedPipeline {
    FeedPipeline::new(
        CheckerRegistry::standard(quiet_speller()),
        PipelineConfig {
            chunk_size,
            workers,
        },
    )
}

/// Sink that keeps every event for inspection
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Rule whose shared backend fails for [`BACKEND_FAILURE_ID`]
pub struct FlakyBackendRule;

impl Checker for FlakyBackendRule {
    fn name(&self) -> &str {
        "flaky_backend"
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![FeedField::Id]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        if item.display_id() == BACKEND_FAILURE_ID {
            return Err(CheckFault::backend(
                "flaky_backend",
                crate::Error::dictionary("lookup service unreachable"),
            ));
        }
        Ok(None)
    }
}
