//! Command implementations for the feed quality CLI
//!
//! Each command lives in its own module:
//! - `analyze`: rule evaluation over a feed with an aggregated report
//! - `search_terms`: candidate search terms with keyword volumes

pub mod analyze;
pub mod search_terms;
pub mod shared;

use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Dispatch to the selected subcommand
///
/// Cancelling `cancel` stops scheduling new work; the command still renders
/// what it has and then fails.
pub async fn run(args: Args, cancel: CancellationToken) -> anyhow::Result<()> {
    match args.command {
        Some(Commands::Analyze(analyze_args)) => analyze::run_analyze(analyze_args, cancel).await,
        Some(Commands::SearchTerms(search_args)) => {
            search_terms::run_search_terms(search_args, cancel).await
        }
        None => Ok(()),
    }
}
