//! Analyze command implementation
//!
//! Loads a feed, runs every data-quality rule over it in concurrent chunks
//! and renders the aggregated report.

use super::shared::{
    ProgressBarSink, configure_colors, generated_at, load_configuration, setup_logging,
    write_output,
};
use crate::app::models::ErrorType;
use crate::app::services::feed_loader::DelimitedFeedSource;
use crate::app::services::feed_pipeline::{AggregationReport, FeedPipeline};
use crate::cli::args::{AnalyzeArgs, OutputFormat};
use anyhow::{Context, anyhow, bail};
use colored::*;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Top-level function for the analyze command
///
/// A cancelled pass still renders the partial report before failing.
pub async fn run_analyze(args: AnalyzeArgs, cancel: CancellationToken) -> anyhow::Result<()> {
    setup_logging(&args.common)?;
    args.common.validate(&args.feed)?;
    configure_colors(args.common.output_file.as_deref());

    let config = load_configuration(&args.common)?;
    let pipeline = FeedPipeline::from_config(&config);
    info!(
        "Running {} rules over {}",
        pipeline.registry().len(),
        args.feed.display()
    );

    let source = DelimitedFeedSource::new(&args.feed);
    let sink = ProgressBarSink::new("Analyzing feed", args.common.show_progress());
    let report = pipeline
        .run_source(&source, &sink, cancel)
        .await
        .with_context(|| format!("Failed to analyze {}", args.feed.display()))?;

    let output = match args.common.output_format {
        OutputFormat::Human => generate_human_report(&report, &args.feed, args.samples),
        OutputFormat::Json => generate_json_report(&report, &args.feed)?,
        OutputFormat::Csv => generate_csv_report(&report)?,
    };
    write_output(&output, args.common.output_file.as_deref())?;

    if report.cancelled {
        bail!(
            "Analysis cancelled after {} of {} products",
            report.processed_products,
            report.total_products
        );
    }

    Ok(())
}

/// Generate the human-readable report
pub fn generate_human_report(report: &AggregationReport, feed: &Path, samples: usize) -> String {
    let mut out = String::new();
    let heading = if report.is_complete() {
        "🎉 Feed Analysis Complete!".green().bold()
    } else {
        "⚠️  Feed Analysis Incomplete".yellow().bold()
    };

    let _ = writeln!(out, "\n{}", heading);
    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let _ = writeln!(out, "📊 Summary for {}:", feed.display());
    let _ = writeln!(out, "   • Products in feed: {}", report.total_products);
    let _ = writeln!(out, "   • Products analyzed: {}", report.processed_products);
    let _ = writeln!(
        out,
        "   • Products with errors: {} ({:.1}%)",
        report.products_with_errors,
        report.error_rate() * 100.0
    );
    let _ = writeln!(out, "   • Total findings: {}", report.total_errors());

    if !report.failed_chunks.is_empty() {
        let chunks: Vec<String> = report.failed_chunks.iter().map(|c| c.to_string()).collect();
        let _ = writeln!(
            out,
            "{}",
            format!("⚠️  Failed chunks: {}", chunks.join(", ")).yellow()
        );
    }

    if report.total_errors() == 0 {
        let _ = writeln!(out, "\n{}", "✅ No data-quality problems found".green());
        return out;
    }

    let _ = writeln!(out, "\n🔎 Findings by type:");
    for (error_type, count) in report.top_error_types(usize::MAX) {
        let _ = writeln!(
            out,
            "   • {}: {}",
            error_type.label().bold(),
            count.to_string().red()
        );
        for finding in sample_findings(report, error_type, samples) {
            let _ = writeln!(out, "       {} {}", finding.id.dimmed(), finding.details);
        }
    }

    let _ = writeln!(out);
    out
}

fn sample_findings(
    report: &AggregationReport,
    error_type: ErrorType,
    samples: usize,
) -> impl Iterator<Item = &crate::ErrorResult> {
    report
        .errors
        .iter()
        .filter(move |e| e.error_type == error_type)
        .take(samples)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: String,
    feed: String,
    #[serde(flatten)]
    report: &'a AggregationReport,
}

/// Generate the JSON report for machine consumption
pub fn generate_json_report(report: &AggregationReport, feed: &Path) -> anyhow::Result<String> {
    let envelope = JsonReport {
        generated_at: generated_at(),
        feed: feed.display().to_string(),
        report,
    };
    let mut json =
        serde_json::to_string_pretty(&envelope).context("Failed to serialize report")?;
    json.push('\n');
    Ok(json)
}

/// Generate a CSV listing of every finding
pub fn generate_csv_report(report: &AggregationReport) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for finding in &report.errors {
        writer
            .serialize(finding)
            .context("Failed to write finding as CSV")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
