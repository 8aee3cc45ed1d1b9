//! Search-terms command implementation

use super::shared::{
    ProgressBarSink, configure_colors, generated_at, load_configuration, setup_logging,
    write_output,
};
use crate::app::services::feed_loader::DelimitedFeedSource;
use crate::app::services::feed_pipeline::FeedSource;
use crate::app::services::search_terms::{
    CsvVolumeTable, KeywordVolumeProvider, NoVolumeData, SearchTerm, SearchTermGenerator,
    SearchTermReport,
};
use crate::cli::args::{OutputFormat, SearchTermsArgs};
use anyhow::{Context, anyhow, bail};
use colored::*;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Terms listed in human output
const HUMAN_TERM_LIMIT: usize = 25;

/// Top-level function for the search-terms command
pub async fn run_search_terms(
    args: SearchTermsArgs,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    setup_logging(&args.common)?;
    args.common.validate(&args.feed)?;
    configure_colors(args.common.output_file.as_deref());

    let mut config = load_configuration(&args.common)?;
    if let Some(max_title_words) = args.max_title_words {
        config.search_terms.max_title_words = max_title_words;
        config.validate()?;
    }

    let provider: Arc<dyn KeywordVolumeProvider> = match &args.volumes {
        Some(path) => Arc::new(
            CsvVolumeTable::from_path(path)
                .with_context(|| format!("Failed to load keyword volumes from {}", path.display()))?,
        ),
        None => {
            info!("No keyword volume data given; volumes will be empty");
            Arc::new(NoVolumeData)
        }
    };

    let items = DelimitedFeedSource::new(&args.feed)
        .load()
        .with_context(|| format!("Failed to load {}", args.feed.display()))?;

    let generator = SearchTermGenerator::new(provider, config.search_terms.clone());
    let sink = ProgressBarSink::new("Generating search terms", args.common.show_progress());
    let report = generator.run(items, &sink, cancel).await?;

    let output = match args.common.output_format {
        OutputFormat::Human => generate_human_report(&report, &args.feed),
        OutputFormat::Json => generate_json_report(&report, &args.feed)?,
        OutputFormat::Csv => generate_csv_report(&report.terms)?,
    };
    write_output(&output, args.common.output_file.as_deref())?;

    if report.cancelled {
        bail!(
            "Search-term generation cancelled after {} of {} products",
            report.processed_products,
            report.total_products
        );
    }

    Ok(())
}

/// Generate the human-readable term listing, highest volume first
pub fn generate_human_report(report: &SearchTermReport, feed: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "🔍 Search Terms".green().bold());
    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let _ = writeln!(out, "📊 Summary for {}:", feed.display());
    let _ = writeln!(
        out,
        "   • Products analyzed: {} of {}",
        report.processed_products, report.total_products
    );
    let _ = writeln!(out, "   • Distinct terms: {}", report.terms.len());

    if report.terms.is_empty() {
        return out;
    }

    let mut ranked: Vec<&SearchTerm> = report.terms.iter().collect();
    ranked.sort_by(|a, b| {
        b.estimated_volume
            .cmp(&a.estimated_volume)
            .then_with(|| b.matching_products.cmp(&a.matching_products))
    });

    let _ = writeln!(out, "\n📈 Top terms:");
    for term in ranked.iter().take(HUMAN_TERM_LIMIT) {
        let volume = term
            .estimated_volume
            .map_or_else(|| "n/a".to_string(), |v| v.to_string());
        let _ = writeln!(
            out,
            "   • {} [{}] volume: {}, products: {}",
            term.search_term.bold(),
            term.pattern,
            volume.cyan(),
            term.matching_products
        );
    }
    if ranked.len() > HUMAN_TERM_LIMIT {
        let _ = writeln!(
            out,
            "   … {} more (use --output-format json or csv for the full list)",
            ranked.len() - HUMAN_TERM_LIMIT
        );
    }

    let _ = writeln!(out);
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: String,
    feed: String,
    total_products: usize,
    processed_products: usize,
    cancelled: bool,
    search_terms: &'a [SearchTerm],
}

/// Generate the JSON term listing
pub fn generate_json_report(report: &SearchTermReport, feed: &Path) -> anyhow::Result<String> {
    let envelope = JsonReport {
        generated_at: generated_at(),
        feed: feed.display().to_string(),
        total_products: report.total_products,
        processed_products: report.processed_products,
        cancelled: report.cancelled,
        search_terms: &report.terms,
    };
    let mut json =
        serde_json::to_string_pretty(&envelope).context("Failed to serialize search terms")?;
    json.push('\n');
    Ok(json)
}

/// Flat CSV row; keyword metrics are spread over their own columns
#[derive(Serialize)]
struct TermRow<'a> {
    id: &'a str,
    search_term: &'a str,
    pattern: &'a str,
    product_name: &'a str,
    matching_products: usize,
    avg_monthly_searches: Option<u64>,
    competition: Option<String>,
    competition_index: Option<u8>,
    low_top_page_bid: Option<f64>,
    high_top_page_bid: Option<f64>,
}

impl<'a> From<&'a SearchTerm> for TermRow<'a> {
    fn from(term: &'a SearchTerm) -> Self {
        let metrics = term.keyword_metrics.as_ref();
        Self {
            id: &term.id,
            search_term: &term.search_term,
            pattern: term.pattern.as_str(),
            product_name: &term.product_name,
            matching_products: term.matching_products,
            avg_monthly_searches: metrics.map(|m| m.avg_monthly_searches),
            competition: metrics.map(|m| m.competition.to_string()),
            competition_index: metrics.map(|m| m.competition_index),
            low_top_page_bid: metrics.and_then(|m| m.low_top_page_bid),
            high_top_page_bid: metrics.and_then(|m| m.high_top_page_bid),
        }
    }
}

/// Generate a CSV listing with one row per term
pub fn generate_csv_report(terms: &[SearchTerm]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for term in terms {
        writer
            .serialize(TermRow::from(term))
            .context("Failed to write search term as CSV")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
