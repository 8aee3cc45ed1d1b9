//! Keyword volume providers
//!
//! Search-volume data comes from an external service. The engine only sees
//! the [`KeywordVolumeProvider`] trait; [`CsvVolumeTable`] serves exported
//! keyword-planner data from disk and [`NoVolumeData`] stands in when no
//! data is configured.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Advertiser competition level for a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Competition {
    High,
    Medium,
    Low,
}

impl FromStr for Competition {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Competition::High),
            "MEDIUM" => Ok(Competition::Medium),
            "LOW" => Ok(Competition::Low),
            other => Err(Error::keyword_volume(format!(
                "Unknown competition level '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Competition::High => "HIGH",
            Competition::Medium => "MEDIUM",
            Competition::Low => "LOW",
        };
        f.write_str(label)
    }
}

/// Search-volume metrics for one keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub avg_monthly_searches: u64,
    pub competition: Competition,
    /// 0 to 100
    pub competition_index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_top_page_bid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_top_page_bid: Option<f64>,
}

/// Lookup of keyword metrics
///
/// `Ok(None)` means the provider has no data for the term. Errors are
/// logged by the caller and treated the same way.
pub trait KeywordVolumeProvider: Send + Sync {
    fn metrics(&self, term: &str) -> Result<Option<KeywordMetrics>>;
}

/// Provider with no data
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVolumeData;

impl KeywordVolumeProvider for NoVolumeData {
    fn metrics(&self, _term: &str) -> Result<Option<KeywordMetrics>> {
        Ok(None)
    }
}

#[derive(Debug, Deserialize)]
struct VolumeRow {
    term: String,
    avg_monthly_searches: u64,
    competition: String,
    competition_index: u8,
    low_top_page_bid: Option<f64>,
    high_top_page_bid: Option<f64>,
}

/// Keyword metrics loaded from a CSV export
///
/// Expected header: `term,avg_monthly_searches,competition,
/// competition_index,low_top_page_bid,high_top_page_bid`. Bid columns may be
/// empty. Terms are matched case-insensitively with whitespace collapsed.
#[derive(Debug, Clone, Default)]
pub struct CsvVolumeTable {
    entries: HashMap<String, KeywordMetrics>,
}

impl CsvVolumeTable {
    /// Load a volume table from a CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            Error::io(
                format!("Failed to open keyword volumes {}", path.display()),
                e,
            )
        })?;
        let table = Self::parse(file, &path.display().to_string())?;
        info!(
            "Loaded keyword volumes for {} terms from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse volume rows from CSV content
    pub fn parse<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut entries = HashMap::new();

        for row in csv_reader.deserialize::<VolumeRow>() {
            let row = row
                .map_err(|e| Error::feed_parsing(origin, "Invalid keyword volume row", Some(e)))?;
            let competition = row.competition.parse()?;
            entries.insert(
                normalize_keyword(&row.term),
                KeywordMetrics {
                    avg_monthly_searches: row.avg_monthly_searches,
                    competition,
                    competition_index: row.competition_index.min(100),
                    low_top_page_bid: row.low_top_page_bid,
                    high_top_page_bid: row.high_top_page_bid,
                },
            );
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeywordVolumeProvider for CsvVolumeTable {
    fn metrics(&self, term: &str) -> Result<Option<KeywordMetrics>> {
        Ok(self.entries.get(&normalize_keyword(term)).cloned())
    }
}

/// Lowercase and collapse internal whitespace
pub fn normalize_keyword(term: &str) -> String {
    term.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
