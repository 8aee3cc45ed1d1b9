//! Delimited feed loading
//!
//! Reads CSV or TSV product feeds into [`FeedItem`] records. Header names
//! are resolved through [`FeedField::from_attribute_name`](crate::FeedField),
//! so `g:id`, `Image Link` and `image-link` all land in the same field.
//! Columns the engine does not know are kept in the record's extra map.

use crate::app::models::FeedItem;
use crate::app::services::feed_pipeline::FeedSource;
use crate::{Error, Result};
use csv::StringRecord;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Candidate delimiters in sniffing priority order
const SNIFF_DELIMITERS: &[u8] = b"\t,;|";

/// Feed source backed by a delimited text file
#[derive(Debug, Clone)]
pub struct DelimitedFeedSource {
    path: PathBuf,
    delimiter: Option<u8>,
}

impl DelimitedFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: None,
        }
    }

    /// Force a delimiter instead of detecting one
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse delimited feed content
    ///
    /// `origin` names the input in error messages. Completely blank rows are
    /// skipped; rows shorter or longer than the header are accepted.
    pub fn parse<R: Read>(reader: R, delimiter: u8, origin: &str) -> Result<Vec<FeedItem>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::feed_parsing(origin, "Failed to read header row", Some(e)))?
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').to_string())
            .collect::<Vec<_>>();

        if headers.iter().all(|name| name.trim().is_empty()) {
            return Err(Error::feed_parsing(origin, "Feed has no header row", None));
        }

        let mut items = Vec::new();
        let mut record = StringRecord::new();
        while csv_reader.read_record(&mut record).map_err(|e| {
            Error::feed_parsing(origin, "Failed to read feed row", Some(e))
        })? {
            if record.iter().all(|value| value.trim().is_empty()) {
                continue;
            }

            items.push(FeedItem::from_attributes(
                headers.iter().zip(record.iter()),
            ));
        }

        debug!("Parsed {} records from {}", items.len(), origin);
        Ok(items)
    }

    fn resolve_delimiter(&self, content: &str) -> u8 {
        if let Some(delimiter) = self.delimiter {
            return delimiter;
        }

        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("tsv") | Some("txt") => b'\t',
            _ => sniff_delimiter(content.lines().next().unwrap_or_default()),
        }
    }
}

/// Pick the delimiter occurring most often in a header line (comma if none)
pub fn sniff_delimiter(header_line: &str) -> u8 {
    SNIFF_DELIMITERS
        .iter()
        .copied()
        .map(|delimiter| {
            let count = header_line.bytes().filter(|b| *b == delimiter).count();
            (delimiter, count)
        })
        .filter(|(_, count)| *count > 0)
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| priority(b.0).cmp(&priority(a.0))))
        .map_or(b',', |(delimiter, _)| delimiter)
}

fn priority(delimiter: u8) -> usize {
    SNIFF_DELIMITERS
        .iter()
        .position(|d| *d == delimiter)
        .unwrap_or(usize::MAX)
}

impl FeedSource for DelimitedFeedSource {
    fn load(&self) -> Result<Vec<FeedItem>> {
        let origin = self.path.display().to_string();
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::io(format!("Failed to read feed {origin}"), e))?;

        let delimiter = self.resolve_delimiter(&content);
        debug!(
            "Reading {} with delimiter {:?}",
            origin,
            char::from(delimiter)
        );

        let items = Self::parse(content.as_bytes(), delimiter, &origin)?;
        if items.is_empty() {
            return Err(Error::feed_source(format!(
                "Feed {origin} contains no data rows"
            )));
        }

        info!("Loaded {} products from {}", items.len(), origin);
        Ok(items)
    }
}
