//! Symmetric-delete dictionary index
//!
//! Each dictionary entry is indexed under every string obtainable by deleting
//! up to `max_edit_distance` characters from its first `prefix_length`
//! characters. A lookup generates the same deletions for the input and
//! verifies each shared key with a real edit distance. Only deletions are
//! generated, so the index stays language-independent and lookups avoid the
//! alphabet-sized branching of insertion/substitution candidates.
//!
//! Candidates are verified with optimal string alignment distance
//! (transpositions of adjacent characters count as one edit).

use crate::{Error, Result};
use rapidfuzz::distance::osa;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// A dictionary entry close to a looked-up word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Dictionary entry
    pub term: String,
    /// Edit distance from the looked-up word
    pub distance: usize,
    /// Corpus frequency of the entry
    pub count: u64,
}

/// Delete-variant index over a word-frequency dictionary
#[derive(Debug, Clone)]
pub struct SymSpellIndex {
    max_edit_distance: usize,
    prefix_length: usize,
    /// Entry → position in `entries`
    positions: HashMap<String, usize>,
    /// Entries with their frequencies, in insertion order
    entries: Vec<(String, u64)>,
    /// Delete variant → positions of entries producing it
    deletes: HashMap<String, Vec<usize>>,
}

impl SymSpellIndex {
    /// Create an empty index
    pub fn new(max_edit_distance: usize, prefix_length: usize) -> Self {
        Self {
            max_edit_distance,
            prefix_length: prefix_length.max(1),
            positions: HashMap::new(),
            entries: Vec::new(),
            deletes: HashMap::new(),
        }
    }

    /// Load an index from dictionary text
    ///
    /// One entry per line: `word` or `word<whitespace>count`. Blank lines and
    /// `#` comments are skipped; a missing or unparsable count means 1.
    pub fn from_reader<R: BufRead>(
        reader: R,
        max_edit_distance: usize,
        prefix_length: usize,
    ) -> Result<Self> {
        let mut index = Self::new(max_edit_distance, prefix_length);

        for (line_number, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                Error::io(
                    format!("Failed to read dictionary line {}", line_number + 1),
                    e,
                )
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let count = parts
                .next()
                .and_then(|count| count.parse::<u64>().ok())
                .unwrap_or(1);
            index.insert(word, count);
        }

        if index.is_empty() {
            return Err(Error::dictionary("Dictionary contains no entries"));
        }

        Ok(index)
    }

    /// Add an entry, summing counts for repeated words
    pub fn insert(&mut self, word: &str, count: u64) {
        let word = normalize(word);
        if word.is_empty() {
            return;
        }

        if let Some(&position) = self.positions.get(&word) {
            let entry = &mut self.entries[position].1;
            *entry = entry.saturating_add(count);
            return;
        }

        let position = self.entries.len();
        let key = prefix(&word, self.prefix_length);
        for variant in delete_variants(&key, self.max_edit_distance) {
            self.deletes.entry(variant).or_default().push(position);
        }
        self.positions.insert(word.clone(), position);
        self.entries.push((word, count));
    }

    /// Whether `word` is a dictionary entry (case-insensitive)
    pub fn contains(&self, word: &str) -> bool {
        self.positions.contains_key(&normalize(word))
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum edit distance the index was built for
    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    /// Entries within `max_distance` edits of `word`
    ///
    /// Sorted by distance, then frequency (descending), then term. The
    /// distance is capped at the index's build distance. An exact match is
    /// returned with distance 0.
    pub fn lookup(&self, word: &str, max_distance: usize) -> Vec<Suggestion> {
        let input = normalize(word);
        if input.is_empty() {
            return Vec::new();
        }

        let max_distance = max_distance.min(self.max_edit_distance);
        let input_length = input.chars().count();
        let mut found: HashMap<usize, usize> = HashMap::new();

        if let Some(&position) = self.positions.get(&input) {
            found.insert(position, 0);
        }

        let key = prefix(&input, self.prefix_length);
        for variant in delete_variants(&key, max_distance) {
            let Some(positions) = self.deletes.get(&variant) else {
                continue;
            };
            for &position in positions {
                if found.contains_key(&position) {
                    continue;
                }
                let term = &self.entries[position].0;
                if term.chars().count().abs_diff(input_length) > max_distance {
                    continue;
                }
                let distance = osa::distance(input.chars(), term.chars());
                if distance <= max_distance {
                    found.insert(position, distance);
                }
            }
        }

        let mut suggestions: Vec<Suggestion> = found
            .into_iter()
            .map(|(position, distance)| {
                let (term, count) = &self.entries[position];
                Suggestion {
                    term: term.clone(),
                    distance,
                    count: *count,
                }
            })
            .collect();

        suggestions.sort_by(|a, b| {
            (a.distance, Reverse(a.count), &a.term).cmp(&(b.distance, Reverse(b.count), &b.term))
        });
        suggestions
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

fn prefix(word: &str, length: usize) -> String {
    word.chars().take(length).collect()
}

/// `word` plus every string reachable by deleting up to `max_deletes` chars
fn delete_variants(word: &str, max_deletes: usize) -> HashSet<String> {
    let mut variants = HashSet::new();
    variants.insert(word.to_string());

    let mut frontier = vec![word.chars().collect::<Vec<char>>()];
    for _ in 0..max_deletes {
        let mut next = Vec::new();
        for chars in &frontier {
            if chars.is_empty() {
                continue;
            }
            for skip in 0..chars.len() {
                let variant: Vec<char> = chars
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, c)| *c)
                    .collect();
                if variants.insert(variant.iter().collect()) {
                    next.push(variant);
                }
            }
        }
        frontier = next;
    }

    variants
}
