//! Free-text quality: punctuation, characters, abbreviations, spelling

use super::{CheckFault, CheckResult, Checker};
use crate::app::models::{ErrorResult, ErrorType, FeedField, FeedItem};
use crate::app::services::fuzzy_matcher::SpellChecker;
use crate::app::services::text_normalizer::{DefectKind, abbreviations, special_characters, words};
use crate::constants::MAX_SUGGESTIONS_IN_DETAILS;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Reports one class of text defect in one field
#[derive(Debug, Clone)]
pub struct TextDefectChecker {
    field: FeedField,
    kind: DefectKind,
    name: String,
}

impl TextDefectChecker {
    pub fn new(field: FeedField, kind: DefectKind) -> Self {
        let kind_name = match kind {
            DefectKind::MissingSpaceAfterComma => "missing_space_after_comma",
            DefectKind::RepeatedDashes => "repeated_dashes",
            DefectKind::SpecialCharacters => "special_characters",
            DefectKind::Abbreviations => "abbreviations",
        };
        Self {
            field,
            kind,
            name: format!("{}_{kind_name}", field.as_str()),
        }
    }

    fn details(&self, text: &str) -> String {
        let label = self.field.label();
        match self.kind {
            DefectKind::MissingSpaceAfterComma => {
                format!("{label} has a comma not followed by a space")
            }
            DefectKind::RepeatedDashes => format!("{label} contains repeated dashes"),
            DefectKind::SpecialCharacters => {
                let found = special_characters(text)
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{label} contains special characters: {found}")
            }
            DefectKind::Abbreviations => format!(
                "{label} contains abbreviations: {}",
                abbreviations(text).join(", ")
            ),
        }
    }
}

impl Checker for TextDefectChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![self.field]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        let Some(text) = item.non_blank(self.field) else {
            return Ok(None);
        };
        if !self.kind.is_present(text) {
            return Ok(None);
        }

        Ok(Some(ErrorResult::new(
            item,
            self.kind.error_type(),
            self.field,
            self.details(text),
            text,
        )))
    }
}

/// Reports each distinct likely-misspelled word in one field
///
/// Words are compared case-insensitively for de-duplication; the finding
/// value is the word as written. Lookup failures from the spell checker are
/// backend faults.
#[derive(Clone)]
pub struct SpellingChecker {
    field: FeedField,
    speller: Arc<dyn SpellChecker>,
    name: String,
}

impl fmt::Debug for SpellingChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpellingChecker")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl SpellingChecker {
    pub fn new(field: FeedField, speller: Arc<dyn SpellChecker>) -> Self {
        Self {
            field,
            speller,
            name: format!("{}_spelling", field.as_str()),
        }
    }

    fn backend_fault(&self, source: crate::Error) -> CheckFault {
        CheckFault::backend(self.name.clone(), source)
    }
}

impl Checker for SpellingChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn inspects(&self) -> Vec<FeedField> {
        vec![self.field]
    }

    fn check(&self, item: &FeedItem) -> CheckResult<Option<ErrorResult>> {
        Ok(self.check_all(item)?.into_iter().next())
    }

    fn check_all(&self, item: &FeedItem) -> CheckResult<Vec<ErrorResult>> {
        let Some(text) = item.non_blank(self.field) else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut findings = Vec::new();

        for word in words(text) {
            if !seen.insert(word.to_lowercase()) {
                continue;
            }

            let Some(suggestions) = self
                .speller
                .misspelling(word)
                .map_err(|e| self.backend_fault(e))?
            else {
                continue;
            };
            let quoted = suggestions
                .iter()
                .take(MAX_SUGGESTIONS_IN_DETAILS)
                .map(|s| format!("\"{}\"", s.term))
                .collect::<Vec<_>>();

            let details = if quoted.is_empty() {
                format!("{} contains \"{word}\", a possible misspelling", self.field.label())
            } else {
                format!(
                    "{} contains \"{word}\", possibly a misspelling of {}",
                    self.field.label(),
                    quoted.join(" or ")
                )
            };

            findings.push(ErrorResult::new(
                item,
                ErrorType::PossibleMisspelling,
                self.field,
                details,
                word,
            ));
        }

        Ok(findings)
    }
}
