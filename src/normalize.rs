//! Entry normalization: turn free-form (answer, clue, id) triples into
//! placement-ready candidates.
//!
//! Answers are uppercased and stripped of everything outside `A`-`Z`, then
//! length-filtered. Deduplication and content filtering are the caller's job.

use serde::{Deserialize, Serialize};

use crate::errors::GenerateError;

/// Shortest answer the grid will accept.
pub const MIN_ANSWER_LEN: usize = 3;
/// Longest answer the grid will accept (matches the default grid side).
pub const MAX_ANSWER_LEN: usize = 15;
/// Fewer usable entries than this and a crossword is not worth attempting.
pub const MIN_ENTRIES: usize = 6;

/// An entry as supplied by the caller, before any cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    pub answer: String,
    pub clue: String,
    pub source_id: String,
}

impl RawEntry {
    pub fn new(
        answer: impl Into<String>,
        clue: impl Into<String>,
        source_id: impl Into<String>,
    ) -> Self {
        Self { answer: answer.into(), clue: clue.into(), source_id: source_id.into() }
    }
}

/// A sanitized entry eligible for placement.
///
/// `answer` holds only uppercase ASCII letters and its length is within
/// [`MIN_ANSWER_LEN`]..=[`MAX_ANSWER_LEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    answer: String,
    clue: String,
    source_id: String,
}

impl CandidateEntry {
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn clue(&self) -> &str {
        &self.clue
    }

    #[must_use]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Answer length in letters (bytes, since answers are ASCII).
    #[must_use]
    pub fn len(&self) -> usize {
        self.answer.len()
    }
}

impl From<&CandidateEntry> for RawEntry {
    fn from(c: &CandidateEntry) -> Self {
        RawEntry::new(c.answer.clone(), c.clue.clone(), c.source_id.clone())
    }
}

/// Uppercase `raw` and drop every character that is not `A`-`Z`.
#[must_use]
pub fn clean_answer(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_uppercase)
        .filter(char::is_ascii_uppercase)
        .collect()
}

/// Clean one entry, returning `None` if its answer ends up the wrong length.
#[must_use]
pub fn normalize_entry(raw: &RawEntry) -> Option<CandidateEntry> {
    let answer = clean_answer(&raw.answer);
    if !(MIN_ANSWER_LEN..=MAX_ANSWER_LEN).contains(&answer.len()) {
        return None;
    }
    Some(CandidateEntry {
        answer,
        clue: raw.clue.clone(),
        source_id: raw.source_id.clone(),
    })
}

/// Clean every entry and keep the ones with a usable answer, in input order.
#[must_use]
pub fn normalize(entries: &[RawEntry]) -> Vec<CandidateEntry> {
    entries.iter().filter_map(normalize_entry).collect()
}

/// Like [`normalize`], but fail with [`GenerateError::InsufficientInput`]
/// when fewer than `required` entries survive.
///
/// # Errors
///
/// Returns `InsufficientInput` if too few entries are usable.
pub fn normalize_checked(
    entries: &[RawEntry],
    required: usize,
) -> Result<Vec<CandidateEntry>, GenerateError> {
    let cleaned = normalize(entries);
    if cleaned.len() < required {
        log::debug!(
            "normalize: {} of {} entries usable, need {required}",
            cleaned.len(),
            entries.len()
        );
        return Err(GenerateError::InsufficientInput { valid: cleaned.len(), required });
    }
    Ok(cleaned)
}
