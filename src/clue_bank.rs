//! `clue_bank` — load a standalone table of crossword clues
//!
//! A clue bank is plain text, one clue per line:
//!
//! ```text
//! # id;answer;clue[;category]
//! cw-001;GRAY;SI unit of absorbed dose;Radiation Physics
//! cw-025;LINAC;Machine that produces megavoltage photon beams for treatment;Radiotherapy
//! ```
//!
//! The parsing logic:
//! - Blank lines and lines starting with `#` are skipped.
//! - Lines with fewer than three `;`-separated fields are skipped silently.
//! - Lines with an empty id or answer are skipped silently.
//! - The clue is everything between the second separator and the category
//!   separator, so only the *last* field after the clue is treated as a
//!   category, and only when four or more fields are present.
//! - Answers are stored as written; normalization happens at generation time.
//!
//! The generator does not deduplicate, and two identical answers of equal
//! length can legally be stacked on the same cells. Everything handed out by
//! this module (`select`, `to_raw_entries`, `unique_answers`) therefore keeps
//! only the first entry for each cleaned answer.
//!
//! Like the rest of the crate, parsing works from an in-memory string so it
//! is usable from WebAssembly; `load_from_path` is native-only.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::ClueBankError;
use crate::normalize::{clean_answer, RawEntry};

/// Category name that means "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// One row of the clue bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub id: String,
    pub answer: String,
    pub clue: String,
    pub category: Option<String>,
}

impl From<&Clue> for RawEntry {
    fn from(c: &Clue) -> Self {
        RawEntry::new(c.answer.clone(), c.clue.clone(), c.id.clone())
    }
}

/// Parsed clue bank, in file order.
#[derive(Debug, Clone, Default)]
pub struct ClueBank {
    pub clues: Vec<Clue>,
}

fn parse_line(raw_line: &str) -> Option<Clue> {
    let line = raw_line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.splitn(3, ';');
    let id = fields.next()?.trim();
    let answer = fields.next()?.trim();
    let rest = fields.next()?;
    if id.is_empty() || answer.is_empty() {
        return None;
    }

    // the category, if any, is the final field; clues may contain ';'
    let (clue, category) = match rest.rsplit_once(';') {
        Some((clue, category)) if !category.trim().is_empty() => {
            (clue, Some(category.trim().to_string()))
        }
        Some((clue, _)) => (clue, None),
        None => (rest, None),
    };

    Some(Clue {
        id: id.to_string(),
        answer: answer.to_string(),
        clue: clue.trim().to_string(),
        category,
    })
}

impl ClueBank {
    /// Parse a clue bank from an in-memory string. Malformed lines are
    /// skipped; an input with no usable lines gives an empty bank.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> ClueBank {
        ClueBank { clues: contents.lines().filter_map(parse_line).collect() }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// `ClueBankError::Io` if the file can't be read, `ClueBankError::Empty`
    /// if it has no usable lines.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<ClueBank, ClueBankError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|source| ClueBankError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let bank = Self::parse_from_str(&data);
        if bank.is_empty() {
            return Err(ClueBankError::Empty { origin: path_ref.display().to_string() });
        }
        log::debug!("loaded {} clues from {}", bank.len(), path_ref.display());
        Ok(bank)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.clues.iter().filter_map(|c| c.category.as_deref()) {
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    /// Pick up to `limit` clues at random, optionally restricted to one
    /// category (`None` or `"all"` means every clue).
    ///
    /// Behavior:
    /// 1. Filter by category.
    /// 2. Shuffle with `rng`.
    /// 3. Drop clues whose cleaned answer was already drawn, so the result
    ///    never holds two entries for one answer.
    /// 4. Take the first `limit`.
    pub fn select<R: Rng + ?Sized>(
        &self,
        category: Option<&str>,
        limit: usize,
        rng: &mut R,
    ) -> Vec<&Clue> {
        let mut pool: Vec<&Clue> = match category {
            Some(name) if name != ALL_CATEGORIES => {
                self.clues.iter().filter(|c| c.category.as_deref() == Some(name)).collect()
            }
            _ => self.clues.iter().collect(),
        };
        pool.shuffle(rng);

        let mut seen = HashSet::new();
        pool.retain(|c| seen.insert(clean_answer(&c.answer)));
        pool.truncate(limit);
        pool
    }

    /// Every clue as a generator input, in bank order, first clue per answer.
    #[must_use]
    pub fn to_raw_entries(&self) -> Vec<RawEntry> {
        unique_answers(self.clues.iter().map(RawEntry::from))
    }
}

/// Keep the first entry for each cleaned answer, preserving order.
///
/// Use this on entries from outside a [`ClueBank`] before handing them to
/// the generator.
pub fn unique_answers(entries: impl IntoIterator<Item = RawEntry>) -> Vec<RawEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(clean_answer(&e.answer)))
        .collect()
}
