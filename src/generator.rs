//! Multi-attempt orchestration: shuffle, solve, keep the best, finalize.
//!
//! Each attempt shuffles the candidates with the caller's RNG, then sorts
//! them longest-first (stable, so equal lengths keep their shuffled order)
//! and truncates to the candidate pool before running the greedy solver.
//! The best attempt is the one that placed the most words; generation stops
//! early once an attempt reaches `target_min`.
//!
//! # Examples
//!
//! ```
//! use qajaq::normalize::RawEntry;
//!
//! let answers = [
//!     "gray", "gamma", "neutron", "xray", "alpha", "beta", "sievert", "cobalt",
//!     "linac", "bolus", "wedge", "output", "grid", "filter", "imrt",
//! ];
//! let entries: Vec<RawEntry> = answers
//!     .iter()
//!     .enumerate()
//!     .map(|(i, a)| RawEntry::new(*a, format!("clue {i}"), format!("q{i}")))
//!     .collect();
//!
//! let puzzle = qajaq::generate_seeded(&entries, 2024)?;
//! assert!(puzzle.words.len() >= 6);
//! # Ok::<(), qajaq::errors::GenerateError>(())
//! ```

use instant::Instant;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::errors::GenerateError;
use crate::finalize::{finalize, CrosswordPuzzle};
use crate::grid::GRID_SIZE;
use crate::normalize::{normalize_checked, CandidateEntry, RawEntry, MIN_ANSWER_LEN, MIN_ENTRIES};
use crate::solver::{solve_attempt, Attempt};

/// Number of whole-puzzle attempts.
pub const MAX_ATTEMPTS: usize = 3;
/// Candidates considered per attempt, after sorting.
pub const CANDIDATE_POOL: usize = 20;
/// An attempt placing at least this many words ends the search.
pub const TARGET_MIN: usize = 8;
/// The finished puzzle keeps at most this many words.
pub const TARGET_MAX: usize = 12;

/// Tunables for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Side of the square working grid.
    pub grid_size: usize,
    pub max_attempts: usize,
    /// Latency bound, not a statement about which entries deserve a place.
    pub candidate_pool: usize,
    pub target_min: usize,
    pub target_max: usize,
    /// Usable entries needed before placement is attempted, and words needed
    /// in the best attempt for the puzzle to be accepted.
    pub min_words: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            max_attempts: MAX_ATTEMPTS,
            candidate_pool: CANDIDATE_POOL,
            target_min: TARGET_MIN,
            target_max: TARGET_MAX,
            min_words: MIN_ENTRIES,
        }
    }
}

impl GeneratorConfig {
    /// Reject configurations that could never produce a puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<(), GenerateError> {
        let fail = |reason: String| Err(GenerateError::InvalidConfig { reason });
        if self.grid_size < MIN_ANSWER_LEN {
            return fail(format!(
                "grid_size {} is smaller than the shortest answer ({MIN_ANSWER_LEN})",
                self.grid_size
            ));
        }
        if self.max_attempts == 0 {
            return fail("max_attempts must be at least 1".to_string());
        }
        if self.min_words == 0 {
            return fail("min_words must be at least 1".to_string());
        }
        if self.min_words > self.target_max {
            return fail(format!(
                "min_words {} exceeds target_max {}",
                self.min_words, self.target_max
            ));
        }
        if self.target_min > self.target_max {
            return fail(format!(
                "target_min {} exceeds target_max {}",
                self.target_min, self.target_max
            ));
        }
        if self.candidate_pool < self.min_words {
            return fail(format!(
                "candidate_pool {} is below min_words {}",
                self.candidate_pool, self.min_words
            ));
        }
        Ok(())
    }
}

/// Order candidates for one attempt: shuffle, then longest first, then cap.
fn attempt_order<R: Rng + ?Sized>(
    candidates: &[CandidateEntry],
    pool: usize,
    rng: &mut R,
) -> Vec<CandidateEntry> {
    let mut order = candidates.to_vec();
    order.shuffle(rng);
    order.sort_by(|a, b| b.len().cmp(&a.len()));
    order.truncate(pool);
    order
}

/// Run the attempts and return the best one, or `None` if no attempt could
/// even seed a grid.
fn best_attempt<R: Rng + ?Sized>(
    candidates: &[CandidateEntry],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Option<Attempt> {
    let mut best: Option<Attempt> = None;

    for n in 1..=config.max_attempts {
        let order = attempt_order(candidates, config.candidate_pool, rng);
        let Some(attempt) = solve_attempt(&order, config.grid_size) else {
            debug!("attempt {n}/{}: nothing could be seeded", config.max_attempts);
            continue;
        };
        debug!(
            "attempt {n}/{}: placed {} of {} candidates",
            config.max_attempts,
            attempt.len(),
            order.len()
        );

        if attempt.len() >= config.target_min {
            return Some(attempt);
        }
        if best.as_ref().map_or(true, |b| attempt.len() > b.len()) {
            best = Some(attempt);
        }
    }

    best
}

/// Build a puzzle from pre-normalized candidates.
///
/// # Errors
///
/// `InvalidConfig` for a bad `config`, `InsufficientInput` if fewer than
/// `config.min_words` candidates are given, `Unsolvable` if no attempt
/// placed at least `config.min_words` words.
pub fn generate_from_candidates<R: Rng + ?Sized>(
    candidates: &[CandidateEntry],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<CrosswordPuzzle, GenerateError> {
    config.validate()?;
    if candidates.len() < config.min_words {
        return Err(GenerateError::InsufficientInput {
            valid: candidates.len(),
            required: config.min_words,
        });
    }

    let started = Instant::now();
    let best = best_attempt(candidates, config, rng);
    let placed = best.as_ref().map_or(0, Attempt::len);
    let Some(best) = best.filter(|b| b.len() >= config.min_words) else {
        warn!("generation failed: best attempt placed {placed} words, need {}", config.min_words);
        return Err(GenerateError::Unsolvable { placed, required: config.min_words });
    };

    let kept = &best.placed()[..best.len().min(config.target_max)];
    info!(
        "generated crossword with {} words ({} placed) in {:.1}ms",
        kept.len(),
        best.len(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    Ok(finalize(best.grid(), kept))
}

/// Normalize `entries` and build a puzzle with a custom configuration.
///
/// # Errors
///
/// See [`generate_from_candidates`].
pub fn generate_with_config<R: Rng + ?Sized>(
    entries: &[RawEntry],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<CrosswordPuzzle, GenerateError> {
    config.validate()?;
    let candidates = normalize_checked(entries, config.min_words)?;
    generate_from_candidates(&candidates, config, rng)
}

/// Normalize `entries` and build a puzzle with the default configuration.
///
/// # Errors
///
/// `InsufficientInput` if fewer than six entries survive normalization,
/// `Unsolvable` if fewer than six words could be placed.
pub fn generate<R: Rng + ?Sized>(
    entries: &[RawEntry],
    rng: &mut R,
) -> Result<CrosswordPuzzle, GenerateError> {
    generate_with_config(entries, &GeneratorConfig::default(), rng)
}

/// [`generate`] with a `StdRng` seeded from `seed`; the same seed and input
/// always give the same puzzle.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_seeded(entries: &[RawEntry], seed: u64) -> Result<CrosswordPuzzle, GenerateError> {
    generate(entries, &mut StdRng::seed_from_u64(seed))
}

/// [`generate`] driven by the thread-local RNG, for callers that don't need
/// reproducible output.
///
/// # Errors
///
/// See [`generate`].
pub fn generate_random(entries: &[RawEntry]) -> Result<CrosswordPuzzle, GenerateError> {
    generate(entries, &mut rand::thread_rng())
}
