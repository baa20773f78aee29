//! Greedy placement: build one grid from one ordering of candidates.
//!
//! The first entry is written across the middle of an empty grid. Every later
//! entry is offered to the placement evaluator exactly once, in order; if it
//! has a legal spot it is committed, otherwise it is dropped for this
//! attempt. There is no backtracking: the orchestrator compensates by running
//! several attempts over different orderings.
//!
//! # Examples
//!
//! ```
//! use qajaq::normalize::{normalize, RawEntry};
//! use qajaq::solver::solve_attempt;
//!
//! let entries = normalize(&[
//!     RawEntry::new("gamma", "High-energy photon", "1"),
//!     RawEntry::new("beta", "Electron from decay", "2"),
//! ]);
//! let attempt = solve_attempt(&entries, 15).unwrap();
//! assert_eq!(attempt.len(), 2);
//! ```

use log::{debug, trace};

use crate::grid::{PlacedWord, WorkingGrid};
use crate::normalize::CandidateEntry;
use crate::placement::{find_best_placement, seed_placement, Placement};

/// The outcome of one greedy pass: the working grid and what landed on it,
/// in placement order.
#[derive(Debug, Clone)]
pub struct Attempt {
    grid: WorkingGrid,
    placed: Vec<PlacedWord>,
}

impl Attempt {
    #[must_use]
    pub fn grid(&self) -> &WorkingGrid {
        &self.grid
    }

    #[must_use]
    pub fn placed(&self) -> &[PlacedWord] {
        &self.placed
    }

    /// Number of words placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    fn commit(&mut self, entry: &CandidateEntry, placement: Placement) {
        let cells = self.grid.write_word(entry.answer(), placement.start(), placement.direction);
        trace!(
            "placed {} {} at ({}, {}) with {} crossing(s)",
            entry.answer(),
            placement.direction,
            placement.x,
            placement.y,
            placement.intersections
        );
        self.placed.push(PlacedWord::new(entry, placement.direction, cells));
    }
}

/// Run one greedy pass over `entries` on a fresh `grid_size` grid.
///
/// Returns `None` when no entry fits as a seed word (including when
/// `entries` is empty).
#[must_use]
pub fn solve_attempt(entries: &[CandidateEntry], grid_size: usize) -> Option<Attempt> {
    let mut attempt = Attempt {
        grid: WorkingGrid::new(grid_size),
        placed: Vec::with_capacity(entries.len()),
    };

    let seed_idx =
        entries.iter().position(|e| seed_placement(&attempt.grid, e.answer()).is_some())?;
    if seed_idx > 0 {
        debug!("solve_attempt: {seed_idx} entries too long to seed a {grid_size}x{grid_size} grid");
    }
    let seed = &entries[seed_idx];
    let placement = seed_placement(&attempt.grid, seed.answer())?;
    attempt.commit(seed, placement);

    for entry in &entries[seed_idx + 1..] {
        match find_best_placement(&attempt.grid, entry.answer(), &attempt.placed) {
            Some(placement) => attempt.commit(entry, placement),
            None => trace!("no legal placement for {}, skipping", entry.answer()),
        }
    }

    debug_assert!(
        attempt.placed.iter().all(|pw| pw
            .answer
            .chars()
            .zip(&pw.cells)
            .all(|(c, &pos)| attempt.grid.get(pos) == Some(c))),
        "grid disagrees with a placed word"
    );

    Some(attempt)
}
