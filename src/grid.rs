//! The mutable working grid used during a single solver attempt, plus the
//! records of words placed onto it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::normalize::CandidateEntry;

/// Default side length of the square working grid.
pub const GRID_SIZE: usize = 15;

/// Orientation of a word in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The orientation a crossing word must have.
    #[must_use]
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Unit step `(dx, dy)` from one letter to the next.
    #[must_use]
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Across => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => f.write_str("across"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// Absolute cell coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[must_use]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A fixed-size square matrix of optional uppercase letters.
///
/// Every occupied cell agrees with every word passing through it; the
/// placement evaluator guarantees this before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingGrid {
    size: usize,
    cells: Vec<Option<u8>>,
}

impl WorkingGrid {
    /// An empty `size` x `size` grid.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size, cells: vec![None; size * size] }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the signed coordinate falls inside the grid.
    #[must_use]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// Letter at a signed coordinate; `None` when empty or off-grid.
    #[must_use]
    pub fn letter(&self, x: isize, y: isize) -> Option<u8> {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.size + x as usize]
        } else {
            None
        }
    }

    /// Letter at an in-grid position.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<char> {
        debug_assert!(pos.x < self.size && pos.y < self.size, "position {pos:?} outside grid");
        self.cells[pos.y * self.size + pos.x].map(char::from)
    }

    /// True when the coordinate is inside the grid and holds a letter.
    #[must_use]
    pub fn is_occupied(&self, x: isize, y: isize) -> bool {
        self.letter(x, y).is_some()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Write `answer` starting at `start`, returning the cells it occupies
    /// first-to-last.
    ///
    /// The caller must already have checked legality; a collision here is a
    /// bug in the evaluator.
    pub(crate) fn write_word(
        &mut self,
        answer: &str,
        start: Position,
        direction: Direction,
    ) -> Vec<Position> {
        let (dx, dy) = direction.step();
        answer
            .bytes()
            .enumerate()
            .map(|(i, letter)| {
                let pos = Position::new(
                    start.x + i * dx.unsigned_abs(),
                    start.y + i * dy.unsigned_abs(),
                );
                let slot = &mut self.cells[pos.y * self.size + pos.x];
                debug_assert!(
                    slot.is_none() || *slot == Some(letter),
                    "letter clash at {pos:?}: grid has {:?}, word {answer} wants {}",
                    slot.map(char::from),
                    char::from(letter)
                );
                *slot = Some(letter);
                pos
            })
            .collect()
    }
}

impl fmt::Display for WorkingGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|c| c.map_or('.', char::from)).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// One successfully placed candidate and the absolute cells it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub answer: String,
    pub clue: String,
    pub source_id: String,
    pub direction: Direction,
    pub cells: Vec<Position>,
}

impl PlacedWord {
    pub(crate) fn new(entry: &CandidateEntry, direction: Direction, cells: Vec<Position>) -> Self {
        debug_assert_eq!(entry.len(), cells.len(), "one cell per letter");
        Self {
            answer: entry.answer().to_string(),
            clue: entry.clue().to_string(),
            source_id: entry.source_id().to_string(),
            direction,
            cells,
        }
    }

    /// First cell of the word.
    ///
    /// # Panics
    /// Never for words built by the solver; answers are at least three letters.
    #[must_use]
    pub fn start(&self) -> Position {
        self.cells[0]
    }
}
