//! Turn a winning attempt into the immutable, cropped, numbered puzzle.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::grid::{Direction, PlacedWord, WorkingGrid};

/// Empty cells left around the bounding box (clamped to the grid edge).
pub const PADDING: usize = 1;

/// A coordinate in the cropped frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

/// A letter cell of the finished puzzle and the words passing through it.
///
/// `word_indices` are positions in [`CrosswordPuzzle::words`], in the order
/// the words were placed (at most one across and one down).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordCell {
    pub letter: char,
    pub word_indices: Vec<usize>,
    pub x: usize,
    pub y: usize,
}

/// One answer in the finished puzzle.
///
/// `index` is the printed clue number, shared by an across and a down word
/// that start on the same cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordWord {
    pub index: usize,
    pub clue: String,
    pub answer: String,
    pub source_id: String,
    pub direction: Direction,
    pub start_x: usize,
    pub start_y: usize,
    pub cells: Vec<Coord>,
}

impl CrosswordWord {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The finished crossword. Rows of `grid` are indexed by `y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosswordPuzzle {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<Option<CrosswordCell>>>,
    pub words: Vec<CrosswordWord>,
}

impl CrosswordPuzzle {
    /// Cell at `(x, y)`, or `None` for a block or an out-of-range coordinate.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<&CrosswordCell> {
        self.grid.get(y)?.get(x)?.as_ref()
    }

    /// Across words ordered by clue number.
    #[must_use]
    pub fn across(&self) -> Vec<&CrosswordWord> {
        self.words_in(Direction::Across)
    }

    /// Down words ordered by clue number.
    #[must_use]
    pub fn down(&self) -> Vec<&CrosswordWord> {
        self.words_in(Direction::Down)
    }

    fn words_in(&self, direction: Direction) -> Vec<&CrosswordWord> {
        let mut words: Vec<&CrosswordWord> =
            self.words.iter().filter(|w| w.direction == direction).collect();
        words.sort_by_key(|w| w.index);
        words
    }

    /// Clue number printed in the cell at `(x, y)`, if a word starts there.
    #[must_use]
    pub fn number_at(&self, x: usize, y: usize) -> Option<usize> {
        self.words.iter().find(|w| w.start_x == x && w.start_y == y).map(|w| w.index)
    }
}

/// Inclusive rectangle in working-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Bounds {
    /// Smallest rectangle holding every cell of every word.
    pub(crate) fn enclosing(placed: &[PlacedWord]) -> Option<Bounds> {
        let mut cells = placed.iter().flat_map(|pw| pw.cells.iter());
        let first = cells.next()?;
        let init = Bounds { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        Some(cells.fold(init, |b, c| Bounds {
            min_x: b.min_x.min(c.x),
            min_y: b.min_y.min(c.y),
            max_x: b.max_x.max(c.x),
            max_y: b.max_y.max(c.y),
        }))
    }

    /// Grow by `pad` on every side without leaving a `size` grid.
    pub(crate) fn padded(self, pad: usize, size: usize) -> Bounds {
        Bounds {
            min_x: self.min_x.saturating_sub(pad),
            min_y: self.min_y.saturating_sub(pad),
            max_x: (self.max_x + pad).min(size - 1),
            max_y: (self.max_y + pad).min(size - 1),
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub(crate) fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// Crop, re-index and number the placed words.
///
/// # Arguments
/// * `grid`   — The working grid of the chosen attempt.
/// * `placed` — The words to keep, in placement order. May be a prefix of
///   what was placed on `grid`.
///
/// # Behavior:
/// 1. Take the smallest rectangle holding every cell of every kept word.
/// 2. Grow it by [`PADDING`] on each side, stopping at the grid edge.
/// 3. Translate each word's cells so the rectangle's corner is `(0, 0)`.
/// 4. Copy the letter of every covered cell and record on it the index (into
///    `words`) of each word passing through.
/// 5. Number the words (see `assign_numbers`).
///
/// Only cells covered by a word in `placed` are carried into the puzzle, so
/// letters of words dropped before finalizing do not linger as orphans. An
/// empty `placed` gives an empty 0×0 puzzle.
#[must_use]
pub fn finalize(grid: &WorkingGrid, placed: &[PlacedWord]) -> CrosswordPuzzle {
    let Some(tight) = Bounds::enclosing(placed) else {
        return CrosswordPuzzle { width: 0, height: 0, grid: Vec::new(), words: Vec::new() };
    };
    // 1-2. tight box, then padding clamped to the grid
    let bounds = tight.padded(PADDING, grid.size());
    let (width, height) = (bounds.width(), bounds.height());

    let mut cells: Vec<Vec<Option<CrosswordCell>>> = vec![vec![None; width]; height];

    let mut words: Vec<CrosswordWord> = placed
        .iter()
        .enumerate()
        .map(|(idx, pw)| {
            // 3. shift into the cropped frame
            let local: Vec<Coord> = pw
                .cells
                .iter()
                .map(|p| Coord { x: p.x - bounds.min_x, y: p.y - bounds.min_y })
                .collect();

            // 4. letters and back-references
            for (&abs, c) in pw.cells.iter().zip(&local) {
                let letter = grid.get(abs).unwrap_or('?');
                debug_assert_eq!(
                    Some(letter),
                    pw.answer.chars().nth(c.x.abs_diff(local[0].x) + c.y.abs_diff(local[0].y)),
                    "grid letter disagrees with {}",
                    pw.answer
                );
                cells[c.y][c.x]
                    .get_or_insert_with(|| CrosswordCell {
                        letter,
                        word_indices: Vec::new(),
                        x: c.x,
                        y: c.y,
                    })
                    .word_indices
                    .push(idx);
            }

            CrosswordWord {
                index: 0,
                clue: pw.clue.clone(),
                answer: pw.answer.clone(),
                source_id: pw.source_id.clone(),
                direction: pw.direction,
                start_x: local[0].x,
                start_y: local[0].y,
                cells: local,
            }
        })
        .collect();

    // 5.
    assign_numbers(&mut words);

    CrosswordPuzzle { width, height, grid: cells, words }
}

/// Number distinct start cells 1, 2, ... in reading order (row, then column).
///
/// An across and a down word starting on the same cell share its number;
/// no other two words can, since at most one word per direction starts on
/// any cell.
fn assign_numbers(words: &mut [CrosswordWord]) {
    let mut order: Vec<usize> = (0..words.len()).collect();
    order.sort_by_key(|&i| (words[i].start_y, words[i].start_x));

    let mut numbers: HashMap<(usize, usize), usize> = HashMap::new();
    for i in order {
        let next = numbers.len() + 1;
        let start = (words[i].start_x, words[i].start_y);
        words[i].index = *numbers.entry(start).or_insert(next);
    }
}
