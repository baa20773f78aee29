//! Placement evaluation: where can a word go, and which spot is best?
//!
//! A candidate word may only attach perpendicular to a word already on the
//! grid, crossing it on a shared letter. A placement is legal when
//!
//! - every letter lies inside the grid,
//! - the cells just before the first letter and just after the last are
//!   empty (or off-grid),
//! - each occupied cell it passes through already holds the same letter,
//! - each empty cell it fills has empty neighbours on both sides across the
//!   word's own direction, so no letter fuses into an unrelated word,
//! - and it crosses at least one existing letter.
//!
//! Among legal placements the one with the most crossings wins, then the one
//! whose anchor is closest (Manhattan distance) to the grid centre. Remaining
//! ties go to whichever was found first, scanning placed words in placement
//! order, then positions in the placed word, then positions in the candidate.

use crate::grid::{Direction, PlacedWord, Position, WorkingGrid};

/// A scored hypothesis for inserting one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
    pub intersections: usize,
}

impl Placement {
    #[must_use]
    pub fn start(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Twice the Manhattan distance from the anchor to the centre of a
    /// `size` grid. Doubling keeps the half-cell centre of odd grids exact.
    #[must_use]
    pub fn doubled_centre_distance(&self, size: usize) -> usize {
        (2 * self.x).abs_diff(size) + (2 * self.y).abs_diff(size)
    }

    /// Strictly better than `other`: more crossings, then closer to the centre.
    fn beats(&self, other: &Placement, size: usize) -> bool {
        match self.intersections.cmp(&other.intersections) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => {
                self.doubled_centre_distance(size) < other.doubled_centre_distance(size)
            }
        }
    }
}

/// Where the first word of an attempt goes: across, in the middle row,
/// horizontally centred. `None` if the word is longer than the grid.
#[must_use]
pub fn seed_placement(grid: &WorkingGrid, word: &str) -> Option<Placement> {
    let size = grid.size();
    if word.is_empty() || word.len() > size {
        return None;
    }
    Some(Placement {
        x: (size - word.len()) / 2,
        y: size / 2,
        direction: Direction::Across,
        intersections: 0,
    })
}

/// Check whether `word` fits at signed anchor `(x, y)` running in `direction`.
///
/// The anchor is signed because [`legal_placements`] derives it by stepping
/// back from a crossing cell, which can land above or left of the grid.
///
/// # Arguments
/// * `grid`      — The working grid as it stands before this word.
/// * `word`      — Uppercase ASCII letters of the candidate answer.
/// * `x`, `y`    — Cell of the first letter.
/// * `direction` — Which way the word runs.
///
/// # Behavior:
/// 1. Reject if the first or last letter falls outside the grid.
/// 2. Reject if the cell just before the first letter or just after the last
///    is occupied; the word would run straight into another one.
/// 3. Walk the letters:
///    - an occupied cell must already hold the same letter (a crossing);
///    - an empty cell must have empty neighbours on both sides across the
///      word, or the new letter would form an unclued two-letter run.
/// 4. Accept only if at least one crossing was found, so every word after
///    the seed stays connected to the rest.
#[must_use]
pub fn can_place(
    grid: &WorkingGrid,
    word: &[u8],
    x: isize,
    y: isize,
    direction: Direction,
) -> bool {
    if word.is_empty() {
        return false;
    }
    let (dx, dy) = direction.step();
    let last = word.len() as isize - 1;
    let (end_x, end_y) = (x + dx * last, y + dy * last);

    // 1. both ends inside; the grid is convex so the middle is too
    if !grid.in_bounds(x, y) || !grid.in_bounds(end_x, end_y) {
        return false;
    }

    // 2. no head-to-tail contact with another word
    if grid.is_occupied(x - dx, y - dy) || grid.is_occupied(end_x + dx, end_y + dy) {
        return false;
    }

    // 3. letter by letter
    let mut crosses = false;
    for (i, &letter) in word.iter().enumerate() {
        let (cx, cy) = (x + dx * i as isize, y + dy * i as isize);
        match grid.letter(cx, cy) {
            Some(existing) if existing == letter => crosses = true,
            Some(_) => return false,
            None => {
                // side neighbours: (dy, dx) is the unit step across the word
                if grid.is_occupied(cx - dy, cy - dx) || grid.is_occupied(cx + dy, cy + dx) {
                    return false;
                }
            }
        }
    }

    // 4. must touch the existing grid somewhere
    crosses
}

/// Number of cells where `word` would land on an identical existing letter.
#[must_use]
pub fn count_intersections(
    grid: &WorkingGrid,
    word: &[u8],
    x: isize,
    y: isize,
    direction: Direction,
) -> usize {
    let (dx, dy) = direction.step();
    word.iter()
        .enumerate()
        .filter(|&(i, &letter)| {
            grid.letter(x + dx * i as isize, y + dy * i as isize) == Some(letter)
        })
        .count()
}

/// Enumerate every legal crossing placement of `word`, in evaluation order.
///
/// For each placed word, for each of its cells, for each position in `word`
/// holding the same letter, hypothesize `word` running perpendicular to the
/// placed word with that letter on that cell, and keep it if [`can_place`]
/// agrees. The order matters: [`find_best_placement`] breaks full ties in
/// favour of whatever this yields first.
pub fn legal_placements<'a>(
    grid: &'a WorkingGrid,
    word: &'a str,
    placed: &'a [PlacedWord],
) -> impl Iterator<Item = Placement> + 'a {
    let letters = word.as_bytes();
    placed.iter().flat_map(move |pw| {
        let direction = pw.direction.perpendicular();
        pw.answer
            .bytes()
            .zip(pw.cells.iter())
            .flat_map(move |(placed_letter, cell)| {
                letters
                    .iter()
                    .enumerate()
                    .filter(move |&(_, &letter)| letter == placed_letter)
                    .filter_map(move |(wi, _)| {
                        let (x, y) = match direction {
                            Direction::Across => (cell.x as isize - wi as isize, cell.y as isize),
                            Direction::Down => (cell.x as isize, cell.y as isize - wi as isize),
                        };
                        if !can_place(grid, letters, x, y, direction) {
                            return None;
                        }
                        Some(Placement {
                            x: x as usize,
                            y: y as usize,
                            direction,
                            intersections: count_intersections(grid, letters, x, y, direction),
                        })
                    })
            })
    })
}

/// The best legal placement of `word` against everything placed so far, or
/// `None` if it cannot cross anything legally.
///
/// # Behavior:
/// 1. Walk [`legal_placements`] in order.
/// 2. Keep a candidate only if it strictly [`beats`](Placement::beats) the
///    one held so far, so on a full tie the earliest stays.
#[must_use]
pub fn find_best_placement(
    grid: &WorkingGrid,
    word: &str,
    placed: &[PlacedWord],
) -> Option<Placement> {
    let size = grid.size();
    legal_placements(grid, word, placed).fold(None, |best: Option<Placement>, candidate| {
        match best {
            Some(b) if !candidate.beats(&b, size) => Some(b),
            _ => Some(candidate),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize_entry, RawEntry};

    fn place(
        grid: &mut WorkingGrid,
        placed: &mut Vec<PlacedWord>,
        answer: &str,
        start: Position,
        direction: Direction,
    ) {
        let entry = normalize_entry(&RawEntry::new(answer, "clue", answer)).unwrap();
        let cells = grid.write_word(answer, start, direction);
        placed.push(PlacedWord::new(&entry, direction, cells));
    }

    #[test]
    fn test_seed_placement_is_centred() {
        let grid = WorkingGrid::new(15);
        let p = seed_placement(&grid, "NEUTRON").unwrap();
        assert_eq!((p.x, p.y, p.direction), (4, 7, Direction::Across));
        assert!(seed_placement(&grid, &"A".repeat(16)).is_none());
    }

    #[test]
    fn test_crossing_is_perpendicular() {
        let mut grid = WorkingGrid::new(15);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "GAMMA", Position::new(5, 7), Direction::Across);

        let best = find_best_placement(&grid, "BETA", &placed).unwrap();
        assert_eq!(best.direction, Direction::Down);
        assert_eq!(best.intersections, 1);
        // BETA's A lands on one of GAMMA's two A's, in row 7
        assert_eq!(best.y + 3, 7);
        assert!(best.x == 6 || best.x == 9);
    }

    #[test]
    fn test_centre_breaks_ties() {
        let mut grid = WorkingGrid::new(15);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "GAMMA", Position::new(5, 7), Direction::Across);

        // anchors (6, 4) and (9, 4): distances |12-15|+|8-15| = 10 and |18-15|+7 = 10.
        // Equal, so the first found (the A at column 6) wins.
        let best = find_best_placement(&grid, "BETA", &placed).unwrap();
        assert_eq!((best.x, best.y), (6, 4));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut grid = WorkingGrid::new(5);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "CAT", Position::new(1, 0), Direction::Across);
        // OCTAL down through the C would start above the grid
        assert!(!can_place(&grid, b"OCTAL", 1, -1, Direction::Down));
        assert!(can_place(&grid, b"TACO", 3, 0, Direction::Down));
        // TACOS ends on the last row exactly; TRACKS runs one past it
        assert!(can_place(&grid, b"TACOS", 3, 0, Direction::Down));
        assert!(!can_place(&grid, b"TRACKS", 3, 0, Direction::Down));
        // and across, CATS from the C would run off the right edge of a 4 grid
        let mut small = WorkingGrid::new(4);
        let mut small_placed = Vec::new();
        place(&mut small, &mut small_placed, "SAC", Position::new(1, 0), Direction::Down);
        assert!(can_place(&small, b"CAT", 1, 2, Direction::Across));
        assert!(!can_place(&small, b"CATS", 1, 2, Direction::Across));
    }

    #[test]
    fn test_cell_after_word_must_be_empty() {
        let mut grid = WorkingGrid::new(9);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "BEAM", Position::new(2, 4), Direction::Across);
        place(&mut grid, &mut placed, "TEN", Position::new(1, 7), Direction::Across);

        assert!(can_place(&grid, b"ABE", 2, 3, Direction::Down));
        // ABET would end at (2, 6), right on top of TEN's E
        assert!(!can_place(&grid, b"ABET", 2, 3, Direction::Down));
    }

    #[test]
    fn test_cell_before_word_must_be_empty() {
        let mut grid = WorkingGrid::new(9);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "BEAM", Position::new(2, 4), Direction::Across);
        place(&mut grid, &mut placed, "BOX", Position::new(0, 2), Direction::Across);

        // ABE would start at (2, 3), directly below the X at (2, 2)
        assert!(!can_place(&grid, b"ABE", 2, 3, Direction::Down));
    }

    #[test]
    fn test_side_neighbours_must_be_empty() {
        let mut grid = WorkingGrid::new(9);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "BEAM", Position::new(2, 4), Direction::Across);
        assert!(can_place(&grid, b"HEN", 3, 3, Direction::Down));
        place(&mut grid, &mut placed, "HEN", Position::new(3, 3), Direction::Down);

        // ABE's A at (2, 3) would sit beside HEN's H
        assert!(!can_place(&grid, b"ABE", 2, 3, Direction::Down));
    }

    #[test]
    fn test_letter_clash_rejected() {
        let mut grid = WorkingGrid::new(9);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "BETA", Position::new(2, 4), Direction::Across);
        // DEBT down through the E at (3, 4)
        assert!(can_place(&grid, b"DEBT", 3, 3, Direction::Down));
        // DOT down starting at (3, 3) would put O on the E
        assert!(!can_place(&grid, b"DOT", 3, 3, Direction::Down));
    }

    #[test]
    fn test_no_crossing_rejected() {
        let mut grid = WorkingGrid::new(9);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "BETA", Position::new(0, 0), Direction::Across);
        assert!(!can_place(&grid, b"LINAC", 2, 4, Direction::Across));
        assert!(find_best_placement(&grid, "XYZ", &placed).is_none());
    }

    #[test]
    fn test_more_intersections_preferred() {
        let mut grid = WorkingGrid::new(15);
        let mut placed = Vec::new();
        place(&mut grid, &mut placed, "CAT", Position::new(3, 2), Direction::Down);
        place(&mut grid, &mut placed, "DOG", Position::new(7, 2), Direction::Down);
        // across row 2, CRAWD picks up the C of CAT and the D of DOG
        let best = find_best_placement(&grid, "CRAWD", &placed).unwrap();
        assert_eq!(best.intersections, 2);
        assert_eq!((best.x, best.y, best.direction), (3, 2, Direction::Across));
        assert_eq!(count_intersections(&grid, b"CRAWD", 3, 2, Direction::Across), 2);
    }

    #[test]
    fn test_doubled_centre_distance() {
        let p = Placement { x: 7, y: 7, direction: Direction::Across, intersections: 0 };
        assert_eq!(p.doubled_centre_distance(15), 2);
        let q = Placement { x: 0, y: 0, direction: Direction::Down, intersections: 0 };
        assert_eq!(q.doubled_centre_distance(15), 30);
    }
}
