//! Integration tests for the qajaq crossword generator.
//!
//! These tests drive the public pipeline end to end (clue bank → normalize →
//! generate → finalized puzzle) and check every puzzle against structural
//! properties computed independently of the generator's own bookkeeping.

use std::collections::{BTreeSet, HashMap, VecDeque};

use qajaq::clue_bank::{unique_answers, ClueBank};
use qajaq::errors::{ClueBankError, GenerateError};
use qajaq::finalize::{finalize, PADDING};
use qajaq::grid::GRID_SIZE;
use qajaq::normalize::{clean_answer, normalize, CandidateEntry, RawEntry};
use qajaq::solver::solve_attempt;
use qajaq::{
    generate, generate_seeded, generate_with_config, CrosswordPuzzle, Direction, GeneratorConfig,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const FIXTURE: &str = "tests/fixtures/clues.txt";

const PHYSICS: [&str; 15] = [
    "gray", "gamma", "neutron", "xray", "alpha", "beta", "sievert", "cobalt",
    "linac", "bolus", "wedge", "output", "grid", "filter", "imrt",
];

/// Helper to turn bare answers into entries with throwaway clues
fn entries(answers: &[&str]) -> Vec<RawEntry> {
    answers
        .iter()
        .enumerate()
        .map(|(i, a)| RawEntry::new(*a, format!("clue for {a}"), format!("src-{i}")))
        .collect()
}

fn load_fixture() -> ClueBank {
    ClueBank::load_from_path(FIXTURE).expect("Failed to load fixture clue bank")
}

/// Letter at `(x, y)` of the finished grid.
fn letter_at(puzzle: &CrosswordPuzzle, x: usize, y: usize) -> Option<char> {
    puzzle.cell(x, y).map(|c| c.letter)
}

/// Every structural property a finished puzzle must satisfy.
fn assert_well_formed(puzzle: &CrosswordPuzzle) {
    assert_eq!(puzzle.grid.len(), puzzle.height);
    assert!(puzzle.grid.iter().all(|row| row.len() == puzzle.width));
    assert!(puzzle.width <= 15 && puzzle.height <= 15);

    // each word's cells spell its answer in a straight run
    for word in &puzzle.words {
        assert_eq!(word.cells.len(), word.answer.len(), "{}", word.answer);
        assert_eq!((word.cells[0].x, word.cells[0].y), (word.start_x, word.start_y));
        let (dx, dy) = match word.direction {
            Direction::Across => (1, 0),
            Direction::Down => (0, 1),
        };
        for (i, (cell, ch)) in word.cells.iter().zip(word.answer.chars()).enumerate() {
            assert_eq!((cell.x, cell.y), (word.start_x + dx * i, word.start_y + dy * i));
            assert_eq!(letter_at(puzzle, cell.x, cell.y), Some(ch), "{} at {i}", word.answer);
        }
    }

    // every letter cell belongs to a word and its indices are right
    for (y, row) in puzzle.grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let Some(cell) = cell else { continue };
            assert_eq!((cell.x, cell.y), (x, y));
            assert!(!cell.word_indices.is_empty(), "orphan letter at ({x}, {y})");
            for &wi in &cell.word_indices {
                let word = &puzzle.words[wi];
                assert!(word.cells.iter().any(|c| c.x == x && c.y == y));
            }
        }
    }

    assert_no_accidental_words(puzzle);
    assert_connected(puzzle);
    assert_padding(puzzle);
    assert_numbering(puzzle);
}

/// Two letters side by side must belong to one word running that way;
/// anything else would read as an unclued word.
fn assert_no_accidental_words(puzzle: &CrosswordPuzzle) {
    let runs_through = |x: usize, y: usize, direction: Direction| {
        puzzle
            .words
            .iter()
            .filter(|w| w.direction == direction && w.cells.iter().any(|c| c.x == x && c.y == y))
            .map(|w| w.start_x * 100 + w.start_y)
            .collect::<BTreeSet<_>>()
    };

    for y in 0..puzzle.height {
        for x in 0..puzzle.width {
            if letter_at(puzzle, x, y).is_none() {
                continue;
            }
            if letter_at(puzzle, x + 1, y).is_some() {
                let shared = runs_through(x, y, Direction::Across)
                    .intersection(&runs_through(x + 1, y, Direction::Across))
                    .count();
                assert_eq!(shared, 1, "unclued across pair at ({x}, {y})");
            }
            if letter_at(puzzle, x, y + 1).is_some() {
                let shared = runs_through(x, y, Direction::Down)
                    .intersection(&runs_through(x, y + 1, Direction::Down))
                    .count();
                assert_eq!(shared, 1, "unclued down pair at ({x}, {y})");
            }
        }
    }
}

/// All words form one component when crossings are edges.
fn assert_connected(puzzle: &CrosswordPuzzle) {
    let mut seen = vec![false; puzzle.words.len()];
    let mut queue = VecDeque::from([0usize]);
    seen[0] = true;
    while let Some(wi) = queue.pop_front() {
        for c in &puzzle.words[wi].cells {
            let Some(cell) = puzzle.cell(c.x, c.y) else { continue };
            for &other in &cell.word_indices {
                if !seen[other] {
                    seen[other] = true;
                    queue.push_back(other);
                }
            }
        }
    }
    assert!(seen.iter().all(|&s| s), "puzzle is not connected");
}

/// Margins around the letters, as (left, top, right, bottom).
fn margins(puzzle: &CrosswordPuzzle) -> (usize, usize, usize, usize) {
    let cells = || puzzle.words.iter().flat_map(|w| w.cells.iter());
    let min_x = cells().map(|c| c.x).min().unwrap();
    let max_x = cells().map(|c| c.x).max().unwrap();
    let min_y = cells().map(|c| c.y).min().unwrap();
    let max_y = cells().map(|c| c.y).max().unwrap();
    (min_x, min_y, puzzle.width - 1 - max_x, puzzle.height - 1 - max_y)
}

/// Each margin is `PADDING`, or 0 where the working grid's edge clipped the
/// crop. A side can only be clipped if the letters touch that edge of the
/// working grid, so both sides of one axis at 0 means the letters span it.
///
/// Without the working-grid frame this is as tight as the output allows;
/// `padding::test_padding_is_exact_unless_clamped` checks against the frame.
fn assert_padding(puzzle: &CrosswordPuzzle) {
    let (left, top, right, bottom) = margins(puzzle);
    for m in [left, top, right, bottom] {
        assert!(m == PADDING || m == 0, "margin {m}");
    }
    if left == 0 && right == 0 {
        assert_eq!(puzzle.width, GRID_SIZE);
    }
    if top == 0 && bottom == 0 {
        assert_eq!(puzzle.height, GRID_SIZE);
    }
}

/// Numbers run 1..=n over distinct start cells in reading order; two words
/// share a number only when they are an across/down pair on one start cell.
fn assert_numbering(puzzle: &CrosswordPuzzle) {
    let mut by_number: HashMap<usize, Vec<(usize, usize, Direction)>> = HashMap::new();
    for w in &puzzle.words {
        by_number.entry(w.index).or_default().push((w.start_x, w.start_y, w.direction));
    }

    let n = by_number.len();
    let numbers: BTreeSet<usize> = by_number.keys().copied().collect();
    assert_eq!(numbers, (1..=n).collect::<BTreeSet<_>>(), "numbers have gaps");

    let mut starts: Vec<(usize, usize)> = Vec::new();
    for number in 1..=n {
        let group = &by_number[&number];
        assert!(group.len() <= 2);
        assert!(group.iter().all(|&(x, y, _)| (x, y) == (group[0].0, group[0].1)));
        if group.len() == 2 {
            assert_ne!(group[0].2, group[1].2, "two words in one direction share number {number}");
        }
        starts.push((group[0].1, group[0].0));
    }
    assert!(starts.windows(2).all(|w| w[0] < w[1]), "numbers are not in reading order");
}

#[cfg(test)]
mod generation {
    use super::*;

    #[test]
    fn test_happy_path_is_well_formed() {
        let input = entries(&PHYSICS);
        for seed in 0..20 {
            let puzzle = generate_seeded(&input, seed).unwrap();
            assert!(puzzle.words.len() >= 6, "seed {seed}: {} words", puzzle.words.len());
            assert!(puzzle.words.len() <= 12, "seed {seed}: {} words", puzzle.words.len());
            assert_well_formed(&puzzle);
        }
    }

    #[test]
    fn test_usually_reaches_target() {
        let input = entries(&PHYSICS);
        let hits = (0..20)
            .filter(|&seed| generate_seeded(&input, seed).unwrap().words.len() >= 8)
            .count();
        assert!(hits >= 18, "only {hits}/20 seeds placed 8+ words");
    }

    #[test]
    fn test_words_come_from_input() {
        let input = entries(&PHYSICS);
        let puzzle = generate_seeded(&input, 11).unwrap();
        for word in &puzzle.words {
            let source = input.iter().find(|e| e.source_id == word.source_id).unwrap();
            assert_eq!(word.answer, clean_answer(&source.answer));
            assert_eq!(word.clue, source.clue);
        }
        let ids: BTreeSet<&str> = puzzle.words.iter().map(|w| w.source_id.as_str()).collect();
        assert_eq!(ids.len(), puzzle.words.len(), "an entry was used twice");
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let input = entries(&PHYSICS);
        assert_eq!(generate_seeded(&input, 42).unwrap(), generate_seeded(&input, 42).unwrap());
    }

    #[test]
    fn test_caller_rng_is_used() {
        let input = entries(&PHYSICS);
        let a = generate(&input, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate_seeded(&input, 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_input_order_does_not_matter_for_validity() {
        let mut reversed = PHYSICS;
        reversed.reverse();
        let puzzle = generate_seeded(&entries(&reversed), 5).unwrap();
        assert_well_formed(&puzzle);
    }

    #[test]
    fn test_custom_target_max() {
        let config = GeneratorConfig { target_min: 6, target_max: 6, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(3);
        let puzzle = generate_with_config(&entries(&PHYSICS), &config, &mut rng).unwrap();
        assert_eq!(puzzle.words.len(), 6);
        assert_well_formed(&puzzle);
    }
}

#[cfg(test)]
mod failures {
    use super::*;

    #[test]
    fn test_too_few_entries() {
        let err = generate_seeded(&entries(&["gray", "gamma", "alpha", "beta"]), 1).unwrap_err();
        assert_eq!(err, GenerateError::InsufficientInput { valid: 4, required: 6 });
        assert_eq!(err.code(), "G001");
    }

    #[test]
    fn test_invalid_answers_are_not_counted() {
        // two, sixteen and non-letter answers all drop out
        let input = entries(&[
            "ct", "abcdefghijklmnop", "123", "--", "gray", "gamma", "alpha", "beta", "linac",
        ]);
        let err = generate_seeded(&input, 1).unwrap_err();
        assert_eq!(err, GenerateError::InsufficientInput { valid: 5, required: 6 });
    }

    #[test]
    fn test_no_shared_letters_is_unsolvable() {
        let disjoint = ["abc", "def", "ghi", "jkl", "mno", "pqr", "stu", "vwx"];
        let err = generate_seeded(&entries(&disjoint), 1).unwrap_err();
        assert_eq!(err, GenerateError::Unsolvable { placed: 1, required: 6 });
        assert_eq!(err.code(), "G002");
        assert!(err.help().is_some());
    }

    #[test]
    fn test_bad_config_is_rejected() {
        let config = GeneratorConfig { max_attempts: 0, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate_with_config(&entries(&PHYSICS), &config, &mut rng).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidConfig { .. }));
    }
}

#[cfg(test)]
mod normalization {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = entries(&["x-ray", "Gamma Knife", "béta", "co60", "ok"]);
        let once = normalize(&raw);
        let again: Vec<RawEntry> = once.iter().map(RawEntry::from).collect();
        let twice = normalize(&again);
        assert_eq!(once, twice);
        let answers: Vec<&str> = once.iter().map(|c| c.answer()).collect();
        // accented letters drop out; "co60" and "ok" end up too short
        assert_eq!(answers, vec!["XRAY", "GAMMAKNIFE", "BTA"]);
    }
}

#[cfg(test)]
mod clue_bank {
    use super::*;

    #[test]
    fn test_fixture_parses() {
        let bank = load_fixture();
        // blank, unseparated and answerless lines are skipped
        assert_eq!(bank.len(), 17);
        assert_eq!(bank.categories(), vec!["Physics", "Protection", "Therapy", "Imaging"]);

        let bolus = bank.clues.iter().find(|c| c.id == "t-10").unwrap();
        assert_eq!(bolus.clue, "Tissue-equivalent material; placed on skin");
        assert_eq!(bolus.category.as_deref(), Some("Therapy"));

        let pet = bank.clues.iter().find(|c| c.id == "t-18").unwrap();
        assert_eq!(pet.category, None);
    }

    #[test]
    fn test_fixture_generates() {
        let bank = load_fixture();
        let input = bank.to_raw_entries();
        assert_eq!(normalize(&input).len(), 16);
        let puzzle = generate_seeded(&input, 2024).unwrap();
        assert_well_formed(&puzzle);
        assert!(puzzle.words.iter().all(|w| w.source_id.starts_with("t-")));
    }

    #[test]
    fn test_select_by_category() {
        let bank = load_fixture();
        let mut rng = StdRng::seed_from_u64(4);
        let therapy = bank.select(Some("Therapy"), 100, &mut rng);
        assert_eq!(therapy.len(), 6);
        assert!(therapy.iter().all(|c| c.category.as_deref() == Some("Therapy")));
        assert_eq!(bank.select(Some("all"), 5, &mut rng).len(), 5);
        assert!(bank.select(Some("Chemistry"), 5, &mut rng).is_empty());
    }

    #[test]
    fn test_bundled_bank_pipeline() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/clues.txt");
        let bank = ClueBank::load_from_path(path).unwrap();
        assert!(bank.len() >= 100);
        let mut failed = 0;
        for seed in 0..300u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let input: Vec<RawEntry> =
                bank.select(None, 50, &mut rng).into_iter().map(RawEntry::from).collect();
            match generate(&input, &mut rng) {
                Ok(puzzle) => assert_well_formed(&puzzle),
                Err(GenerateError::Unsolvable { .. }) => failed += 1,
                Err(e) => panic!("seed {seed}: {e}"),
            }
        }
        assert!(failed <= 3, "{failed}/300 draws were unsolvable");
    }

    /// Identical answers of equal length can be stacked on the same cells, so
    /// banks with repeated answers must be deduplicated before generating.
    #[test]
    fn test_repeated_answers_are_never_stacked() {
        let mut text = String::new();
        for (i, answer) in PHYSICS.iter().enumerate() {
            text.push_str(&format!("a{i};{answer};first clue for {answer};Physics\n"));
            let upper = answer.to_uppercase();
            text.push_str(&format!("b{i};{upper};second clue for {answer};Physics\n"));
        }
        let bank = ClueBank::parse_from_str(&text);
        assert_eq!(bank.len(), 30);

        for seed in 0..100u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let input: Vec<RawEntry> =
                bank.select(None, 30, &mut rng).into_iter().map(RawEntry::from).collect();
            assert_eq!(input.len(), 15, "seed {seed}");
            let puzzle = generate(&input, &mut rng).unwrap();
            assert_well_formed(&puzzle);
            let answers: BTreeSet<&str> = puzzle.words.iter().map(|w| w.answer.as_str()).collect();
            assert_eq!(answers.len(), puzzle.words.len(), "seed {seed}");
        }

        let puzzle = generate_seeded(&bank.to_raw_entries(), 5).unwrap();
        assert_well_formed(&puzzle);
    }

    #[test]
    fn test_unique_answers_for_outside_entries() {
        let mut doubled = entries(&PHYSICS);
        doubled.extend(entries(&PHYSICS));
        let input = unique_answers(doubled);
        assert_eq!(input.len(), PHYSICS.len());
        for seed in 0..20 {
            assert_well_formed(&generate_seeded(&input, seed).unwrap());
        }
    }

    #[test]
    fn test_missing_file() {
        let err = ClueBank::load_from_path("tests/fixtures/does_not_exist.txt").unwrap_err();
        assert!(matches!(err, ClueBankError::Io { .. }));
        assert_eq!(err.code(), "C001");
    }
}

#[cfg(test)]
mod padding {
    use super::*;

    /// Placed-word bounds in working-grid coordinates: (min_x, min_y, max_x, max_y).
    fn tight_bounds(placed: &[qajaq::grid::PlacedWord]) -> (usize, usize, usize, usize) {
        let cells = || placed.iter().flat_map(|pw| pw.cells.iter());
        (
            cells().map(|p| p.x).min().unwrap(),
            cells().map(|p| p.y).min().unwrap(),
            cells().map(|p| p.x).max().unwrap(),
            cells().map(|p| p.y).max().unwrap(),
        )
    }

    fn check_orderings(answers: &[&str]) -> (usize, usize) {
        let candidates: Vec<CandidateEntry> = normalize(&entries(answers));
        let (mut clamped, mut unclamped) = (0, 0);
        for seed in 0..100u64 {
            let mut order = candidates.clone();
            order.shuffle(&mut StdRng::seed_from_u64(seed));
            order.sort_by(|a, b| b.len().cmp(&a.len()));

            let attempt = solve_attempt(&order, GRID_SIZE).unwrap();
            let (min_x, min_y, max_x, max_y) = tight_bounds(attempt.placed());
            let puzzle = finalize(attempt.grid(), attempt.placed());

            // a side keeps exactly PADDING unless the working grid ends first
            let expected = (
                PADDING.min(min_x),
                PADDING.min(min_y),
                PADDING.min(GRID_SIZE - 1 - max_x),
                PADDING.min(GRID_SIZE - 1 - max_y),
            );
            assert_eq!(margins(&puzzle), expected, "seed {seed}");
            assert_eq!(puzzle.width, max_x - min_x + 1 + expected.0 + expected.2);
            assert_eq!(puzzle.height, max_y - min_y + 1 + expected.1 + expected.3);

            for m in [expected.0, expected.1, expected.2, expected.3] {
                if m == PADDING {
                    unclamped += 1;
                } else {
                    clamped += 1;
                }
            }
        }
        (clamped, unclamped)
    }

    #[test]
    fn test_padding_is_exact_unless_clamped() {
        let (_, unclamped) = check_orderings(&PHYSICS);
        assert!(unclamped > 0);
    }

    #[test]
    fn test_padding_clamps_at_grid_edge() {
        // a fifteen-letter seed spans the whole width of the working grid
        let mut answers = vec!["electromagnetic"];
        answers.extend(PHYSICS);
        let (clamped, unclamped) = check_orderings(&answers);
        assert!(clamped >= 200, "both x sides clamp on every ordering");
        assert!(unclamped > 0);
    }
}
