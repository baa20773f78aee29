//! Plain-text rendering of a finished puzzle, for the CLI and for debugging.

use std::fmt::{self, Write};

use crate::finalize::{CrosswordPuzzle, CrosswordWord};

const BLOCK: char = '#';

fn write_clues(f: &mut impl Write, heading: &str, words: &[&CrosswordWord]) -> fmt::Result {
    writeln!(f, "{heading}")?;
    for w in words {
        writeln!(f, "{}. {} ({})", w.index, w.clue, w.len())?;
    }
    Ok(())
}

impl CrosswordPuzzle {
    /// The solution grid, one line per row, `#` for blocks.
    #[must_use]
    pub fn render_solution(&self) -> String {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map_or(BLOCK, |c| c.letter))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// An unsolved grid: three columns per cell, `###` for blocks, the clue
    /// number for cells where a word starts and `.` for other letter cells.
    #[must_use]
    pub fn render_blank(&self) -> String {
        let mut out = String::new();
        for (y, row) in self.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                // NB: writing to a String never fails
                let _ = match (cell, self.number_at(x, y)) {
                    (None, _) => write!(out, "{}", BLOCK.to_string().repeat(3)),
                    (Some(_), Some(n)) => write!(out, "{n:>3}"),
                    (Some(_), None) => write!(out, "{:>3}", '.'),
                };
            }
            out.push('\n');
        }
        out
    }

    /// Across and down clue lists, ordered by number.
    #[must_use]
    pub fn render_clues(&self) -> String {
        let mut out = String::new();
        let _ = write_clues(&mut out, "ACROSS", &self.across());
        out.push('\n');
        let _ = write_clues(&mut out, "DOWN", &self.down());
        out
    }
}

impl fmt::Display for CrosswordPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.render_solution())?;
        writeln!(f)?;
        write!(f, "{}", self.render_clues())
    }
}
