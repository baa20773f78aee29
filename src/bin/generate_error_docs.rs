//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `GenerateError` and `ClueBankError` implementations via
//! their `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;
use std::io;
use std::path::PathBuf;

use qajaq::errors::{ClueBankError, GenerateError};

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($out:expr, $errors:expr) => {
        for error in $errors {
            let _ = writeln!($out, "### {}: {}\n", error.code(), error.description());
            let _ = writeln!($out, "**Details:** {}\n", error.details());

            if let Some(help_text) = error.help() {
                let _ = writeln!($out, "**How to fix:**");
                let _ = writeln!($out, "```\n{}\n```\n", help_text);
            }

            let _ = writeln!($out, "**Example error message:**");
            let _ = writeln!($out, "```\n{}\n```\n", error);

            let _ = writeln!($out, "**Detailed format:**");
            let _ = writeln!($out, "```\n{}\n```\n", error.display_detailed());

            let _ = writeln!($out, "---\n");
        }
    };
}

/// Helper to create all `GenerateError` variants for documentation
fn all_generate_error_variants() -> Vec<GenerateError> {
    vec![
        GenerateError::InsufficientInput { valid: 4, required: 6 },
        GenerateError::Unsolvable { placed: 3, required: 6 },
        GenerateError::InvalidConfig { reason: "min_words 13 exceeds target_max 12".to_string() },
    ]
}

/// Helper to create all `ClueBankError` variants for documentation
fn all_clue_bank_error_variants() -> Vec<ClueBankError> {
    vec![
        ClueBankError::Io {
            path: PathBuf::from("data/clues.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        },
        ClueBankError::Empty { origin: "data/clues.txt".to_string() },
    ]
}

fn render_docs() -> String {
    // NB: writing to a String never fails
    let mut out = String::new();
    let _ = writeln!(out, "# Error Code Reference\n");
    let _ = writeln!(out, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    let _ = writeln!(out, "## Table of Contents\n");
    let _ = writeln!(out, "- [Generation Errors (G001–G003)](#generation-errors)");
    let _ = writeln!(out, "- [Clue Bank Errors (C001–C002)](#clue-bank-errors)\n");

    let _ = writeln!(out, "## Generation Errors\n");
    let _ = writeln!(out, "Returned by `generate` and friends. G001 and G002 mean \"try different input\"; they are expected outcomes, not faults.\n");
    generate_error_docs!(out, all_generate_error_variants());

    let _ = writeln!(out, "## Clue Bank Errors\n");
    let _ = writeln!(out, "Returned when loading a clue bank file from disk.\n");
    generate_error_docs!(out, all_clue_bank_error_variants());

    out
}

fn main() {
    print!("{}", render_docs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented() {
        let docs = render_docs();
        for code in ["G001", "G002", "G003", "C001", "C002"] {
            assert!(docs.contains(&format!("### {code}:")), "missing section for {code}");
        }
    }

    #[test]
    fn test_help_text_included() {
        let docs = render_docs();
        let help = GenerateError::Unsolvable { placed: 0, required: 6 }.help().unwrap();
        assert!(docs.contains(help));
    }
}
