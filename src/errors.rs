//! Error types for crossword generation and clue-bank loading.
//!
//! # Error Codes
//!
//! Each error variant has a unique code for documentation lookup:
//!
//! - G001: `InsufficientInput` (Too few usable entries after normalization)
//! - G002: `Unsolvable` (Too few words could be placed across all attempts)
//! - G003: `InvalidConfig` (Self-contradictory generator configuration)
//! - C001: `Io` (Clue bank could not be read)
//! - C002: `Empty` (Clue bank contained no usable clues)
//!
//! # Examples
//!
//! ```
//! use qajaq::errors::GenerateError;
//! use qajaq::normalize::RawEntry;
//!
//! let entries = vec![RawEntry::new("cat", "Feline", "q1")];
//! match qajaq::generate_seeded(&entries, 7) {
//!     Err(e @ GenerateError::InsufficientInput { .. }) => {
//!         println!("{}", e.display_detailed());
//!         assert_eq!(e.code(), "G001");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use std::path::PathBuf;

/// Recoverable outcomes of a generation request.
///
/// Both `InsufficientInput` and `Unsolvable` are normal operating conditions
/// (small topic pools, short answers, poor letter overlap) and mean
/// "try different input", not "something is broken".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("insufficient input: {valid} usable entries, at least {required} required")]
    InsufficientInput { valid: usize, required: usize },

    #[error("unsolvable: placed at most {placed} words, at least {required} required")]
    Unsolvable { placed: usize, required: usize },

    #[error("invalid generator configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GenerateError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::InsufficientInput { .. } => "G001",
            GenerateError::Unsolvable { .. } => "G002",
            GenerateError::InvalidConfig { .. } => "G003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GenerateError::InsufficientInput { .. } => "Too few usable entries after normalization",
            GenerateError::Unsolvable { .. } => "Too few words could be placed across all attempts",
            GenerateError::InvalidConfig { .. } => "Self-contradictory generator configuration",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GenerateError::InsufficientInput { .. } => "Answers are uppercased and stripped of everything but A-Z, then entries shorter than 3 or longer than 15 letters are dropped. Generation needs at least 6 entries to survive this step, so placement was never attempted.",
            GenerateError::Unsolvable { .. } => "Every attempt was run, but none managed to interlock enough words. This usually means the answers share too few letters to cross each other.",
            GenerateError::InvalidConfig { .. } => "The generator configuration cannot produce a puzzle (for example, a minimum word count above the maximum, or a grid too small for any answer).",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerateError::InsufficientInput { .. } => Some("Supply more entries, or pick a broader category"),
            GenerateError::Unsolvable { .. } => Some("Try a different set of entries; answers with common letters (E, A, R, T) cross more easily"),
            GenerateError::InvalidConfig { .. } => Some("Check that min_words <= target_min <= target_max and grid_size >= 3"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Failures while loading a clue bank.
#[derive(Debug, thiserror::Error)]
pub enum ClueBankError {
    #[error("failed to read clue bank from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("clue bank '{origin}' contains no usable clues")]
    Empty { origin: String },
}

impl ClueBankError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ClueBankError::Io { .. } => "C001",
            ClueBankError::Empty { .. } => "C002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ClueBankError::Io { .. } => "Clue bank could not be read",
            ClueBankError::Empty { .. } => "Clue bank contained no usable clues",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ClueBankError::Io { .. } => "The clue bank file could not be opened or was not valid UTF-8.",
            ClueBankError::Empty { .. } => "Every line was blank, a comment, or malformed. Lines must look like `id;answer;clue` with an optional `;category`.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ClueBankError::Io { .. } => Some("Check the path passed with --clues"),
            ClueBankError::Empty { .. } => Some("Example line: cw-001;GRAY;SI unit of absorbed dose;Radiation Physics"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
