//! Crossword construction: turn (answer, clue) pairs into a numbered,
//! cropped grid of interlocking words.
//!
//! The pipeline is normalize → (shuffle, greedy solve) × attempts → finalize.
//! See [`generate`] for the main entry point.

pub mod clue_bank;
pub mod daily_seed;
pub mod errors;
pub mod finalize;
pub mod generator;
pub mod grid;
pub mod log;
pub mod normalize;
pub mod placement;
mod render;
pub mod solver;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use errors::GenerateError;
pub use finalize::{Coord, CrosswordCell, CrosswordPuzzle, CrosswordWord};
pub use generator::{
    generate, generate_from_candidates, generate_random, generate_seeded, generate_with_config,
    GeneratorConfig,
};
pub use grid::Direction;
pub use normalize::RawEntry;
