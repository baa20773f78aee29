//! `bench_local.rs` — quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing of crossword generation on *your* machine.
//! - Loads the clue bank once, then for each case draws clues with a fixed
//!   seed, generates several times and reports the median.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 20`
//! - Print the puzzles:              `cargo run --bin bench_local --release -- -p`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - I/O (printing) is kept outside the timed section.
//! - One warm-up run per case is done (not included in timing).

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use std::time::Instant;
use qajaq::clue_bank::ClueBank;
use qajaq::normalize::RawEntry;
use qajaq::{generate, CrosswordPuzzle};

/// Simple local benchmark runner: load the clue bank once, time several cases.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the clue bank (id;answer;clue;category per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/clues.txt")
    )]
    clues: String,

    /// Number of repeats per case (median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 5)]
    num_repeats: usize,

    /// Print the puzzle from the last run of each case
    #[arg(short = 'p', long = "print")]
    print: bool,
}

/// A benchmark case: which clues to draw and the seed for drawing/generating.
#[derive(Clone)]
struct Case {
    category: Option<&'static str>,
    limit: usize,
    seed: u64,
}

impl Case {
    fn name(&self) -> String {
        format!("{} x{} (seed {})", self.category.unwrap_or("all"), self.limit, self.seed)
    }
}

/// Edit/add new cases here.
fn get_cases() -> Vec<Case> {
    vec![
        Case { category: None, limit: 50, seed: 1 },
        Case { category: None, limit: 50, seed: 2 },
        Case { category: None, limit: 133, seed: 3 },
        Case { category: Some("Radiotherapy"), limit: 30, seed: 4 },
        Case { category: Some("Radiation Physics"), limit: 30, seed: 5 },
        Case { category: Some("Nuclear Medicine"), limit: 30, seed: 6 },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_NAME_LEN: usize = 36;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the benchmark summary: (case name, median ms, words in last puzzle, failures).
    type SummaryRow = (String, f64, Option<usize>, usize);

    let cli = Cli::parse();

    eprintln!("Loading clue bank from: {}", cli.clues);
    let t_load = Instant::now();
    let bank = ClueBank::load_from_path(&cli.clues)?;
    eprintln!("Loaded {} clues in {:.3}s", bank.len(), t_load.elapsed().as_secs_f64());

    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let name = case.name();
        eprintln!("\n[{:02}] {}", idx + 1, name);

        let mut rng = StdRng::seed_from_u64(case.seed);
        let entries: Vec<RawEntry> = bank
            .select(case.category, case.limit, &mut rng)
            .into_iter()
            .map(RawEntry::from)
            .collect();

        // warm-up, untimed
        let _warmup = generate(&entries, &mut StdRng::seed_from_u64(case.seed));

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut failures = 0;
        let mut last: Option<CrosswordPuzzle> = None;

        for rep in 0..cli.num_repeats {
            let mut run_rng = StdRng::seed_from_u64(case.seed.wrapping_add(rep as u64));
            let t_gen = Instant::now();
            let result = generate(black_box(&entries), &mut run_rng);
            let gen_ms = t_gen.elapsed().as_secs_f64() * 1000.0;
            times.push(gen_ms);

            match result {
                Ok(puzzle) => {
                    eprintln!(
                        "  run {:>2}/{:>2}: {:.3}ms ({} words, {}x{})",
                        rep + 1,
                        cli.num_repeats,
                        gen_ms,
                        puzzle.words.len(),
                        puzzle.width,
                        puzzle.height
                    );
                    last = Some(puzzle);
                }
                Err(e) => {
                    eprintln!(
                        "  run {:>2}/{:>2}: {:.3}ms ✗ {}",
                        rep + 1,
                        cli.num_repeats,
                        gen_ms,
                        e
                    );
                    failures += 1;
                }
            }
        }

        let med = median(times);

        if cli.print {
            if let Some(puzzle) = &last {
                println!("{puzzle}");
            }
        }

        eprintln!(
            "  → median {:.3}ms over {} run(s); {} {}",
            med,
            cli.num_repeats,
            failures,
            pluralizer(failures, "failure".into(), None)
        );
        summary.push((name, med, last.map(|p| p.words.len()), failures));
    }

    eprintln!("\n==== Summary ====");
    eprintln!(
        "{:<MAX_NAME_LEN$} | {:>11} | {:>7} | {:>8}",
        "case", "median (ms)", "# words", "failures"
    );
    eprintln!("{:-<MAX_NAME_LEN$}-+-{:-<11}-+-{:-<7}-+-{:-<8}", "", "", "", "");
    for (name, med, words, failures) in &summary {
        let words_str = words.map_or_else(|| "—".to_string(), |w| w.to_string());
        eprintln!("{name:<MAX_NAME_LEN$} | {med:>11.3} | {words_str:>7} | {failures:>8}");
    }

    Ok(())
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}
