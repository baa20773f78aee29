use std::process::ExitCode;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use qajaq::clue_bank::ClueBank;
use qajaq::daily_seed::seed_from_date;
use qajaq::errors::{ClueBankError, GenerateError};
use qajaq::generator::{self, GeneratorConfig};
use qajaq::normalize::RawEntry;

/// qajaq crossword generator
#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("QAJAQ_REVISION"), ")"))]
struct Cli {
    /// Path to the clue bank (id;answer;clue;category per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/clues.txt")
    )]
    clues: String,

    /// Only draw clues from this category ("all" for every category)
    #[arg(short = 'k', long)]
    category: Option<String>,

    /// Number of clues drawn from the bank before generating
    #[arg(short = 'n', long, default_value_t = 50)]
    limit: usize,

    /// Seed for clue selection and placement (random if omitted)
    #[arg(short, long, conflicts_with = "date")]
    seed: Option<u64>,

    /// Derive the seed from a date (YYYY-MM-DD), for a daily puzzle
    #[arg(short, long)]
    date: Option<String>,

    /// Print the puzzle as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print an unsolved grid with clue numbers instead of the solution
    #[arg(long, conflicts_with = "json")]
    blank: bool,

    /// List the categories in the clue bank and exit
    #[arg(long)]
    list_categories: bool,

    /// Side of the square working grid
    #[arg(long, default_value_t = qajaq::grid::GRID_SIZE)]
    grid_size: usize,

    /// Number of whole-puzzle attempts
    #[arg(long, default_value_t = generator::MAX_ATTEMPTS)]
    attempts: usize,

    /// Candidates considered per attempt
    #[arg(long, default_value_t = generator::CANDIDATE_POOL)]
    pool: usize,

    /// Stop retrying once an attempt places this many words
    #[arg(long, default_value_t = generator::TARGET_MIN)]
    target_min: usize,

    /// Keep at most this many words in the puzzle
    #[arg(long, default_value_t = generator::TARGET_MAX)]
    target_max: usize,

    /// Fail unless at least this many words can be placed
    #[arg(long, default_value_t = qajaq::normalize::MIN_ENTRIES)]
    min_words: usize,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            grid_size: self.grid_size,
            max_attempts: self.attempts,
            candidate_pool: self.pool,
            target_min: self.target_min,
            target_max: self.target_max,
            min_words: self.min_words,
        }
    }

    fn seed(&self) -> u64 {
        match (&self.seed, &self.date) {
            (Some(seed), _) => *seed,
            (None, Some(date)) => seed_from_date(date),
            (None, None) => rand::thread_rng().gen(),
        }
    }
}

/// Entry point of the qajaq CLI.
///
/// Delegates to [`try_main`], printing any error with its code and help
/// text before exiting with code 1.
fn main() -> ExitCode {

    // Set up logging
    qajaq::log::init_logger(qajaq::log::debug_from_env());

    if let Err(e) = try_main() {
        if let Some(gen_err) = e.downcast_ref::<GenerateError>() {
            eprintln!("Error: {}", gen_err.display_detailed());
        } else if let Some(bank_err) = e.downcast_ref::<ClueBankError>() {
            eprintln!("Error: {}", bank_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the qajaq CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the clue bank from disk.
/// 3. Draw `limit` clues (optionally from one category) and generate.
/// 4. Print the puzzle on stdout.
/// 5. Print timings and the seed on stderr so a run can be reproduced.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    // 1. Load the clue bank
    let t_load = Instant::now();
    let bank = ClueBank::load_from_path(&cli.clues)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    if cli.list_categories {
        for category in bank.categories() {
            println!("{category}");
        }
        return Ok(());
    }

    // 2. Select clues and generate
    let seed = cli.seed();
    log::debug!("using seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let entries: Vec<RawEntry> = bank
        .select(cli.category.as_deref(), cli.limit, &mut rng)
        .into_iter()
        .map(RawEntry::from)
        .collect();

    let t_gen = Instant::now();
    let puzzle = generator::generate_with_config(&entries, &config, &mut rng)?;
    let gen_secs = t_gen.elapsed().as_secs_f64();

    // 3. Print the puzzle
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&puzzle)?);
    } else if cli.blank {
        println!("{}", puzzle.render_blank());
        println!("{}", puzzle.render_clues());
    } else {
        println!("{puzzle}");
    }

    // 4. Diagnostics
    eprintln!(
        "Loaded {} clues in {:.3}s; drew {}; generated {}x{} with {} words in {:.3}s (seed {seed}).",
        bank.len(),
        load_secs,
        entries.len(),
        puzzle.width,
        puzzle.height,
        puzzle.words.len(),
        gen_secs,
    );

    Ok(())
}
