//! Example analyzing puzzles and printing their solving paths.
//!
//! Puzzles are given as 81-character lines (`.` or `0` for empty cells),
//! either as arguments or on standard input, one per line.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example analyze_puzzle -- \
//!     53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79
//! ```
//!
//! Rate a batch of puzzles in parallel and print one line per puzzle:
//!
//! ```sh
//! cargo run --release --example analyze_puzzle -- --summary < puzzles.txt
//! ```
//!
//! Set `RUST_LOG=debug` to trace every applied step.

use std::{
    io::{self, BufRead as _},
    process,
    str::FromStr as _,
};

use clap::Parser;
use rayon::prelude::*;
use stepwise_analytics::{Analyzer, AnalyzerConfig, AnalyzerResult};
use stepwise_core::Grid;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzles to analyze. Reads standard input when omitted.
    #[arg(value_name = "PUZZLE")]
    puzzles: Vec<String>,

    /// Apply every step a searcher finds in one pass.
    #[arg(long)]
    full_applying: bool,

    /// Skip searchers marked slow.
    #[arg(long)]
    ignore_slow: bool,

    /// Skip searchers marked high-allocation, such as chains.
    #[arg(long)]
    ignore_high_allocation: bool,

    /// Print one rating line per puzzle instead of the full report.
    #[arg(short, long)]
    summary: bool,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let lines = if args.puzzles.is_empty() {
        match io::stdin().lock().lines().collect::<Result<Vec<_>, _>>() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("Failed to read standard input: {e}");
                process::exit(1);
            }
        }
    } else {
        args.puzzles.clone()
    };

    let mut puzzles = vec![];
    for line in lines.iter().map(|line| line.trim()).filter(|line| !line.is_empty()) {
        match Grid::from_str(line) {
            Ok(grid) => puzzles.push(grid),
            Err(e) => {
                eprintln!("Invalid puzzle {line:?}: {e}");
                process::exit(2);
            }
        }
    }

    let analyzer = Analyzer::from_config(AnalyzerConfig {
        full_applying: args.full_applying,
        ignore_slow_algorithms: args.ignore_slow,
        ignore_high_allocation_algorithms: args.ignore_high_allocation,
        custom_step_searchers: None,
    });

    let results = puzzles
        .par_iter()
        .map(|puzzle| analyzer.analyze(puzzle))
        .collect::<Vec<_>>();

    let mut solved = 0;
    for result in &results {
        match result {
            Ok(result) if args.summary => print_summary(result),
            Ok(result) => println!("{result}\n"),
            Err(e) => println!("{e}"),
        }
        if result.as_ref().is_ok_and(AnalyzerResult::is_solved) {
            solved += 1;
        }
    }
    if args.summary {
        eprintln!("{solved}/{} solved", results.len());
    }
}

fn print_summary(result: &AnalyzerResult) {
    let outcome = match result.failed_reason() {
        Some(reason) => reason.to_string(),
        None => format!("{} steps", result.steps_count()),
    };
    println!(
        "{}  {}/{}/{}  {:<10} {outcome}",
        result.puzzle(),
        result.max_difficulty(),
        result.pearl_difficulty(),
        result.diamond_difficulty(),
        result.difficulty_level().to_string(),
    );
}
