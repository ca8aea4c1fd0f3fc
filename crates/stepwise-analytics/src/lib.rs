//! Human-style step-by-step analysis of sudoku puzzles.
//!
//! An [`Analyzer`] runs a pool of [`StepSearcher`](searcher::StepSearcher)s
//! over a puzzle, applies one verified [`Step`] at a time and restarts from
//! the easiest searcher, until the puzzle is solved or no searcher makes
//! progress. The [`AnalyzerResult`] holds the solving path and its ratings.
//!
//! # Examples
//!
//! ```
//! use stepwise_analytics::{Analyzer, CancellationToken};
//! use stepwise_core::Grid;
//!
//! let puzzle: Grid = "\
//!     4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......"
//!     .parse()?;
//! let token = CancellationToken::new();
//! let result = Analyzer::new()
//!     .with_ignore_high_allocation_algorithms(true)
//!     .analyze_with(&puzzle, |progress| assert!(progress <= 1.0), &token)?;
//! if let Some(reason) = result.failed_reason() {
//!     println!("stopped after {} steps: {reason}", result.steps_count());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{analyzer::*, context::*, error::*, result::*, step::*, technique::*};

mod analyzer;
mod context;
mod error;
mod result;
pub mod searcher;
mod step;
mod technique;

#[cfg(test)]
mod testing;
