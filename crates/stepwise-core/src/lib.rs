//! Core data structures for human-style sudoku analysis.
//!
//! This crate provides the grid primitives shared by the chaining model and the
//! analyzer: digits, cells, candidates, the bit sets over each of them, houses,
//! and a candidate-aware [`Grid`] with uniqueness validation.
//!
//! # Overview
//!
//! - [`digit`]: [`Digit`] (1-9) and [`DigitSet`], a 9-bit digit mask
//! - [`cell`]: [`Cell`] (0-80, row-major) and [`CellSet`], an 81-bit cell set
//! - [`candidate`]: [`Candidate`] (`cell * 9 + digit`) and [`CandidateSet`],
//!   a 729-bit candidate set
//! - [`house`]: rows, columns and boxes
//! - [`grid`]: the puzzle grid with per-cell candidates
//! - [`conclusion`]: assignments and eliminations produced by deductions
//!
//! # Examples
//!
//! ```
//! use stepwise_core::{Cell, Digit, Grid};
//!
//! let mut grid = Grid::new();
//! grid.set_digit(Cell::new(4, 4), Digit::D5);
//!
//! // 5 is no longer a candidate in the same column
//! assert_eq!(grid.exists(Cell::new(0, 4), Digit::D5), Some(false));
//! // and the filled cell has no candidates at all
//! assert_eq!(grid.exists(Cell::new(4, 4), Digit::D5), None);
//! ```

mod backtrack;
pub mod candidate;
pub mod cell;
pub mod conclusion;
pub mod digit;
pub mod grid;
pub mod house;

pub use self::{
    candidate::{Candidate, CandidateSet},
    cell::{Cell, CellSet},
    conclusion::{Conclusion, ConclusionKind},
    digit::{Digit, DigitSet},
    grid::{CellState, Grid, ParseGridError, Validation},
    house::House,
};
