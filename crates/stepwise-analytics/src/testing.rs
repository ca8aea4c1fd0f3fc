//! Test utilities for step searchers.
//!
//! [`SearcherTester`] runs a searcher on a grid, applies the step it finds and
//! checks the outcome with fluent assertions.
//!
//! ```ignore
//! SearcherTester::from_str(PUZZLE)
//!     .find_step(&Singles::new())
//!     .assert_technique(Technique::NakedSingle)
//!     .assert_placed(Cell::new(4, 4), Digit::D5);
//! ```

use std::str::FromStr as _;

use stepwise_core::{Cell, Conclusion, Digit, DigitSet, Grid};

use crate::{AnalysisContext, BoxedStep, LookupCache, Technique, searcher::StepSearcher};

/// A test harness for step searchers.
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the calling test.
#[derive(Debug)]
pub struct SearcherTester {
    initial: Grid,
    current: Grid,
    step: Option<BoxedStep>,
}

impl SearcherTester {
    /// Creates a tester from a grid.
    pub fn new(initial: Grid) -> Self {
        let current = initial.clone();
        Self {
            initial,
            current,
            step: None,
        }
    }

    /// Creates a tester from a grid string.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid grid.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        Self::new(Grid::from_str(s).unwrap())
    }

    /// Removes candidates before searching, both from the initial grid and
    /// the current one.
    #[track_caller]
    pub fn eliminate(mut self, cells: impl IntoIterator<Item = Cell>, digit: Digit) -> Self {
        for cell in cells {
            self.initial.eliminate(cell, digit);
            self.current.eliminate(cell, digit);
        }
        self
    }

    /// Keeps only `digits` as candidates of `cell`.
    #[track_caller]
    pub fn restrict(mut self, cell: Cell, digits: DigitSet) -> Self {
        for digit in self.current.candidates_at(cell) - digits {
            self.initial.eliminate(cell, digit);
            self.current.eliminate(cell, digit);
        }
        self
    }

    /// Runs the searcher in find-one mode and applies the step it returns.
    ///
    /// # Panics
    ///
    /// Panics if the searcher fails or finds nothing.
    #[track_caller]
    pub fn find_step<S>(mut self, searcher: &S) -> Self
    where
        S: StepSearcher,
    {
        let cache = LookupCache::new(&self.current);
        let mut context = AnalysisContext::new(&self.current, &cache);
        let step = searcher
            .collect(&mut context)
            .unwrap()
            .unwrap_or_else(|| panic!("{} found no step in\n{}", searcher.metadata().name(), self.current));
        for conclusion in step.conclusions() {
            self.current.apply(*conclusion);
        }
        self.step = Some(step);
        self
    }

    /// Runs the searcher in gathering mode and returns every step.
    #[track_caller]
    pub fn collect_all<S>(&self, searcher: &S) -> Vec<BoxedStep>
    where
        S: StepSearcher,
    {
        let cache = LookupCache::new(&self.current);
        let mut steps = vec![];
        let mut context = AnalysisContext::with_accumulator(&self.current, &cache, &mut steps);
        assert!(searcher.collect(&mut context).unwrap().is_none());
        steps
    }

    /// Asserts that the searcher finds nothing.
    #[track_caller]
    pub fn assert_no_step<S>(self, searcher: &S) -> Self
    where
        S: StepSearcher,
    {
        let cache = LookupCache::new(&self.current);
        let mut context = AnalysisContext::new(&self.current, &cache);
        if let Some(step) = searcher.collect(&mut context).unwrap() {
            panic!("expected no step, found {step}");
        }
        self
    }

    /// Returns the last step found.
    ///
    /// # Panics
    ///
    /// Panics if no step was found yet.
    #[track_caller]
    pub fn step(&self) -> &BoxedStep {
        self.step.as_ref().unwrap()
    }

    /// Asserts the technique of the last step.
    #[track_caller]
    pub fn assert_technique(self, technique: Technique) -> Self {
        let step = self.step();
        assert_eq!(step.technique(), technique, "unexpected step {step}");
        self
    }

    /// Asserts that `digit` was placed in `cell`.
    #[track_caller]
    pub fn assert_placed(self, cell: Cell, digit: Digit) -> Self {
        assert_eq!(self.initial.value(cell), None, "{cell} was already filled");
        assert_eq!(
            self.current.value(cell),
            Some(digit),
            "expected {digit} at {cell}, step was {}",
            self.step()
        );
        self
    }

    /// Asserts that at least `digits` were removed from `cell`.
    #[track_caller]
    pub fn assert_removed_includes(self, cell: Cell, digits: impl Into<DigitSet>) -> Self {
        let digits = digits.into();
        let removed = self.removed(cell);
        assert!(
            (digits - removed).is_empty(),
            "expected {digits} removed from {cell}, removed {removed}; step was {}",
            self.step()
        );
        self
    }

    /// Asserts that exactly `digits` were removed from `cell`.
    #[track_caller]
    pub fn assert_removed_exact(self, cell: Cell, digits: impl Into<DigitSet>) -> Self {
        let digits = digits.into();
        let removed = self.removed(cell);
        assert_eq!(
            removed,
            digits,
            "unexpected removals at {cell}; step was {}",
            self.step()
        );
        self
    }

    /// Asserts that the last step agrees with the unique solution of the
    /// initial grid.
    #[track_caller]
    pub fn assert_consistent_with_solution(self) -> Self {
        let solution = self.initial.exactly_validate().unwrap().solution;
        for conclusion in self.step().conclusions() {
            assert!(
                is_consistent(&solution, *conclusion),
                "{conclusion} contradicts the solution; step was {}",
                self.step()
            );
        }
        self
    }

    fn removed(&self, cell: Cell) -> DigitSet {
        if self.current.value(cell).is_some() {
            return DigitSet::EMPTY;
        }
        self.initial.candidates_at(cell) - self.current.candidates_at(cell)
    }
}

fn is_consistent(solution: &Grid, conclusion: Conclusion) -> bool {
    let digit = solution.value(conclusion.cell);
    if conclusion.is_assignment() {
        digit == Some(conclusion.digit)
    } else {
        digit != Some(conclusion.digit)
    }
}
