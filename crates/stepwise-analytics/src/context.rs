//! Per-invocation state handed to searchers.

use stepwise_core::{Cell, CellSet, Digit, DigitSet, Grid, House};

use crate::BoxedStep;

/// Maps derived from the playground, rebuilt before every pass.
///
/// Searchers read these instead of rescanning the grid.
#[derive(Debug, Clone)]
pub struct LookupCache {
    empty_cells: CellSet,
    bivalue_cells: CellSet,
    candidates_maps: [CellSet; 9],
    values_maps: [CellSet; 9],
}

impl LookupCache {
    /// Builds the cache for `grid`.
    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        let mut candidates_maps = [CellSet::EMPTY; 9];
        let mut values_maps = [CellSet::EMPTY; 9];
        for cell in Cell::ALL {
            if let Some(digit) = grid.value(cell) {
                values_maps[digit.index()].insert(cell);
            }
            for digit in grid.candidates_at(cell) {
                candidates_maps[digit.index()].insert(cell);
            }
        }
        Self {
            empty_cells: grid.empty_cells(),
            bivalue_cells: grid.bivalue_cells(),
            candidates_maps,
            values_maps,
        }
    }

    /// Returns the empty cells.
    #[must_use]
    pub fn empty_cells(&self) -> CellSet {
        self.empty_cells
    }

    /// Returns the empty cells with exactly two candidates.
    #[must_use]
    pub fn bivalue_cells(&self) -> CellSet {
        self.bivalue_cells
    }

    /// Returns the empty cells holding `digit` as a candidate.
    #[must_use]
    pub fn candidates_map(&self, digit: Digit) -> CellSet {
        self.candidates_maps[digit.index()]
    }

    /// Returns the cells filled with `digit`.
    #[must_use]
    pub fn values_map(&self, digit: Digit) -> CellSet {
        self.values_maps[digit.index()]
    }

    /// Returns the cells of `house` that can still hold `digit`.
    #[must_use]
    pub fn positions(&self, house: House, digit: Digit) -> CellSet {
        house.cells() & self.candidates_maps[digit.index()]
    }

    /// Returns the digits not yet filled in `house`.
    #[must_use]
    pub fn missing_digits(&self, house: House) -> DigitSet {
        Digit::ALL
            .into_iter()
            .filter(|digit| (house.cells() & self.values_maps[digit.index()]).is_empty())
            .collect()
    }
}

/// What a searcher sees during one invocation.
///
/// In find-one mode, [`offer`](Self::offer) hands the step back so the
/// searcher can return it at once. With an accumulator, every offered step is
/// collected and the searcher keeps going.
#[derive(Debug)]
pub struct AnalysisContext<'a> {
    grid: &'a Grid,
    cache: &'a LookupCache,
    accumulator: Option<&'a mut Vec<BoxedStep>>,
}

impl<'a> AnalysisContext<'a> {
    /// Creates a find-one context.
    #[must_use]
    pub fn new(grid: &'a Grid, cache: &'a LookupCache) -> Self {
        Self {
            grid,
            cache,
            accumulator: None,
        }
    }

    /// Creates a context that collects every step into `accumulator`.
    #[must_use]
    pub fn with_accumulator(
        grid: &'a Grid,
        cache: &'a LookupCache,
        accumulator: &'a mut Vec<BoxedStep>,
    ) -> Self {
        Self {
            grid,
            cache,
            accumulator: Some(accumulator),
        }
    }

    /// Returns the playground.
    #[must_use]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Returns the lookup cache for the playground.
    #[must_use]
    pub fn cache(&self) -> &'a LookupCache {
        self.cache
    }

    /// Returns `true` if the searcher should stop at the first step.
    #[must_use]
    pub fn only_find_one(&self) -> bool {
        self.accumulator.is_none()
    }

    /// Offers a step.
    ///
    /// Returns the step in find-one mode; otherwise stores it and returns `None`.
    pub fn offer(&mut self, step: BoxedStep) -> Option<BoxedStep> {
        match &mut self.accumulator {
            Some(accumulator) => {
                accumulator.push(step);
                None
            }
            None => Some(step),
        }
    }
}
