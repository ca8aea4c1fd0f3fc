use stepwise_core::{Conclusion, House};

use crate::{
    AnalysisContext, BoxedStep, SearcherError, StepData, Technique,
    searcher::{BoxedStepSearcher, StepSearcher, StepSearcherMetadata},
};

/// Finds full houses, hidden singles and naked singles, in that order.
///
/// Hidden singles are searched in boxes first, then rows, then columns.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use stepwise_analytics::{
///     AnalysisContext, LookupCache, Step as _, Technique,
///     searcher::{Singles, StepSearcher as _},
/// };
/// use stepwise_core::Grid;
///
/// let grid = Grid::from_str(
///     "534678912672195348198342567859761423426853791713924856961537284287419635345286_79",
/// )?;
/// let cache = LookupCache::new(&grid);
/// let mut context = AnalysisContext::new(&grid, &cache);
/// let step = Singles::new().collect(&mut context)?.unwrap();
/// assert_eq!(step.technique(), Technique::FullHouse);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Singles {
    metadata: StepSearcherMetadata,
}

impl Singles {
    const METADATA: StepSearcherMetadata = StepSearcherMetadata::new("Singles", 0);

    /// Creates the searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metadata: Self::METADATA,
        }
    }
}

impl Default for Singles {
    fn default() -> Self {
        Self::new()
    }
}

impl StepSearcher for Singles {
    fn metadata(&self) -> &StepSearcherMetadata {
        &self.metadata
    }

    fn collect(
        &self,
        context: &mut AnalysisContext<'_>,
    ) -> Result<Option<BoxedStep>, SearcherError> {
        let cache = context.cache();

        for house in House::ALL {
            let empty = house.cells() & cache.empty_cells();
            let (Some(cell), Some(digit)) =
                (empty.as_single(), cache.missing_digits(house).as_single())
            else {
                continue;
            };
            let step = StepData::new(
                Technique::FullHouse,
                house.to_string(),
                vec![Conclusion::assignment(cell, digit)],
            );
            if let Some(step) = context.offer(Box::new(step)) {
                return Ok(Some(step));
            }
        }

        let boxes = &House::ALL[18..];
        let rows = &House::ALL[..9];
        let columns = &House::ALL[9..18];
        for (houses, technique) in [
            (boxes, Technique::HiddenSingleBlock),
            (rows, Technique::HiddenSingleRow),
            (columns, Technique::HiddenSingleColumn),
        ] {
            for &house in houses {
                for digit in cache.missing_digits(house) {
                    let Some(cell) = cache.positions(house, digit).as_single() else {
                        continue;
                    };
                    let step = StepData::new(
                        technique,
                        format!("{digit} in {house}"),
                        vec![Conclusion::assignment(cell, digit)],
                    );
                    if let Some(step) = context.offer(Box::new(step)) {
                        return Ok(Some(step));
                    }
                }
            }
        }

        let grid = context.grid();
        for cell in cache.empty_cells() {
            let Some(digit) = grid.candidates_at(cell).as_single() else {
                continue;
            };
            let step = StepData::new(
                Technique::NakedSingle,
                cell.to_string(),
                vec![Conclusion::assignment(cell, digit)],
            );
            if let Some(step) = context.offer(Box::new(step)) {
                return Ok(Some(step));
            }
        }

        Ok(None)
    }

    fn clone_box(&self) -> BoxedStepSearcher {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use stepwise_core::{Cell, Digit, DigitSet, Grid};

    use super::*;
    use crate::testing::SearcherTester;

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_full_house() {
        let mut puzzle = SOLUTION.to_owned();
        puzzle.replace_range(0..1, "_");
        puzzle.replace_range(40..41, "_");
        SearcherTester::from_str(&puzzle)
            .find_step(&Singles::new())
            .assert_technique(Technique::FullHouse)
            .assert_placed(Cell::new(0, 0), Digit::D5)
            .assert_consistent_with_solution();
    }

    #[test]
    fn test_hidden_single_in_box() {
        let others = House::Box { index: 0 }
            .cells()
            .iter()
            .filter(|&cell| cell != Cell::new(1, 1));
        SearcherTester::new(Grid::new())
            .eliminate(others, Digit::D5)
            .find_step(&Singles::new())
            .assert_technique(Technique::HiddenSingleBlock)
            .assert_placed(Cell::new(1, 1), Digit::D5);
    }

    #[test]
    fn test_hidden_single_in_row() {
        let others = House::Row { y: 0 }
            .cells()
            .iter()
            .filter(|&cell| cell != Cell::new(0, 3));
        SearcherTester::new(Grid::new())
            .eliminate(others, Digit::D5)
            .find_step(&Singles::new())
            .assert_technique(Technique::HiddenSingleRow)
            .assert_placed(Cell::new(0, 3), Digit::D5);
    }

    #[test]
    fn test_hidden_single_in_column() {
        let others = House::Column { x: 5 }
            .cells()
            .iter()
            .filter(|&cell| cell != Cell::new(4, 5));
        SearcherTester::new(Grid::new())
            .eliminate(others, Digit::D7)
            .find_step(&Singles::new())
            .assert_technique(Technique::HiddenSingleColumn)
            .assert_placed(Cell::new(4, 5), Digit::D7);
    }

    #[test]
    fn test_naked_single() {
        SearcherTester::new(Grid::new())
            .restrict(Cell::new(4, 4), DigitSet::from_elem(Digit::D7))
            .find_step(&Singles::new())
            .assert_technique(Technique::NakedSingle)
            .assert_placed(Cell::new(4, 4), Digit::D7);
    }

    #[test]
    fn test_no_single_in_empty_grid() {
        SearcherTester::new(Grid::new()).assert_no_step(&Singles::new());
    }

    #[test]
    fn test_gathering_finds_every_single() {
        let mut puzzle = SOLUTION.to_owned();
        puzzle.replace_range(0..1, "_");
        puzzle.replace_range(40..41, "_");
        let steps = SearcherTester::from_str(&puzzle).collect_all(&Singles::new());
        // each emptied cell completes three houses, is hidden in each of them and is naked
        assert_eq!(steps.len(), 2 * 3 + 2 * 3 + 2);
        assert!(steps.iter().all(|step| step.is_single()));
    }
}
