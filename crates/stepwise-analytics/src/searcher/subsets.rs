use std::ops::ControlFlow;

use stepwise_core::{Cell, CellSet, Conclusion, Digit, DigitSet, House};
use tinyvec::ArrayVec;

use crate::{
    AnalysisContext, BoxedStep, SearcherError, StepData, Technique,
    searcher::{BoxedStepSearcher, StepSearcher, StepSearcherMetadata, for_each_combination},
};

/// Finds naked and hidden pairs and triples.
///
/// A naked subset is `n` cells of a house holding `n` digits between them;
/// those digits leave every other cell of each house the cells share. A hidden
/// subset is `n` digits confined to `n` cells of a house; those cells lose
/// every other digit.
#[derive(Debug, Clone)]
pub struct Subsets {
    metadata: StepSearcherMetadata,
}

impl Subsets {
    const METADATA: StepSearcherMetadata = StepSearcherMetadata::new("Subsets", 20);

    /// Creates the searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metadata: Self::METADATA,
        }
    }
}

impl Default for Subsets {
    fn default() -> Self {
        Self::new()
    }
}

const ORDER: [(usize, bool, Technique); 4] = [
    (2, false, Technique::NakedPair),
    (2, true, Technique::HiddenPair),
    (3, false, Technique::NakedTriple),
    (3, true, Technique::HiddenTriple),
];

impl StepSearcher for Subsets {
    fn metadata(&self) -> &StepSearcherMetadata {
        &self.metadata
    }

    fn collect(
        &self,
        context: &mut AnalysisContext<'_>,
    ) -> Result<Option<BoxedStep>, SearcherError> {
        for (size, is_hidden, technique) in ORDER {
            for house in House::ALL {
                let flow = if is_hidden {
                    hidden_subsets(context, house, size, technique)
                } else {
                    naked_subsets(context, house, size, technique)
                };
                if let ControlFlow::Break(step) = flow {
                    return Ok(Some(step));
                }
            }
        }
        Ok(None)
    }

    fn clone_box(&self) -> BoxedStepSearcher {
        Box::new(self.clone())
    }
}

fn naked_subsets(
    context: &mut AnalysisContext<'_>,
    house: House,
    size: usize,
    technique: Technique,
) -> ControlFlow<BoxedStep> {
    let grid = context.grid();
    let empty = house.cells() & context.cache().empty_cells();
    if empty.len() <= size {
        return ControlFlow::Continue(());
    }
    let cells: ArrayVec<[Cell; 9]> = empty
        .iter()
        .filter(|&cell| (2..=size).contains(&grid.candidates_at(cell).len()))
        .collect();

    for_each_combination(cells.len(), size, |indices| {
        let subset: CellSet = indices.iter().map(|&i| cells[i]).collect();
        let digits = subset
            .iter()
            .fold(DigitSet::EMPTY, |acc, cell| acc | grid.candidates_at(cell));
        if digits.len() != size {
            return ControlFlow::Continue(());
        }
        let shared = subset
            .shared_houses()
            .into_iter()
            .fold(CellSet::EMPTY, |acc, shared| acc | shared.cells());
        let others = (shared & context.cache().empty_cells()) - subset;
        let conclusions: Vec<_> = others
            .iter()
            .flat_map(|cell| {
                (grid.candidates_at(cell) & digits)
                    .iter()
                    .map(move |digit| Conclusion::elimination(cell, digit))
            })
            .collect();
        if conclusions.is_empty() {
            return ControlFlow::Continue(());
        }
        let step = StepData::new(technique, format!("{subset}({digits})"), conclusions);
        match context.offer(Box::new(step)) {
            Some(step) => ControlFlow::Break(step),
            None => ControlFlow::Continue(()),
        }
    })
}

fn hidden_subsets(
    context: &mut AnalysisContext<'_>,
    house: House,
    size: usize,
    technique: Technique,
) -> ControlFlow<BoxedStep> {
    let grid = context.grid();
    let cache = context.cache();
    if (house.cells() & cache.empty_cells()).len() <= size {
        return ControlFlow::Continue(());
    }
    let digits: Vec<Digit> = cache
        .missing_digits(house)
        .iter()
        .filter(|&digit| (2..=size).contains(&cache.positions(house, digit).len()))
        .collect();

    for_each_combination(digits.len(), size, |indices| {
        let subset: DigitSet = indices.iter().map(|&i| digits[i]).collect();
        let cells = subset
            .iter()
            .fold(CellSet::EMPTY, |acc, digit| acc | cache.positions(house, digit));
        if cells.len() != size {
            return ControlFlow::Continue(());
        }
        let conclusions: Vec<_> = cells
            .iter()
            .flat_map(|cell| {
                (grid.candidates_at(cell) - subset)
                    .iter()
                    .map(move |digit| Conclusion::elimination(cell, digit))
            })
            .collect();
        if conclusions.is_empty() {
            return ControlFlow::Continue(());
        }
        let step = StepData::new(technique, format!("{subset} in {house}"), conclusions);
        match context.offer(Box::new(step)) {
            Some(step) => ControlFlow::Break(step),
            None => ControlFlow::Continue(()),
        }
    })
}
