use std::ops::ControlFlow;

use stepwise_core::{Cell, CellSet, Conclusion, Digit, House};
use tinyvec::ArrayVec;

use crate::{
    AnalysisContext, BoxedStep, SearcherError, StepData, Technique,
    searcher::{BoxedStepSearcher, StepSearcher, StepSearcherMetadata, for_each_combination},
};

/// Finds X-Wings and Swordfish.
///
/// When a digit is confined to the same `n` columns in `n` rows, it leaves
/// every other row of those columns, and vice versa.
#[derive(Debug, Clone)]
pub struct NormalFish {
    metadata: StepSearcherMetadata,
}

impl NormalFish {
    const METADATA: StepSearcherMetadata = StepSearcherMetadata::new("Normal Fish", 30);

    /// Creates the searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metadata: Self::METADATA,
        }
    }
}

impl Default for NormalFish {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Rows,
    Columns,
}

impl Orientation {
    const fn base(self, index: u8) -> House {
        match self {
            Self::Rows => House::Row { y: index },
            Self::Columns => House::Column { x: index },
        }
    }

    const fn cover(self, index: u8) -> House {
        match self {
            Self::Rows => House::Column { x: index },
            Self::Columns => House::Row { y: index },
        }
    }

    const fn cover_index(self, cell: Cell) -> u8 {
        match self {
            Self::Rows => cell.column(),
            Self::Columns => cell.row(),
        }
    }
}

impl StepSearcher for NormalFish {
    fn metadata(&self) -> &StepSearcherMetadata {
        &self.metadata
    }

    fn collect(
        &self,
        context: &mut AnalysisContext<'_>,
    ) -> Result<Option<BoxedStep>, SearcherError> {
        for (size, technique) in [(2, Technique::XWing), (3, Technique::Swordfish)] {
            for orientation in [Orientation::Rows, Orientation::Columns] {
                for digit in Digit::ALL {
                    if let ControlFlow::Break(step) =
                        find_fish(context, digit, size, orientation, technique)
                    {
                        return Ok(Some(step));
                    }
                }
            }
        }
        Ok(None)
    }

    fn clone_box(&self) -> BoxedStepSearcher {
        Box::new(self.clone())
    }
}

fn find_fish(
    context: &mut AnalysisContext<'_>,
    digit: Digit,
    size: usize,
    orientation: Orientation,
    technique: Technique,
) -> ControlFlow<BoxedStep> {
    let cache = context.cache();
    let bases: ArrayVec<[u8; 9]> = (0..9)
        .filter(|&index| {
            (2..=size).contains(&cache.positions(orientation.base(index), digit).len())
        })
        .collect();

    for_each_combination(bases.len(), size, |indices| {
        let base_cells = indices.iter().fold(CellSet::EMPTY, |acc, &i| {
            acc | cache.positions(orientation.base(bases[i]), digit)
        });
        let cover_mask = base_cells
            .iter()
            .fold(0_u16, |mask, cell| mask | 1 << orientation.cover_index(cell));
        let covers: ArrayVec<[u8; 9]> = (0..9).filter(|&i| cover_mask & 1 << i != 0).collect();
        if covers.len() != size {
            return ControlFlow::Continue(());
        }
        let eliminations = covers.iter().fold(CellSet::EMPTY, |acc, &index| {
            acc | cache.positions(orientation.cover(index), digit)
        }) - base_cells;
        if eliminations.is_empty() {
            return ControlFlow::Continue(());
        }
        let base_names: String = indices
            .iter()
            .map(|&i| orientation.base(bases[i]).to_string())
            .collect();
        let cover_names: String = covers
            .iter()
            .map(|&index| orientation.cover(index).to_string())
            .collect();
        let conclusions = eliminations
            .iter()
            .map(|cell| Conclusion::elimination(cell, digit))
            .collect();
        let description = format!("{digit} in {base_names}/{cover_names}");
        let step = StepData::new(technique, description, conclusions);
        match context.offer(Box::new(step)) {
            Some(step) => ControlFlow::Break(step),
            None => ControlFlow::Continue(()),
        }
    })
}
