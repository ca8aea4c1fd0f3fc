use stepwise_core::{CellSet, Conclusion, Digit, House};

use crate::{
    AnalysisContext, BoxedStep, LookupCache, SearcherError, StepData, Technique,
    searcher::{BoxedStepSearcher, StepSearcher, StepSearcherMetadata},
};

/// Finds digits locked into the intersection of a box and a line.
///
/// - Pointing: the box holds the digit only in the intersection, so the rest
///   of the line loses it.
/// - Claiming: the line holds the digit only in the intersection, so the rest
///   of the box loses it.
#[derive(Debug, Clone)]
pub struct LockedCandidates {
    metadata: StepSearcherMetadata,
}

impl LockedCandidates {
    const METADATA: StepSearcherMetadata = StepSearcherMetadata::new("Locked Candidates", 10);

    /// Creates the searcher.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metadata: Self::METADATA,
        }
    }
}

impl Default for LockedCandidates {
    fn default() -> Self {
        Self::new()
    }
}

/// The three rows and three columns crossing a box.
pub(super) const fn crossing_lines(box_index: u8) -> [House; 6] {
    let (band, stack) = (box_index / 3 * 3, box_index % 3 * 3);
    [
        House::Row { y: band },
        House::Row { y: band + 1 },
        House::Row { y: band + 2 },
        House::Column { x: stack },
        House::Column { x: stack + 1 },
        House::Column { x: stack + 2 },
    ]
}

fn locked(
    cache: &LookupCache,
    base: House,
    cover: House,
    intersection: CellSet,
    digit: Digit,
) -> Option<Vec<Conclusion>> {
    let positions = cache.positions(base, digit);
    if positions.len() < 2 || !(positions - intersection).is_empty() {
        return None;
    }
    let eliminations: Vec<_> = (cache.positions(cover, digit) - intersection)
        .iter()
        .map(|cell| Conclusion::elimination(cell, digit))
        .collect();
    (!eliminations.is_empty()).then_some(eliminations)
}

impl StepSearcher for LockedCandidates {
    fn metadata(&self) -> &StepSearcherMetadata {
        &self.metadata
    }

    fn collect(
        &self,
        context: &mut AnalysisContext<'_>,
    ) -> Result<Option<BoxedStep>, SearcherError> {
        let cache = context.cache();
        for (technique, block_is_base) in
            [(Technique::Pointing, true), (Technique::Claiming, false)]
        {
            for index in 0..9 {
                let block = House::Box { index };
                for line in crossing_lines(index) {
                    let intersection = block.cells() & line.cells();
                    for digit in Digit::ALL {
                        let (base, cover) = if block_is_base {
                            (block, line)
                        } else {
                            (line, block)
                        };
                        let Some(conclusions) = locked(cache, base, cover, intersection, digit)
                        else {
                            continue;
                        };
                        let step = StepData::new(
                            technique,
                            format!("{digit} in {base}/{cover}"),
                            conclusions,
                        );
                        if let Some(step) = context.offer(Box::new(step)) {
                            return Ok(Some(step));
                        }
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
