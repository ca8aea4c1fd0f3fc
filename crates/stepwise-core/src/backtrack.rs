//! Solution counting by depth-first search over digit masks.

use crate::{Cell, Digit, DigitSet};

/// Outcome of a bounded solution count.
#[derive(Debug, Clone)]
pub(crate) struct SolutionCount {
    pub(crate) count: usize,
    pub(crate) first: Option<[Digit; 81]>,
}

impl SolutionCount {
    pub(crate) fn unique(self) -> Option<[Digit; 81]> {
        if self.count == 1 { self.first } else { None }
    }
}

/// Counts solutions up to `limit`.
///
/// `values` holds the filled cells; `allowed` restricts the digits an empty
/// cell may take. Filled cells that conflict with each other yield zero
/// solutions.
pub(crate) fn count_solutions(
    values: &[Option<Digit>; 81],
    allowed: &[DigitSet; 81],
    limit: usize,
) -> SolutionCount {
    let mut search = Search {
        cells: [0; 81],
        allowed: [0; 81],
        rows: [0; 9],
        columns: [0; 9],
        boxes: [0; 9],
        count: 0,
        limit,
        first: None,
    };

    for cell in Cell::ALL {
        let i = cell.index();
        search.allowed[i] = allowed[i].bits();
        if let Some(digit) = values[i] {
            let bit = DigitSet::from_elem(digit).bits();
            if search.used(cell) & bit != 0 {
                return SolutionCount {
                    count: 0,
                    first: None,
                };
            }
            search.place(cell, bit);
        }
    }

    search.run();
    SolutionCount {
        count: search.count,
        first: search.first,
    }
}

struct Search {
    cells: [u16; 81],
    allowed: [u16; 81],
    rows: [u16; 9],
    columns: [u16; 9],
    boxes: [u16; 9],
    count: usize,
    limit: usize,
    first: Option<[Digit; 81]>,
}

impl Search {
    fn used(&self, cell: Cell) -> u16 {
        self.rows[usize::from(cell.row())]
            | self.columns[usize::from(cell.column())]
            | self.boxes[usize::from(cell.block())]
    }

    fn place(&mut self, cell: Cell, bit: u16) {
        self.cells[cell.index()] = bit;
        self.rows[usize::from(cell.row())] |= bit;
        self.columns[usize::from(cell.column())] |= bit;
        self.boxes[usize::from(cell.block())] |= bit;
    }

    fn unplace(&mut self, cell: Cell, bit: u16) {
        self.cells[cell.index()] = 0;
        self.rows[usize::from(cell.row())] &= !bit;
        self.columns[usize::from(cell.column())] &= !bit;
        self.boxes[usize::from(cell.block())] &= !bit;
    }

    fn run(&mut self) {
        if self.count >= self.limit {
            return;
        }

        // Branch on the most constrained empty cell.
        let mut best: Option<(Cell, u16)> = None;
        for cell in Cell::ALL {
            if self.cells[cell.index()] != 0 {
                continue;
            }
            let options = self.allowed[cell.index()] & !self.used(cell);
            let n = options.count_ones();
            if n == 0 {
                return;
            }
            if best.is_none_or(|(_, m)| n < m.count_ones()) {
                best = Some((cell, options));
                if n == 1 {
                    break;
                }
            }
        }

        let Some((cell, mut options)) = best else {
            self.count += 1;
            if self.first.is_none() {
                self.first = Some(
                    self.cells
                        .map(|bit| Digit::from_index(bit.trailing_zeros() as usize)),
                );
            }
            return;
        };

        while options != 0 {
            let bit = options & options.wrapping_neg();
            options &= options - 1;
            self.place(cell, bit);
            self.run();
            self.unplace(cell, bit);
            if self.count >= self.limit {
                return;
            }
        }
    }
}
