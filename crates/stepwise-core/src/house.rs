//! Rows, columns and boxes.

use std::fmt::{self, Display};

use crate::{Cell, CellSet};

/// A Sudoku house (row, column, or 3×3 box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum House {
    /// A row identified by its y coordinate (0-8).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its x coordinate (0-8).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl House {
    /// Array containing all houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row { y: i as u8 };
            all[i + 9] = Self::Column { x: i as u8 };
            all[i + 18] = Self::Box { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Returns the position of this house in [`House::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Row { y } => y as usize,
            Self::Column { x } => 9 + x as usize,
            Self::Box { index } => 18 + index as usize,
        }
    }

    /// Returns `true` for rows and columns.
    #[must_use]
    pub const fn is_line(self) -> bool {
        !matches!(self, Self::Box { .. })
    }

    /// Returns the nine cells of the house.
    #[must_use]
    pub const fn cells(self) -> CellSet {
        HOUSE_CELLS[self.index()]
    }
}

impl Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row { y } => write!(f, "r{}", y + 1),
            Self::Column { x } => write!(f, "c{}", x + 1),
            Self::Box { index } => write!(f, "b{}", index + 1),
        }
    }
}

const HOUSE_CELLS: [CellSet; 27] = {
    let mut table = [CellSet::EMPTY; 27];
    let mut i = 0;
    while i < 81 {
        let cell = Cell::ALL[i];
        let houses = cell.houses();
        let mut h = 0;
        while h < 3 {
            let index = houses[h].index();
            table[index] = table[index].with(cell);
            h += 1;
        }
        i += 1;
    }
    table
};
