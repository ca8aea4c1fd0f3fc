//! Cells and 81-bit cell sets.

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub, SubAssign},
};

use crate::House;

/// A cell of the grid, indexed 0-80 in row-major order.
///
/// # Examples
///
/// ```
/// use stepwise_core::Cell;
///
/// let cell = Cell::new(4, 7);
/// assert_eq!(cell.index(), 43);
/// assert_eq!(cell.block(), 5);
/// assert_eq!(cell.to_string(), "r5c8");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cell(u8);

impl Cell {
    /// All 81 cells in row-major order.
    pub const ALL: [Self; 81] = {
        let mut all = [Self(0); 81];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 81 {
            all[i] = Self(i as u8);
            i += 1;
        }
        all
    };

    /// Creates a cell from its row and column (both 0-8).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is 9 or greater.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        assert!(row < 9 && column < 9, "row and column must be in 0..9");
        Self(row * 9 + column)
    }

    /// Creates a cell from its index, returning `None` if `index >= 81`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 81 {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the row-major index (0-80).
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the row (0-8).
    #[must_use]
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 9
    }

    /// Returns the column (0-8).
    #[must_use]
    #[inline]
    pub const fn column(self) -> u8 {
        self.0 % 9
    }

    /// Returns the 3×3 box index (0-8, left to right, top to bottom).
    #[must_use]
    #[inline]
    pub const fn block(self) -> u8 {
        self.row() / 3 * 3 + self.column() / 3
    }

    /// Returns the row, column and box containing this cell.
    #[must_use]
    pub const fn houses(self) -> [House; 3] {
        [
            House::Row { y: self.row() },
            House::Column { x: self.column() },
            House::Box { index: self.block() },
        ]
    }

    /// Returns every other cell sharing a house with this cell (20 cells).
    #[must_use]
    pub const fn peers(self) -> CellSet {
        PEERS[self.index()]
    }

    /// Returns `true` if the two cells are distinct and share a house.
    #[must_use]
    pub const fn sees(self, other: Self) -> bool {
        self.peers().contains(other)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row() + 1, self.column() + 1)
    }
}

const PEERS: [CellSet; 81] = {
    let mut table = [CellSet::EMPTY; 81];
    let mut i = 0;
    while i < 81 {
        let a = Cell::ALL[i];
        let mut j = 0;
        while j < 81 {
            let b = Cell::ALL[j];
            if i != j && (a.row() == b.row() || a.column() == b.column() || a.block() == b.block())
            {
                table[i].bits |= 1 << j;
            }
            j += 1;
        }
        i += 1;
    }
    table
};

/// A set of cells stored as an 81-bit mask.
///
/// # Examples
///
/// ```
/// use stepwise_core::{Cell, CellSet};
///
/// let pair = CellSet::from_iter([Cell::new(0, 0), Cell::new(0, 8)]);
/// // cells seeing both ends of the pair are the rest of row 1
/// assert_eq!(pair.peer_intersection().len(), 7);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet {
    bits: u128,
}

impl CellSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };
    /// The set of all 81 cells.
    pub const FULL: Self = Self {
        bits: (1 << 81) - 1,
    };

    /// Creates a set containing exactly one cell.
    #[must_use]
    pub const fn from_elem(cell: Cell) -> Self {
        Self {
            bits: 1 << cell.index(),
        }
    }

    pub(crate) const fn with(self, cell: Cell) -> Self {
        Self {
            bits: self.bits | 1 << cell.index(),
        }
    }

    /// Returns the number of cells in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns `true` if the set contains `cell`.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        self.bits & (1 << cell.index()) != 0
    }

    /// Inserts a cell, returning `true` if it was not present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let absent = !self.contains(cell);
        self.bits |= 1 << cell.index();
        absent
    }

    /// Removes a cell, returning `true` if it was present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        let present = self.contains(cell);
        self.bits &= !(1 << cell.index());
        present
    }

    /// Returns the lowest-indexed cell.
    #[must_use]
    pub fn first(self) -> Option<Cell> {
        self.iter().next()
    }

    /// Returns the only cell of the set, or `None` unless the set has exactly one.
    #[must_use]
    pub fn as_single(self) -> Option<Cell> {
        if self.len() == 1 { self.first() } else { None }
    }

    /// Returns the cells that see every member of the set.
    ///
    /// Members themselves are never part of the result. The intersection of an
    /// empty set is empty.
    #[must_use]
    pub fn peer_intersection(self) -> Self {
        let mut cells = self.iter();
        let Some(first) = cells.next() else {
            return Self::EMPTY;
        };
        cells.fold(first.peers(), |acc, cell| acc & cell.peers())
    }

    /// Returns the houses that contain every member of the set.
    #[must_use]
    pub fn shared_houses(self) -> Vec<House> {
        if self.is_empty() {
            return vec![];
        }
        House::ALL
            .into_iter()
            .filter(|house| house.cells() & self == self)
            .collect()
    }

    /// Returns `true` if all members share at least one house.
    #[must_use]
    pub fn in_one_house(self) -> bool {
        !self.shared_houses().is_empty()
    }

    /// Iterates the cells in ascending index order.
    #[must_use]
    pub fn iter(self) -> CellSetIter {
        CellSetIter { bits: self.bits }
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|cell| cell.to_string()))
            .finish()
    }
}

impl Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

impl BitOr for CellSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for CellSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl BitAnd for CellSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl BitAndAssign for CellSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl Sub for CellSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & !rhs.bits,
        }
    }
}

impl SubAssign for CellSet {
    fn sub_assign(&mut self, rhs: Self) {
        self.bits &= !rhs.bits;
    }
}

impl Not for CellSet {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            bits: !self.bits & Self::FULL.bits,
        }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl IntoIterator for CellSet {
    type Item = Cell;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> CellSetIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`CellSet`] in ascending order.
#[derive(Debug, Clone)]
pub struct CellSetIter {
    bits: u128,
}

impl Iterator for CellSetIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.bits == 0 {
            return None;
        }
        let index = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Cell::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for CellSetIter {}
impl FusedIterator for CellSetIter {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_coordinates() {
        let cell = Cell::new(8, 8);
        assert_eq!(cell.index(), 80);
        assert_eq!(cell.row(), 8);
        assert_eq!(cell.column(), 8);
        assert_eq!(cell.block(), 8);
        assert_eq!(Cell::new(3, 5).block(), 4);
        assert_eq!(Cell::from_index(81), None);
    }

    #[test]
    fn test_peers() {
        for cell in Cell::ALL {
            let peers = cell.peers();
            assert_eq!(peers.len(), 20);
            assert!(!peers.contains(cell));
        }
        assert!(Cell::new(0, 0).sees(Cell::new(2, 2)));
        assert!(!Cell::new(0, 0).sees(Cell::new(3, 3)));
    }

    #[test]
    fn test_peer_intersection() {
        // same box and row: the rest of the row plus the rest of the box
        let set = CellSet::from_iter([Cell::new(0, 0), Cell::new(0, 1)]);
        assert_eq!(set.peer_intersection().len(), 7 + 6);

        // cells in different rows, columns and boxes: only the two crossings
        let set = CellSet::from_iter([Cell::new(0, 0), Cell::new(4, 4)]);
        let crossings = set.peer_intersection();
        assert_eq!(
            crossings,
            CellSet::from_iter([Cell::new(0, 4), Cell::new(4, 0)])
        );

        assert!(CellSet::EMPTY.peer_intersection().is_empty());
    }

    #[test]
    fn test_shared_houses() {
        let set = CellSet::from_iter([Cell::new(0, 0), Cell::new(0, 2)]);
        assert_eq!(
            set.shared_houses(),
            vec![House::Row { y: 0 }, House::Box { index: 0 }]
        );
        let set = CellSet::from_iter([Cell::new(0, 0), Cell::new(1, 5)]);
        assert!(!set.in_one_house());
    }

    #[test]
    fn test_complement() {
        let set = CellSet::from_elem(Cell::new(2, 3));
        assert_eq!((!set).len(), 80);
        assert_eq!(!CellSet::FULL, CellSet::EMPTY);
    }

    proptest! {
        #[test]
        fn prop_peer_intersection_sees_every_member(indices in proptest::collection::vec(0usize..81, 1..4)) {
            let set: CellSet = indices.iter().filter_map(|&i| Cell::from_index(i)).collect();
            for cell in set.peer_intersection() {
                prop_assert!(!set.contains(cell));
                prop_assert!(set.iter().all(|member| member.sees(cell)));
            }
        }
    }
}
