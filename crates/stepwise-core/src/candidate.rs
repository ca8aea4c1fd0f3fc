//! Candidates and 729-bit candidate sets.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub},
};

use crate::{Cell, CellSet, Digit, DigitSet};

/// A `(cell, digit)` pair, encoded as `cell * 9 + digit index`.
///
/// # Examples
///
/// ```
/// use stepwise_core::{Candidate, Cell, Digit};
///
/// let candidate = Candidate::new(Cell::new(0, 1), Digit::D3);
/// assert_eq!(candidate.index(), 11);
/// assert_eq!(candidate.cell(), Cell::new(0, 1));
/// assert_eq!(candidate.digit(), Digit::D3);
/// assert_eq!(candidate.to_string(), "r1c2(3)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate(u16);

impl Candidate {
    /// Number of distinct candidates.
    pub const COUNT: usize = 729;

    /// Creates a candidate.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn new(cell: Cell, digit: Digit) -> Self {
        Self((cell.index() * 9 + digit.index()) as u16)
    }

    /// Creates a candidate from its encoded index, returning `None` if `index >= 729`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u16))
        } else {
            None
        }
    }

    /// Returns the encoded index (0-728).
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the cell of the candidate.
    #[must_use]
    #[inline]
    pub const fn cell(self) -> Cell {
        Cell::ALL[self.index() / 9]
    }

    /// Returns the digit of the candidate.
    #[must_use]
    #[inline]
    pub const fn digit(self) -> Digit {
        Digit::from_index(self.index() % 9)
    }

    /// Returns `true` if the two candidates cannot both be true by the basic rules:
    /// they sit in the same cell, or carry the same digit in cells that see each other.
    #[must_use]
    pub const fn sees(self, other: Self) -> bool {
        if self.0 == other.0 {
            return false;
        }
        let same_cell = self.index() / 9 == other.index() / 9;
        let same_digit = self.index() % 9 == other.index() % 9;
        same_cell || (same_digit && self.cell().sees(other.cell()))
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.cell(), self.digit())
    }
}

const WORDS: usize = Candidate::COUNT.div_ceil(64);

/// A set of candidates stored as a 729-bit mask.
///
/// Sets are ordered first by their size and then lexicographically by their
/// members in ascending order, so a smaller set always sorts first.
///
/// # Examples
///
/// ```
/// use stepwise_core::{Candidate, CandidateSet, Cell, Digit};
///
/// let a = Candidate::new(Cell::new(0, 0), Digit::D1);
/// let b = Candidate::new(Cell::new(0, 5), Digit::D1);
/// let set = CandidateSet::from_iter([a, b]);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.digits().as_single(), Some(Digit::D1));
/// assert!(set < CandidateSet::from_iter([a, b, Candidate::new(Cell::new(8, 8), Digit::D9)]));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CandidateSet {
    words: [u64; WORDS],
}

impl CandidateSet {
    /// The empty set.
    pub const EMPTY: Self = Self { words: [0; WORDS] };

    /// Creates a set containing exactly one candidate.
    #[must_use]
    pub const fn from_elem(candidate: Candidate) -> Self {
        let mut words = [0; WORDS];
        words[candidate.index() / 64] = 1 << (candidate.index() % 64);
        Self { words }
    }

    /// Creates the set of candidates of `digit` in `cells`.
    #[must_use]
    pub fn from_cells(cells: CellSet, digit: Digit) -> Self {
        cells.iter().map(|cell| Candidate::new(cell, digit)).collect()
    }

    /// Returns the number of candidates in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns `true` if the set contains `candidate`.
    #[must_use]
    pub const fn contains(&self, candidate: Candidate) -> bool {
        self.words[candidate.index() / 64] & (1 << (candidate.index() % 64)) != 0
    }

    /// Inserts a candidate, returning `true` if it was not present.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        let absent = !self.contains(candidate);
        self.words[candidate.index() / 64] |= 1 << (candidate.index() % 64);
        absent
    }

    /// Removes a candidate, returning `true` if it was present.
    pub fn remove(&mut self, candidate: Candidate) -> bool {
        let present = self.contains(candidate);
        self.words[candidate.index() / 64] &= !(1 << (candidate.index() % 64));
        present
    }

    /// Returns the lowest candidate.
    #[must_use]
    pub fn first(&self) -> Option<Candidate> {
        self.iter().next()
    }

    /// Returns the only candidate of the set, or `None` unless the set has exactly one.
    #[must_use]
    pub fn as_single(&self) -> Option<Candidate> {
        if self.len() == 1 { self.first() } else { None }
    }

    /// Returns `true` if every member of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| a & !b == 0)
    }

    /// Returns `true` if the sets share at least one candidate.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.words.iter().zip(&other.words).any(|(a, b)| a & b != 0)
    }

    /// Returns the cells covered by the set.
    #[must_use]
    pub fn cells(&self) -> CellSet {
        self.iter().map(Candidate::cell).collect()
    }

    /// Returns the digits used by the set.
    #[must_use]
    pub fn digits(&self) -> DigitSet {
        self.iter().map(Candidate::digit).collect()
    }

    /// Returns the candidates that see every member of the set.
    ///
    /// Members themselves are never part of the result. The intersection of an
    /// empty set is empty.
    #[must_use]
    pub fn peer_intersection(&self) -> Self {
        let mut members = self.iter();
        let Some(first) = members.next() else {
            return Self::EMPTY;
        };
        members.fold(candidate_peers(first), |acc, candidate| {
            acc & candidate_peers(candidate)
        })
    }

    /// Iterates the candidates in ascending order.
    #[must_use]
    pub fn iter(&self) -> CandidateSetIter {
        CandidateSetIter {
            words: self.words,
            word: 0,
        }
    }
}

fn candidate_peers(candidate: Candidate) -> CandidateSet {
    let cell = candidate.cell();
    let digit = candidate.digit();
    let mut peers = CandidateSet::from_cells(cell.peers(), digit);
    for other in DigitSet::FULL - DigitSet::from_elem(digit) {
        peers.insert(Candidate::new(cell, other));
    }
    peers
}

impl Ord for CandidateSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len()).then_with(|| {
            // Equal sizes: the set holding the lowest differing candidate has the
            // smaller member at the first differing position.
            for (a, b) in self.words.iter().zip(&other.words) {
                let diff = a ^ b;
                if diff != 0 {
                    let lowest = diff & diff.wrapping_neg();
                    return if a & lowest != 0 {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    };
                }
            }
            Ordering::Equal
        })
    }
}

impl PartialOrd for CandidateSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|candidate| candidate.to_string()))
            .finish()
    }
}

impl Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Single digit sets print as `cells(digit)`; mixed sets list every candidate.
        if let Some(digit) = self.digits().as_single() {
            return write!(f, "{}({digit})", self.cells());
        }
        for (i, candidate) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{candidate}")?;
        }
        Ok(())
    }
}

impl BitOr for CandidateSet {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self {
        self |= rhs;
        self
    }
}

impl BitOrAssign for CandidateSet {
    fn bitor_assign(&mut self, rhs: Self) {
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a |= b;
        }
    }
}

impl BitAnd for CandidateSet {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self {
        self &= rhs;
        self
    }
}

impl BitAndAssign for CandidateSet {
    fn bitand_assign(&mut self, rhs: Self) {
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a &= b;
        }
    }
}

impl Sub for CandidateSet {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a &= !b;
        }
        self
    }
}

impl FromIterator<Candidate> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for candidate in iter {
            set.insert(candidate);
        }
        set
    }
}

impl IntoIterator for CandidateSet {
    type Item = Candidate;
    type IntoIter = CandidateSetIter;

    fn into_iter(self) -> CandidateSetIter {
        self.iter()
    }
}

impl IntoIterator for &CandidateSet {
    type Item = Candidate;
    type IntoIter = CandidateSetIter;

    fn into_iter(self) -> CandidateSetIter {
        self.iter()
    }
}

/// Iterator over the candidates of a [`CandidateSet`] in ascending order.
#[derive(Debug, Clone)]
pub struct CandidateSetIter {
    words: [u64; WORDS],
    word: usize,
}

impl Iterator for CandidateSetIter {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        while self.word < WORDS {
            let bits = &mut self.words[self.word];
            if *bits != 0 {
                let offset = bits.trailing_zeros() as usize;
                *bits &= *bits - 1;
                return Candidate::from_index(self.word * 64 + offset);
            }
            self.word += 1;
        }
        None
    }
}

impl FusedIterator for CandidateSetIter {}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash as _, Hasher as _},
    };

    use proptest::prelude::*;

    use super::*;

    fn cand(row: u8, column: u8, digit: u8) -> Candidate {
        Candidate::new(Cell::new(row, column), Digit::from_value(digit))
    }

    fn hash_of(set: &CandidateSet) -> u64 {
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_candidate_encoding() {
        let last = cand(8, 8, 9);
        assert_eq!(last.index(), 728);
        assert_eq!(Candidate::from_index(729), None);
        assert_eq!(Candidate::from_index(728), Some(last));
    }

    #[test]
    fn test_candidate_sees() {
        assert!(cand(0, 0, 1).sees(cand(0, 0, 2)));
        assert!(cand(0, 0, 1).sees(cand(0, 8, 1)));
        assert!(!cand(0, 0, 1).sees(cand(0, 8, 2)));
        assert!(!cand(0, 0, 1).sees(cand(0, 0, 1)));
    }

    #[test]
    fn test_cells_and_digits() {
        let set = CandidateSet::from_iter([cand(0, 0, 1), cand(0, 0, 2), cand(4, 4, 2)]);
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.cells(),
            CellSet::from_iter([Cell::new(0, 0), Cell::new(4, 4)])
        );
        assert_eq!(
            set.digits(),
            DigitSet::from_iter([Digit::D1, Digit::D2])
        );
    }

    #[test]
    fn test_ordering() {
        let small = CandidateSet::from_elem(cand(8, 8, 9));
        let large = CandidateSet::from_iter([cand(0, 0, 1), cand(0, 0, 2)]);
        assert!(small < large);

        let a = CandidateSet::from_iter([cand(0, 0, 1), cand(5, 0, 1)]);
        let b = CandidateSet::from_iter([cand(0, 0, 1), cand(6, 0, 1)]);
        assert!(a < b);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn test_peer_intersection() {
        let single = CandidateSet::from_elem(cand(0, 0, 5));
        // 20 peer cells holding 5 plus 8 other digits in the cell itself
        assert_eq!(single.peer_intersection().len(), 28);

        let pair = CandidateSet::from_iter([cand(0, 0, 5), cand(0, 1, 5)]);
        let peers = pair.peer_intersection();
        assert_eq!(peers.digits(), DigitSet::from_elem(Digit::D5));
        assert_eq!(peers.len(), 13);
    }

    #[test]
    fn test_iteration_crosses_words() {
        let members = [cand(0, 0, 1), cand(7, 1, 2), cand(8, 8, 9)];
        let set = CandidateSet::from_iter(members);
        assert_eq!(set.iter().collect::<Vec<_>>(), members);
    }

    #[test]
    fn test_display() {
        let set = CandidateSet::from_iter([cand(0, 0, 5), cand(0, 1, 5)]);
        assert_eq!(set.to_string(), "r1c1,r1c2(5)");
    }

    proptest! {
        #[test]
        fn prop_equal_sets_hash_equal(indices in proptest::collection::vec(0usize..729, 0..12)) {
            let a: CandidateSet = indices.iter().filter_map(|&i| Candidate::from_index(i)).collect();
            let b: CandidateSet = indices.iter().rev().filter_map(|&i| Candidate::from_index(i)).collect();
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.cmp(&b), Ordering::Equal);
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn prop_order_matches_sorted_members(
            x in proptest::collection::btree_set(0usize..729, 1..6),
            y in proptest::collection::btree_set(0usize..729, 1..6),
        ) {
            let a: CandidateSet = x.iter().filter_map(|&i| Candidate::from_index(i)).collect();
            let b: CandidateSet = y.iter().filter_map(|&i| Candidate::from_index(i)).collect();
            let expected = x.len().cmp(&y.len()).then_with(|| x.iter().cmp(y.iter()));
            prop_assert_eq!(a.cmp(&b), expected);
        }
    }
}
