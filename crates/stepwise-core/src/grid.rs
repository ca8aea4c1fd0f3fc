//! The puzzle grid with per-cell candidates.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Cell, CellSet, Conclusion, ConclusionKind, Digit, DigitSet, House, backtrack};

/// The content of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// The cell has no digit yet.
    Empty,
    /// The digit was part of the puzzle.
    Given(Digit),
    /// The digit was filled in while solving.
    Modifiable(Digit),
}

/// An error returned when parsing a [`Grid`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// A character other than a digit, an empty marker, `+` or whitespace was found.
    #[display("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character position in the input.
        position: usize,
    },
    /// A `+` modifier was not followed by a digit 1-9.
    #[display("`+` at position {position} is not followed by a digit")]
    DanglingModifier {
        /// Character position of the `+`.
        position: usize,
    },
    /// The input did not describe exactly 81 cells.
    #[display("expected 81 cells, found {count}")]
    InvalidLength {
        /// Number of cells found.
        count: usize,
    },
}

/// Result of [`Grid::exactly_validate`] for a puzzle with a unique solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// The solved grid. It keeps the puzzle's givens, so every other cell
    /// is a filled non-given.
    pub solution: Grid,
    /// `true` if the solution is unique only when the grid's candidates are
    /// respected, i.e. the puzzle is defined by its candidates.
    pub is_sukaku: bool,
}

/// A sudoku grid tracking filled digits and the candidates of empty cells.
///
/// Filling a cell removes its digit from the candidates of every peer.
///
/// # Parsing
///
/// [`Grid::from_str`] accepts 81 cells:
/// - `1`-`9`: a given digit
/// - `+` followed by `1`-`9`: a digit filled in while solving
/// - `.`, `0` or `_`: an empty cell
/// - whitespace is ignored
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use stepwise_core::{Cell, Digit, Grid};
///
/// let grid = Grid::from_str(
///     "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
///     ",
/// )?;
/// assert_eq!(grid.value(Cell::new(0, 0)), Some(Digit::D5));
/// assert!(!grid.candidates_at(Cell::new(0, 2)).contains(Digit::D5));
///
/// let validation = grid.exactly_validate().unwrap();
/// assert!(!validation.is_sukaku);
/// assert!(validation.solution.is_solved());
/// # Ok::<(), stepwise_core::ParseGridError>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    values: [Option<Digit>; 81],
    givens: CellSet,
    candidates: [DigitSet; 81],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid where every cell holds all nine candidates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: [None; 81],
            givens: CellSet::EMPTY,
            candidates: [DigitSet::FULL; 81],
        }
    }

    /// Returns the state of a cell.
    #[must_use]
    pub fn state(&self, cell: Cell) -> CellState {
        match self.values[cell.index()] {
            None => CellState::Empty,
            Some(digit) if self.givens.contains(cell) => CellState::Given(digit),
            Some(digit) => CellState::Modifiable(digit),
        }
    }

    /// Returns the digit of a cell, if filled.
    #[must_use]
    pub fn value(&self, cell: Cell) -> Option<Digit> {
        self.values[cell.index()]
    }

    /// Returns the given cells.
    #[must_use]
    pub fn givens(&self) -> CellSet {
        self.givens
    }

    /// Returns the candidates of a cell. Filled cells have none.
    #[must_use]
    pub fn candidates_at(&self, cell: Cell) -> DigitSet {
        self.candidates[cell.index()]
    }

    /// Returns the empty cells still holding `digit` as a candidate.
    #[must_use]
    pub fn candidates_map(&self, digit: Digit) -> CellSet {
        Cell::ALL
            .into_iter()
            .filter(|cell| self.candidates[cell.index()].contains(digit))
            .collect()
    }

    /// Returns whether `digit` is a candidate of `cell`, or `None` if the cell is filled.
    #[must_use]
    pub fn exists(&self, cell: Cell, digit: Digit) -> Option<bool> {
        match self.values[cell.index()] {
            Some(_) => None,
            None => Some(self.candidates[cell.index()].contains(digit)),
        }
    }

    /// Returns the empty cells.
    #[must_use]
    pub fn empty_cells(&self) -> CellSet {
        Cell::ALL
            .into_iter()
            .filter(|cell| self.values[cell.index()].is_none())
            .collect()
    }

    /// Returns the empty cells holding exactly two candidates.
    #[must_use]
    pub fn bivalue_cells(&self) -> CellSet {
        Cell::ALL
            .into_iter()
            .filter(|cell| self.candidates[cell.index()].len() == 2)
            .collect()
    }

    /// Returns the total number of candidates over all empty cells.
    #[must_use]
    pub fn candidates_count(&self) -> usize {
        self.candidates.iter().map(|c| c.len()).sum()
    }

    /// Returns `true` if every cell is filled and no house repeats a digit.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.values.iter().all(Option::is_some) && !self.has_conflicts()
    }

    /// Returns `true` if some house contains the same digit twice.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        House::ALL.into_iter().any(|house| {
            let mut seen = DigitSet::EMPTY;
            house
                .cells()
                .iter()
                .filter_map(|cell| self.values[cell.index()])
                .any(|digit| !seen.insert(digit))
        })
    }

    /// Fills a cell as a given digit.
    pub fn set_given(&mut self, cell: Cell, digit: Digit) {
        self.fill(cell, digit);
        self.givens.insert(cell);
    }

    /// Fills a cell with a solved digit and removes it from the peers' candidates.
    pub fn set_digit(&mut self, cell: Cell, digit: Digit) {
        self.fill(cell, digit);
        self.givens.remove(cell);
    }

    fn fill(&mut self, cell: Cell, digit: Digit) {
        self.values[cell.index()] = Some(digit);
        self.candidates[cell.index()] = DigitSet::EMPTY;
        for peer in cell.peers() {
            self.candidates[peer.index()].remove(digit);
        }
    }

    /// Removes a candidate from an empty cell, returning `true` if it was present.
    pub fn eliminate(&mut self, cell: Cell, digit: Digit) -> bool {
        self.candidates[cell.index()].remove(digit)
    }

    /// Returns `true` if applying the conclusion would change the grid.
    #[must_use]
    pub fn is_applicable(&self, conclusion: Conclusion) -> bool {
        match conclusion.kind {
            ConclusionKind::Assignment => self.values[conclusion.cell.index()].is_none(),
            ConclusionKind::Elimination => {
                self.exists(conclusion.cell, conclusion.digit) == Some(true)
            }
        }
    }

    /// Applies a conclusion, returning `true` if the grid changed.
    pub fn apply(&mut self, conclusion: Conclusion) -> bool {
        if !self.is_applicable(conclusion) {
            return false;
        }
        match conclusion.kind {
            ConclusionKind::Assignment => self.set_digit(conclusion.cell, conclusion.digit),
            ConclusionKind::Elimination => {
                self.eliminate(conclusion.cell, conclusion.digit);
            }
        }
        true
    }

    /// Checks that the puzzle has exactly one solution.
    ///
    /// The filled digits are tried first on their own; if they do not pin down
    /// a unique solution, the candidates of the empty cells are respected as
    /// well and the puzzle is reported as a sukaku. Returns `None` when neither
    /// reading yields exactly one solution, including when the filled digits
    /// already conflict.
    #[must_use]
    pub fn exactly_validate(&self) -> Option<Validation> {
        let digits_only = backtrack::count_solutions(&self.values, &[DigitSet::FULL; 81], 2);
        if let Some(solution) = digits_only.unique() {
            return Some(Validation {
                solution: self.solved_with(&solution),
                is_sukaku: false,
            });
        }
        let with_candidates = backtrack::count_solutions(&self.values, &self.candidates, 2);
        with_candidates.unique().map(|solution| Validation {
            solution: self.solved_with(&solution),
            is_sukaku: true,
        })
    }

    fn solved_with(&self, digits: &[Digit; 81]) -> Self {
        Self {
            values: digits.map(Some),
            givens: self.givens,
            candidates: [DigitSet::EMPTY; 81],
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({self})")
    }
}

impl Display for Grid {
    /// Writes the 81-character form; `{:#}` writes nine grouped rows instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in Cell::ALL {
            if f.alternate() && cell.column() == 0 && cell.row() > 0 {
                f.write_str("\n")?;
            } else if f.alternate() && cell.column() > 0 && cell.column() % 3 == 0 {
                f.write_str(" ")?;
            }
            match self.state(cell) {
                CellState::Empty => f.write_str(".")?,
                CellState::Given(digit) => write!(f, "{digit}")?,
                CellState::Modifiable(digit) => write!(f, "+{digit}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells: Vec<CellState> = Vec::with_capacity(81);
        let mut chars = s.chars().enumerate();
        while let Some((position, ch)) = chars.next() {
            let state = match ch {
                c if c.is_whitespace() => continue,
                '.' | '0' | '_' => CellState::Empty,
                '1'..='9' => CellState::Given(parse_digit(ch)),
                '+' => match chars.next() {
                    Some((_, d @ '1'..='9')) => CellState::Modifiable(parse_digit(d)),
                    _ => return Err(ParseGridError::DanglingModifier { position }),
                },
                character => {
                    return Err(ParseGridError::InvalidCharacter {
                        character,
                        position,
                    });
                }
            };
            cells.push(state);
        }
        if cells.len() != 81 {
            return Err(ParseGridError::InvalidLength { count: cells.len() });
        }

        let mut grid = Self::new();
        for (cell, state) in Cell::ALL.into_iter().zip(cells) {
            match state {
                CellState::Empty => {}
                CellState::Given(digit) => grid.set_given(cell, digit),
                CellState::Modifiable(digit) => grid.set_digit(cell, digit),
            }
        }
        Ok(grid)
    }
}

fn parse_digit(ch: char) -> Digit {
    Digit::from_index(ch as usize - '1' as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str = "
        53_ _7_ ___
        6__ 195 ___
        _98 ___ _6_
        8__ _6_ __3
        4__ 8_3 __1
        7__ _2_ __6
        _6_ ___ 28_
        ___ 419 __5
        ___ _8_ _79
    ";

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_parse_and_display() {
        let grid = Grid::from_str(PUZZLE).unwrap();
        assert_eq!(grid.state(Cell::new(0, 0)), CellState::Given(Digit::D5));
        assert_eq!(grid.state(Cell::new(0, 2)), CellState::Empty);
        assert_eq!(grid.empty_cells().len(), 51);
        let text = grid.to_string();
        assert_eq!(text.len(), 81);
        assert_eq!(Grid::from_str(&text).unwrap(), grid);
        assert_eq!(Grid::from_str(&format!("{grid:#}")).unwrap(), grid);
    }

    #[test]
    fn test_parse_modifiable() {
        let text = format!("+5{}", ".".repeat(80));
        let grid = Grid::from_str(&text).unwrap();
        assert_eq!(
            grid.state(Cell::new(0, 0)),
            CellState::Modifiable(Digit::D5)
        );
        assert!(grid.givens().is_empty());
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Grid::from_str("12x"),
            Err(ParseGridError::InvalidCharacter {
                character: 'x',
                position: 2
            })
        );
        assert_eq!(
            Grid::from_str("1+."),
            Err(ParseGridError::DanglingModifier { position: 1 })
        );
        assert_eq!(
            Grid::from_str("123"),
            Err(ParseGridError::InvalidLength { count: 3 })
        );
    }

    #[test]
    fn test_fill_updates_peer_candidates() {
        let mut grid = Grid::new();
        grid.set_digit(Cell::new(4, 4), Digit::D5);
        assert_eq!(grid.exists(Cell::new(4, 0), Digit::D5), Some(false));
        assert_eq!(grid.exists(Cell::new(3, 3), Digit::D5), Some(false));
        assert_eq!(grid.exists(Cell::new(0, 0), Digit::D5), Some(true));
        assert_eq!(grid.exists(Cell::new(4, 4), Digit::D5), None);
        assert_eq!(grid.candidates_map(Digit::D5).len(), 80 - 20);
        assert_eq!(grid.candidates_count(), 80 * 9 - 20);
    }

    #[test]
    fn test_apply_conclusions() {
        let mut grid = Grid::new();
        let cell = Cell::new(0, 0);
        assert!(grid.apply(Conclusion::elimination(cell, Digit::D1)));
        assert!(!grid.apply(Conclusion::elimination(cell, Digit::D1)));
        assert!(grid.apply(Conclusion::assignment(cell, Digit::D2)));
        assert!(!grid.apply(Conclusion::assignment(cell, Digit::D3)));
        assert!(!grid.is_applicable(Conclusion::elimination(cell, Digit::D2)));
    }

    #[test]
    fn test_exactly_validate_unique() {
        let grid = Grid::from_str(PUZZLE).unwrap();
        let validation = grid.exactly_validate().unwrap();
        assert!(!validation.is_sukaku);
        assert_eq!(
            validation.solution.to_string().replace('+', ""),
            SOLUTION
        );
        assert_eq!(validation.solution.givens(), grid.givens());
    }

    #[test]
    fn test_exactly_validate_rejects_multiple_solutions() {
        assert!(Grid::new().exactly_validate().is_none());
    }

    #[test]
    fn test_exactly_validate_rejects_conflicts() {
        // Full grid with the first two cells swapped: rows stay valid,
        // columns and boxes do not.
        let mut text: Vec<char> = SOLUTION.chars().collect();
        text.swap(0, 9);
        let grid = Grid::from_str(&text.into_iter().collect::<String>()).unwrap();
        assert!(grid.has_conflicts());
        assert!(!grid.is_solved());
        assert!(grid.exactly_validate().is_none());
    }

    #[test]
    fn test_exactly_validate_sukaku() {
        // r4c6=1, r4c9=3, r5c6=3, r5c9=1 form a swappable rectangle, so
        // clearing those cells leaves exactly two solutions.
        let solution = Grid::from_str(SOLUTION).unwrap();
        let rectangle = [
            Cell::new(3, 5),
            Cell::new(3, 8),
            Cell::new(4, 5),
            Cell::new(4, 8),
        ];
        let mut grid = Grid::new();
        for cell in Cell::ALL {
            if let Some(digit) = solution.value(cell)
                && !rectangle.contains(&cell)
            {
                grid.set_given(cell, digit);
            }
        }
        assert_eq!(
            grid.candidates_at(Cell::new(3, 5)),
            DigitSet::from_iter([Digit::D1, Digit::D3])
        );
        assert!(grid.exactly_validate().is_none());

        // Eliminating one reading leaves a single solution through candidates only.
        assert!(grid.eliminate(Cell::new(3, 5), Digit::D3));
        let validation = grid.exactly_validate().unwrap();
        assert!(validation.is_sukaku);
        assert_eq!(validation.solution.value(Cell::new(3, 5)), Some(Digit::D1));
        assert_eq!(validation.solution.value(Cell::new(4, 8)), Some(Digit::D1));
    }
}
