//! Conclusions produced by logical deductions.

use std::fmt::{self, Display};

use crate::{Candidate, Cell, Digit};

/// The kind of a [`Conclusion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConclusionKind {
    /// Fill the cell with the digit.
    Assignment,
    /// Remove the digit from the cell's candidates.
    Elimination,
}

/// A single assignment or elimination implied by a step.
///
/// # Examples
///
/// ```
/// use stepwise_core::{Cell, Conclusion, Digit};
///
/// let assignment = Conclusion::assignment(Cell::new(0, 0), Digit::D4);
/// let elimination = Conclusion::elimination(Cell::new(2, 3), Digit::D7);
/// assert_eq!(assignment.to_string(), "r1c1 = 4");
/// assert_eq!(elimination.to_string(), "r3c4 <> 7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Conclusion {
    /// Whether this conclusion fills or removes.
    pub kind: ConclusionKind,
    /// Target cell.
    pub cell: Cell,
    /// Target digit.
    pub digit: Digit,
}

impl Conclusion {
    /// Creates an assignment.
    #[must_use]
    pub const fn assignment(cell: Cell, digit: Digit) -> Self {
        Self {
            kind: ConclusionKind::Assignment,
            cell,
            digit,
        }
    }

    /// Creates an elimination.
    #[must_use]
    pub const fn elimination(cell: Cell, digit: Digit) -> Self {
        Self {
            kind: ConclusionKind::Elimination,
            cell,
            digit,
        }
    }

    /// Returns the targeted candidate.
    #[must_use]
    pub const fn candidate(self) -> Candidate {
        Candidate::new(self.cell, self.digit)
    }

    /// Returns `true` for assignments.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(self.kind, ConclusionKind::Assignment)
    }
}

impl Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            ConclusionKind::Assignment => "=",
            ConclusionKind::Elimination => "<>",
        };
        write!(f, "{} {op} {}", self.cell, self.digit)
    }
}
