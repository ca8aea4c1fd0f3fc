//! Technique catalog and difficulty ratings.

use std::{
    fmt::{self, Display},
    iter::Sum,
    ops::Add,
};

/// A difficulty rating with one decimal place.
///
/// Stored as tenths so ratings compare and sum exactly.
///
/// # Examples
///
/// ```
/// use stepwise_analytics::Difficulty;
///
/// let total: Difficulty = [Difficulty::from_tenths(23), Difficulty::from_tenths(12)]
///     .into_iter()
///     .sum();
/// assert_eq!(total.to_string(), "3.5");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u32);

impl Difficulty {
    /// The zero rating.
    pub const ZERO: Self = Self(0);

    /// The rating reported for puzzles the analyzer could not finish.
    pub const UNSOLVED: Self = Self(200);

    /// Creates a rating from tenths of a point.
    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// Returns the rating in tenths of a point.
    #[must_use]
    pub const fn tenths(self) -> u32 {
        self.0
    }

    /// Returns the rating as a floating-point number.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

impl Add for Difficulty {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Difficulty {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Coarse difficulty bands.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub enum DifficultyLevel {
    /// Not rated, e.g. the puzzle was not solved.
    #[default]
    #[display("unknown")]
    Unknown,
    /// Singles only.
    #[display("easy")]
    Easy,
    /// Locked candidates and pairs.
    #[display("moderate")]
    Moderate,
    /// Triples and fish.
    #[display("hard")]
    Hard,
    /// Chains and loops.
    #[display("fiendish")]
    Fiendish,
}

/// A named solving technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Technique {
    /// The last empty cell of a house.
    FullHouse,
    /// A digit with one place left in a box.
    HiddenSingleBlock,
    /// A digit with one place left in a row.
    HiddenSingleRow,
    /// A digit with one place left in a column.
    HiddenSingleColumn,
    /// A cell with one candidate left.
    NakedSingle,
    /// A box confines a digit to one line.
    Pointing,
    /// A line confines a digit to one box.
    Claiming,
    /// Two cells of a house hold the same two candidates.
    NakedPair,
    /// Two digits of a house share the same two cells.
    HiddenPair,
    /// Three cells of a house hold three candidates between them.
    NakedTriple,
    /// Three digits of a house share three cells.
    HiddenTriple,
    /// Size-2 basic fish.
    XWing,
    /// Size-3 basic fish.
    Swordfish,
    /// A single-digit chain.
    XChain,
    /// A chain of bivalue cells.
    XyChain,
    /// `(a=b)-b=b-(b=a)`.
    WWing,
    /// Medusa wing.
    MWing,
    /// Split wing.
    SWing,
    /// Local wing.
    LWing,
    /// Hybrid wing.
    HWing,
    /// A general alternating inference chain.
    Aic,
    /// An alternating inference chain using grouped nodes.
    GroupedAic,
    /// A closed alternating inference loop.
    ContinuousNiceLoop,
    /// A closed loop using grouped nodes.
    GroupedContinuousNiceLoop,
}

impl Technique {
    /// Returns the display name of the technique.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullHouse => "Full House",
            Self::HiddenSingleBlock => "Hidden Single (Block)",
            Self::HiddenSingleRow => "Hidden Single (Row)",
            Self::HiddenSingleColumn => "Hidden Single (Column)",
            Self::NakedSingle => "Naked Single",
            Self::Pointing => "Locked Candidates (Pointing)",
            Self::Claiming => "Locked Candidates (Claiming)",
            Self::NakedPair => "Naked Pair",
            Self::HiddenPair => "Hidden Pair",
            Self::NakedTriple => "Naked Triple",
            Self::HiddenTriple => "Hidden Triple",
            Self::XWing => "X-Wing",
            Self::Swordfish => "Swordfish",
            Self::XChain => "X-Chain",
            Self::XyChain => "XY-Chain",
            Self::WWing => "W-Wing",
            Self::MWing => "M-Wing",
            Self::SWing => "S-Wing",
            Self::LWing => "L-Wing",
            Self::HWing => "H-Wing",
            Self::Aic => "Alternating Inference Chain",
            Self::GroupedAic => "Grouped Alternating Inference Chain",
            Self::ContinuousNiceLoop => "Continuous Nice Loop",
            Self::GroupedContinuousNiceLoop => "Grouped Continuous Nice Loop",
        }
    }

    /// Returns the base rating before any length or complexity bonus.
    #[must_use]
    pub const fn base_difficulty(self) -> Difficulty {
        let tenths = match self {
            Self::FullHouse => 10,
            Self::HiddenSingleBlock => 12,
            Self::HiddenSingleRow | Self::HiddenSingleColumn => 15,
            Self::NakedSingle => 23,
            Self::Pointing => 26,
            Self::Claiming => 28,
            Self::NakedPair => 30,
            Self::XWing => 32,
            Self::HiddenPair => 34,
            Self::NakedTriple => 36,
            Self::Swordfish => 38,
            Self::HiddenTriple => 40,
            Self::WWing => 44,
            Self::MWing => 45,
            Self::SWing | Self::LWing | Self::HWing | Self::XChain | Self::XyChain => 46,
            Self::Aic | Self::ContinuousNiceLoop => 47,
            Self::GroupedAic | Self::GroupedContinuousNiceLoop => 49,
        };
        Difficulty::from_tenths(tenths)
    }

    /// Returns the difficulty band of the technique.
    #[must_use]
    pub const fn difficulty_level(self) -> DifficultyLevel {
        match self {
            Self::FullHouse
            | Self::HiddenSingleBlock
            | Self::HiddenSingleRow
            | Self::HiddenSingleColumn
            | Self::NakedSingle => DifficultyLevel::Easy,
            Self::Pointing | Self::Claiming | Self::NakedPair | Self::HiddenPair => {
                DifficultyLevel::Moderate
            }
            Self::NakedTriple | Self::HiddenTriple | Self::XWing | Self::Swordfish => {
                DifficultyLevel::Hard
            }
            Self::XChain
            | Self::XyChain
            | Self::WWing
            | Self::MWing
            | Self::SWing
            | Self::LWing
            | Self::HWing
            | Self::Aic
            | Self::GroupedAic
            | Self::ContinuousNiceLoop
            | Self::GroupedContinuousNiceLoop => DifficultyLevel::Fiendish,
        }
    }

    /// Returns `true` for full houses, hidden singles and naked singles.
    #[must_use]
    pub const fn is_single(self) -> bool {
        matches!(self.difficulty_level(), DifficultyLevel::Easy)
    }
}

impl Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the length bonus of a chain or loop with `len` nodes.
///
/// Nothing is added up to four nodes; beyond that each step of the
/// alternating 4, 6, 8, 12, 16, 24, ... ladder adds a tenth.
#[must_use]
pub fn length_bonus(len: usize) -> Difficulty {
    let mut tenths = 0;
    let mut ceiling = 4;
    let mut grow_by_half = true;
    while len > ceiling {
        tenths += 1;
        ceiling = if grow_by_half {
            ceiling * 3 / 2
        } else {
            ceiling * 4 / 3
        };
        grow_by_half = !grow_by_half;
    }
    Difficulty::from_tenths(tenths)
}
