//! Steps produced by searchers.

use std::fmt::{self, Debug, Display};

use stepwise_core::Conclusion;

use crate::{Difficulty, DifficultyLevel, Technique};

/// A deduction found by a searcher.
///
/// Steps are immutable once produced. Their conclusions are checked against
/// the solution before the analyzer applies them.
pub trait Step: Debug + Display + Send + Sync {
    /// Returns the technique that produced this step.
    fn technique(&self) -> Technique;

    /// Returns the assignments and eliminations of the step.
    fn conclusions(&self) -> &[Conclusion];

    /// Returns a boxed clone of the step.
    fn clone_box(&self) -> BoxedStep;

    /// Returns the rating of the step.
    fn difficulty(&self) -> Difficulty {
        self.technique().base_difficulty()
    }

    /// Returns the difficulty band of the step.
    fn difficulty_level(&self) -> DifficultyLevel {
        self.technique().difficulty_level()
    }

    /// Returns `true` if the step is a full house, hidden single or naked single.
    fn is_single(&self) -> bool {
        self.technique().is_single()
    }
}

/// A boxed step.
pub type BoxedStep = Box<dyn Step>;

impl Clone for BoxedStep {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl PartialEq for dyn Step {
    fn eq(&self, other: &Self) -> bool {
        self.technique() == other.technique()
            && self.difficulty() == other.difficulty()
            && self.conclusions() == other.conclusions()
    }
}

impl Eq for dyn Step {}

/// Step data for techniques without a structured payload.
///
/// # Examples
///
/// ```
/// use stepwise_analytics::{Step as _, StepData, Technique};
/// use stepwise_core::{Cell, Conclusion, Digit};
///
/// let step = StepData::new(
///     Technique::NakedSingle,
///     "r1c1",
///     vec![Conclusion::assignment(Cell::new(0, 0), Digit::D4)],
/// );
/// assert_eq!(step.to_string(), "Naked Single: r1c1 => r1c1 = 4");
/// assert_eq!(step.difficulty().to_string(), "2.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepData {
    technique: Technique,
    description: String,
    conclusions: Vec<Conclusion>,
}

impl StepData {
    /// Creates a step. `description` names the cells and digits that justify it.
    #[must_use]
    pub fn new(
        technique: Technique,
        description: impl Into<String>,
        conclusions: Vec<Conclusion>,
    ) -> Self {
        Self {
            technique,
            description: description.into(),
            conclusions,
        }
    }

    /// Returns the description of the pattern.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Step for StepData {
    fn technique(&self) -> Technique {
        self.technique
    }

    fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    fn clone_box(&self) -> BoxedStep {
        Box::new(self.clone())
    }
}

impl Display for StepData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} => ", self.technique, self.description)?;
        write_conclusions(f, &self.conclusions)
    }
}

/// Writes conclusions separated by commas.
pub(crate) fn write_conclusions(
    f: &mut fmt::Formatter<'_>,
    conclusions: &[Conclusion],
) -> fmt::Result {
    for (i, conclusion) in conclusions.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{conclusion}")?;
    }
    Ok(())
}
