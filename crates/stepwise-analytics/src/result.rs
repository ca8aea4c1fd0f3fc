//! Outcome of one analysis.

use std::{
    fmt::{self, Display},
    time::Duration,
};

use stepwise_core::Grid;

use crate::{BoxedStep, Difficulty, DifficultyLevel, SearcherError, Technique};

/// Why an analysis stopped before solving the puzzle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant,
)]
pub enum FailedReason {
    /// The puzzle has no solution or more than one.
    #[display("the puzzle does not have a unique solution")]
    PuzzleIsInvalid,
    /// No searcher could make progress.
    #[display("the puzzle is too hard for the available techniques")]
    PuzzleIsTooHard,
    /// A searcher produced a conclusion that contradicts the solution.
    #[display("a searcher produced a wrong step")]
    WrongStep,
    /// A searcher failed or panicked.
    #[display("a searcher raised an unhandled error")]
    ExceptionThrown,
    /// The cancellation token was triggered.
    #[display("the analysis was cancelled")]
    UserCancelled,
    /// A searcher reported a case it does not implement.
    #[display("a searcher does not implement this case")]
    NotImplemented,
}

/// The solving path and ratings produced by [`Analyzer`](crate::Analyzer).
///
/// Built once per analysis and immutable afterwards.
#[derive(Debug, Clone)]
pub struct AnalyzerResult {
    pub(crate) puzzle: Grid,
    pub(crate) is_solved: bool,
    pub(crate) solution: Option<Grid>,
    pub(crate) steps: Vec<BoxedStep>,
    pub(crate) step_grids: Vec<Grid>,
    pub(crate) failed_reason: Option<FailedReason>,
    pub(crate) elapsed: Duration,
    pub(crate) wrong_step: Option<BoxedStep>,
    pub(crate) wrong_step_grid: Option<Grid>,
    pub(crate) unhandled_error: Option<SearcherError>,
}

impl AnalyzerResult {
    pub(crate) fn new(puzzle: Grid) -> Self {
        Self {
            puzzle,
            is_solved: false,
            solution: None,
            steps: vec![],
            step_grids: vec![],
            failed_reason: None,
            elapsed: Duration::ZERO,
            wrong_step: None,
            wrong_step_grid: None,
            unhandled_error: None,
        }
    }

    /// Returns the analyzed puzzle.
    #[must_use]
    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    /// Returns `true` if the puzzle was solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_solved
    }

    /// Returns the unique solution, if the puzzle has one.
    #[must_use]
    pub fn solution(&self) -> Option<&Grid> {
        self.solution.as_ref()
    }

    /// Returns the applied steps in order.
    #[must_use]
    pub fn steps(&self) -> &[BoxedStep] {
        &self.steps
    }

    /// Returns the grid before each step, parallel to [`steps`](Self::steps).
    #[must_use]
    pub fn step_grids(&self) -> &[Grid] {
        &self.step_grids
    }

    /// Returns why the analysis failed, or `None` if it solved the puzzle.
    #[must_use]
    pub fn failed_reason(&self) -> Option<FailedReason> {
        self.failed_reason
    }

    /// Returns the time the analysis took.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns the step rejected with [`FailedReason::WrongStep`].
    #[must_use]
    pub fn wrong_step(&self) -> Option<&BoxedStep> {
        self.wrong_step.as_ref()
    }

    /// Returns the grid the wrong step was found in.
    #[must_use]
    pub fn wrong_step_grid(&self) -> Option<&Grid> {
        self.wrong_step_grid.as_ref()
    }

    /// Returns the error behind [`FailedReason::ExceptionThrown`].
    #[must_use]
    pub fn unhandled_error(&self) -> Option<&SearcherError> {
        self.unhandled_error.as_ref()
    }

    /// Returns the number of applied steps.
    #[must_use]
    pub fn steps_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns the hardest step's rating, or [`Difficulty::UNSOLVED`] if the
    /// puzzle was not solved.
    #[must_use]
    pub fn max_difficulty(&self) -> Difficulty {
        if !self.is_solved {
            return Difficulty::UNSOLVED;
        }
        self.steps
            .iter()
            .map(|step| step.difficulty())
            .max()
            .unwrap_or(Difficulty::ZERO)
    }

    /// Returns the sum of all step ratings.
    #[must_use]
    pub fn total_difficulty(&self) -> Difficulty {
        self.steps.iter().map(|step| step.difficulty()).sum()
    }

    /// Returns the rating of the first step of a solved puzzle.
    ///
    /// This is how hard it is to make any progress at all.
    #[must_use]
    pub fn pearl_difficulty(&self) -> Difficulty {
        match self.steps.first() {
            Some(step) if self.is_solved => step.difficulty(),
            _ => Difficulty::ZERO,
        }
    }

    /// Returns the hardest rating needed to reach the first single.
    ///
    /// This is how hard it is to place the first digit. Without any single the
    /// result is [`Difficulty::UNSOLVED`].
    #[must_use]
    pub fn diamond_difficulty(&self) -> Difficulty {
        if self.steps.is_empty() {
            return Difficulty::ZERO;
        }
        match self.steps.iter().position(|step| step.is_single()) {
            Some(0) => self.steps[0].difficulty(),
            Some(index) => self.steps[..index]
                .iter()
                .map(|step| step.difficulty())
                .max()
                .unwrap_or(Difficulty::ZERO),
            None => Difficulty::UNSOLVED,
        }
    }

    /// Returns the hardest band over all steps, or
    /// [`DifficultyLevel::Unknown`] if the puzzle was not solved.
    #[must_use]
    pub fn difficulty_level(&self) -> DifficultyLevel {
        if !self.is_solved {
            return DifficultyLevel::Unknown;
        }
        self.steps
            .iter()
            .map(|step| step.difficulty_level())
            .max()
            .unwrap_or_default()
    }

    /// Returns the last step that is not a single, or the first step if
    /// every step is a single.
    #[must_use]
    pub fn bottleneck(&self) -> Option<&BoxedStep> {
        self.steps
            .iter()
            .rev()
            .find(|step| !step.is_single())
            .or_else(|| self.steps.first())
    }

    /// Returns each step with the grid it was found in, if the puzzle was
    /// solved.
    #[must_use]
    pub fn solving_path(&self) -> Option<Vec<(&Grid, &BoxedStep)>> {
        self.is_solved
            .then(|| self.step_grids.iter().zip(&self.steps).collect())
    }

    /// Iterates the steps of one technique.
    pub fn step_by_technique(&self, technique: Technique) -> impl Iterator<Item = &BoxedStep> {
        self.steps
            .iter()
            .filter(move |step| step.technique() == technique)
    }

    /// Returns how often each technique was used, easiest first.
    #[must_use]
    pub fn technique_counts(&self) -> Vec<(Technique, usize)> {
        let mut counts: Vec<(Technique, usize)> = vec![];
        for step in &self.steps {
            match counts.iter_mut().find(|(t, _)| *t == step.technique()) {
                Some((_, count)) => *count += 1,
                None => counts.push((step.technique(), 1)),
            }
        }
        counts.sort_by_key(|(technique, _)| (technique.base_difficulty(), *technique));
        counts
    }
}

impl Display for AnalyzerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Puzzle: {}", self.puzzle)?;
        if !self.steps.is_empty() {
            writeln!(f, "Solving steps:")?;
            for (i, step) in self.steps.iter().enumerate() {
                writeln!(f, "{:>4}: ({}) {step}", i + 1, step.difficulty())?;
            }
        }
        if let Some(step) = self.bottleneck() {
            writeln!(f, "Bottleneck: ({}) {step}", step.difficulty())?;
        }
        let counts = self.technique_counts();
        if !counts.is_empty() {
            writeln!(f, "Techniques used:")?;
            for (technique, count) in counts {
                writeln!(f, "{count:>4} * {technique}")?;
            }
        }
        writeln!(
            f,
            "Difficulty: {}/{}/{} ({}), total {}",
            self.max_difficulty(),
            self.pearl_difficulty(),
            self.diamond_difficulty(),
            self.difficulty_level(),
            self.total_difficulty()
        )?;
        if let Some(solution) = &self.solution {
            writeln!(f, "Solution: {solution}")?;
        }
        match self.failed_reason {
            None if self.is_solved => writeln!(f, "Puzzle has been solved.")?,
            None => writeln!(f, "Puzzle has not been solved.")?,
            Some(reason) => writeln!(f, "Puzzle has not been solved: {reason}.")?,
        }
        if let (Some(step), Some(grid)) = (&self.wrong_step, &self.wrong_step_grid) {
            writeln!(f, "Wrong step: {step}")?;
            writeln!(f, "  found in: {grid}")?;
        }
        if let Some(error) = &self.unhandled_error {
            writeln!(f, "Error: {error}")?;
        }
        write!(f, "Time elapsed: {:.3?}", self.elapsed)
    }
}
