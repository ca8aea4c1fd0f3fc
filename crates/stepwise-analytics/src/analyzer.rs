//! The step-by-step analysis engine.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::Instant,
};

use portable_atomic::AtomicBool;
use stepwise_core::{Conclusion, ConclusionKind, Grid, Validation};

use crate::{
    AnalysisContext, AnalyzerResult, BoxedStep, Cancelled, FailedReason, LookupCache,
    SearcherError,
    searcher::{BoxedStepSearcher, RunningArea, StepSearcher, StepSearcherMetadata, StepSearcherPool},
};

/// A shared flag for stopping an analysis from another thread.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, portable_atomic::Ordering::Relaxed);
    }

    /// Returns `true` once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(portable_atomic::Ordering::Relaxed)
    }
}

/// Options of an [`Analyzer`].
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Collect every step of a searcher and apply all of them in one pass,
    /// instead of applying the first step found.
    pub full_applying: bool,
    /// Skip searchers marked slow.
    pub ignore_slow_algorithms: bool,
    /// Skip searchers marked high-allocation.
    pub ignore_high_allocation_algorithms: bool,
    /// Searchers to run instead of the built-in pool.
    pub custom_step_searchers: Option<Vec<BoxedStepSearcher>>,
}

/// Solves a puzzle step by step with human-style techniques.
///
/// Before searching, the puzzle is checked for a unique solution. Every step
/// is verified against that solution before it is applied, so a faulty
/// searcher ends the analysis with [`FailedReason::WrongStep`] instead of
/// corrupting the grid.
///
/// # Examples
///
/// ```
/// use stepwise_analytics::Analyzer;
/// use stepwise_core::Grid;
///
/// let puzzle: Grid = "\
///     53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
///     .parse()?;
/// let result = Analyzer::new().analyze(&puzzle)?;
/// assert!(result.is_solved());
/// println!("{result}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

enum Outcome {
    Solved,
    Failed(FailedReason),
    Cancelled,
}

impl Analyzer {
    /// Creates an analyzer with the built-in searchers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer from a configuration.
    #[must_use]
    pub fn from_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Applies every step a searcher finds in one pass.
    #[must_use]
    pub fn with_full_applying(mut self, full_applying: bool) -> Self {
        self.config.full_applying = full_applying;
        self
    }

    /// Skips searchers marked slow.
    #[must_use]
    pub fn with_ignore_slow_algorithms(mut self, ignore: bool) -> Self {
        self.config.ignore_slow_algorithms = ignore;
        self
    }

    /// Skips searchers marked high-allocation.
    #[must_use]
    pub fn with_ignore_high_allocation_algorithms(mut self, ignore: bool) -> Self {
        self.config.ignore_high_allocation_algorithms = ignore;
        self
    }

    /// Runs `searchers` instead of the built-in pool.
    #[must_use]
    pub fn with_custom_step_searchers(mut self, searchers: Vec<BoxedStepSearcher>) -> Self {
        self.config.custom_step_searchers = Some(searchers);
        self
    }

    /// Analyzes a puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if a searcher reported a cancellation that was
    /// not requested through a [`CancellationToken`].
    pub fn analyze(&self, puzzle: &Grid) -> Result<AnalyzerResult, Cancelled> {
        self.analyze_with(puzzle, |_| {}, &CancellationToken::new())
    }

    /// Analyzes a puzzle, reporting progress and honoring cancellation.
    ///
    /// `progress` receives the fraction of the initial candidates removed so
    /// far after each applied step. The token is checked before every pass
    /// and after every applied step; a cancelled analysis ends with
    /// [`FailedReason::UserCancelled`].
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if a searcher reported a cancellation that was
    /// not requested through `cancellation`.
    pub fn analyze_with(
        &self,
        puzzle: &Grid,
        mut progress: impl FnMut(f64),
        cancellation: &CancellationToken,
    ) -> Result<AnalyzerResult, Cancelled> {
        let start = Instant::now();
        let mut result = AnalyzerResult::new(puzzle.clone());

        let Some(Validation {
            solution,
            is_sukaku,
        }) = puzzle.exactly_validate()
        else {
            log::info!("puzzle has no unique solution: {puzzle}");
            result.failed_reason = Some(FailedReason::PuzzleIsInvalid);
            result.elapsed = start.elapsed();
            return Ok(result);
        };

        let pool;
        let searchers = match &self.config.custom_step_searchers {
            Some(custom) => {
                pool = StepSearcherPool::new(custom.clone());
                &pool
            }
            None => StepSearcherPool::built_in(),
        };
        let outcome = Run {
            config: &self.config,
            solution: &solution,
            is_sukaku,
            cancellation,
            progress: &mut progress,
            result: &mut result,
        }
        .solve(searchers);

        result.solution = Some(solution);
        result.elapsed = start.elapsed();
        match outcome {
            Outcome::Solved => {
                result.is_solved = true;
                log::info!(
                    "solved in {} steps, rated {}",
                    result.steps_count(),
                    result.max_difficulty()
                );
            }
            Outcome::Failed(reason) => {
                log::info!("analysis failed after {} steps: {reason}", result.steps_count());
                result.failed_reason = Some(reason);
            }
            Outcome::Cancelled => return Err(Cancelled),
        }
        Ok(result)
    }
}

struct Run<'a, P> {
    config: &'a AnalyzerConfig,
    solution: &'a Grid,
    is_sukaku: bool,
    cancellation: &'a CancellationToken,
    progress: &'a mut P,
    result: &'a mut AnalyzerResult,
}

impl<P> Run<'_, P>
where
    P: FnMut(f64),
{
    fn solve(&mut self, pool: &StepSearcherPool) -> Outcome {
        let mut playground = self.result.puzzle.clone();
        let initial_count = playground.candidates_count();

        'pass: loop {
            if self.cancellation.is_cancelled() {
                return Outcome::Failed(FailedReason::UserCancelled);
            }
            if playground.is_solved() {
                return Outcome::Solved;
            }
            let cache = LookupCache::new(&playground);

            for searcher in pool.iter() {
                let metadata = searcher.metadata();
                if !self.should_run(metadata) {
                    log::trace!("skipping {}", metadata.name());
                    continue;
                }
                let steps = match self.run_searcher(&**searcher, &playground, &cache) {
                    Ok(steps) => steps,
                    Err(error) => return self.fail(metadata, error),
                };

                let mut advanced = false;
                for step in steps {
                    if let Some(conclusion) = step
                        .conclusions()
                        .iter()
                        .copied()
                        .find(|&c| !agrees_with(self.solution, c))
                    {
                        log::warn!(
                            "{} produced a wrong step ({conclusion} is false): {step}",
                            metadata.name()
                        );
                        self.result.wrong_step = Some(step);
                        self.result.wrong_step_grid = Some(playground);
                        return Outcome::Failed(FailedReason::WrongStep);
                    }
                    if !step.conclusions().iter().any(|&c| playground.is_applicable(c)) {
                        continue;
                    }

                    log::debug!("({}) {step}", step.difficulty());
                    self.result.step_grids.push(playground.clone());
                    for &conclusion in step.conclusions() {
                        playground.apply(conclusion);
                    }
                    self.result.steps.push(step);
                    (*self.progress)(progress_of(initial_count, playground.candidates_count()));
                    if playground.is_solved() {
                        return Outcome::Solved;
                    }
                    if self.cancellation.is_cancelled() {
                        return Outcome::Failed(FailedReason::UserCancelled);
                    }
                    advanced = true;
                }

                if advanced {
                    log::debug!("restarting from the first searcher");
                    continue 'pass;
                }
            }

            return Outcome::Failed(FailedReason::PuzzleIsTooHard);
        }
    }

    fn should_run(&self, metadata: &StepSearcherMetadata) -> bool {
        metadata.is_enabled()
            && metadata.running_area().contains(RunningArea::SEARCHING)
            && (metadata.supports_sukaku() || !self.is_sukaku)
            && !(self.config.ignore_slow_algorithms && metadata.is_slow())
            && !(self.config.ignore_high_allocation_algorithms && metadata.is_high_allocation())
    }

    fn run_searcher(
        &self,
        searcher: &dyn StepSearcher,
        grid: &Grid,
        cache: &LookupCache,
    ) -> Result<Vec<BoxedStep>, SearcherError> {
        let full_applying = self.config.full_applying;
        let run = || -> Result<Vec<BoxedStep>, SearcherError> {
            if full_applying {
                let mut steps = vec![];
                let mut context = AnalysisContext::with_accumulator(grid, cache, &mut steps);
                let last = searcher.collect(&mut context)?;
                steps.extend(last);
                Ok(steps)
            } else {
                let mut context = AnalysisContext::new(grid, cache);
                Ok(searcher.collect(&mut context)?.into_iter().collect())
            }
        };
        panic::catch_unwind(AssertUnwindSafe(run))
            .unwrap_or_else(|payload| Err(SearcherError::failed(panic_message(&*payload))))
    }

    fn fail(&mut self, metadata: &StepSearcherMetadata, error: SearcherError) -> Outcome {
        log::warn!("{} failed: {error}", metadata.name());
        match error {
            SearcherError::NotImplemented | SearcherError::NotSupported => {
                Outcome::Failed(FailedReason::NotImplemented)
            }
            SearcherError::Cancelled if self.cancellation.is_cancelled() => {
                Outcome::Failed(FailedReason::UserCancelled)
            }
            SearcherError::Cancelled => Outcome::Cancelled,
            SearcherError::Failed { .. } => {
                self.result.unhandled_error = Some(error);
                Outcome::Failed(FailedReason::ExceptionThrown)
            }
        }
    }
}

/// Returns `true` if `conclusion` holds in the solved grid.
fn agrees_with(solution: &Grid, conclusion: Conclusion) -> bool {
    let solved = solution.value(conclusion.cell);
    match conclusion.kind {
        ConclusionKind::Assignment => solved == Some(conclusion.digit),
        ConclusionKind::Elimination => solved != Some(conclusion.digit),
    }
}

#[expect(clippy::cast_precision_loss)]
fn progress_of(initial_count: usize, current_count: usize) -> f64 {
    if initial_count == 0 {
        return 1.0;
    }
    (initial_count - current_count) as f64 / initial_count as f64
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "searcher panicked".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use proptest::prelude::*;
    use stepwise_core::{Cell, Digit};

    use super::*;
    use crate::{
        StepData, Technique,
        searcher::{ConditionalCases, Singles},
    };

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
    const PUZZLE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    fn grid(s: &str) -> Grid {
        Grid::from_str(s).unwrap()
    }

    fn digits(grid: &Grid) -> [Option<Digit>; 81] {
        Cell::ALL.map(|cell| grid.value(cell))
    }

    fn one_missing() -> Grid {
        let mut s = SOLUTION.to_owned();
        s.replace_range(40..41, ".");
        grid(&s)
    }

    /// A searcher that always proposes the same step.
    #[derive(Debug, Clone)]
    struct Fixed {
        metadata: StepSearcherMetadata,
        outcome: Result<Option<StepData>, SearcherError>,
    }

    impl Fixed {
        fn new(outcome: Result<Option<StepData>, SearcherError>) -> Self {
            Self {
                metadata: StepSearcherMetadata::new("Fixed", 0),
                outcome,
            }
        }
    }

    impl StepSearcher for Fixed {
        fn metadata(&self) -> &StepSearcherMetadata {
            &self.metadata
        }

        fn collect(
            &self,
            context: &mut AnalysisContext<'_>,
        ) -> Result<Option<BoxedStep>, SearcherError> {
            match self.outcome.clone()? {
                Some(step) => Ok(context.offer(Box::new(step))),
                None => Ok(None),
            }
        }

        fn clone_box(&self) -> BoxedStepSearcher {
            Box::new(self.clone())
        }
    }

    #[derive(Debug, Clone)]
    struct Panicking(StepSearcherMetadata);

    impl StepSearcher for Panicking {
        fn metadata(&self) -> &StepSearcherMetadata {
            &self.0
        }

        fn collect(&self, _: &mut AnalysisContext<'_>) -> Result<Option<BoxedStep>, SearcherError> {
            panic!("boom");
        }

        fn clone_box(&self) -> BoxedStepSearcher {
            Box::new(self.clone())
        }
    }

    /// A searcher that cancels the analysis it runs in.
    #[derive(Debug, Clone)]
    struct Cancelling(CancellationToken);

    impl StepSearcher for Cancelling {
        fn metadata(&self) -> &StepSearcherMetadata {
            const METADATA: StepSearcherMetadata = StepSearcherMetadata::new("Cancelling", 0);
            &METADATA
        }

        fn collect(&self, _: &mut AnalysisContext<'_>) -> Result<Option<BoxedStep>, SearcherError> {
            self.0.cancel();
            Err(SearcherError::Cancelled)
        }

        fn clone_box(&self) -> BoxedStepSearcher {
            Box::new(self.clone())
        }
    }

    #[test]
    fn test_single_missing_cell() {
        let puzzle = one_missing();
        let result = Analyzer::new().analyze(&puzzle).unwrap();
        assert!(result.is_solved());
        assert_eq!(result.failed_reason(), None);
        assert_eq!(result.steps_count(), 1);
        let step = &result.steps()[0];
        assert_eq!(
            step.conclusions(),
            [Conclusion::assignment(Cell::new(4, 4), Digit::D5)]
        );
        assert_eq!(result.step_grids()[0], puzzle);
        let solution = result.solution().unwrap();
        assert_eq!(digits(solution), digits(&grid(SOLUTION)));
        assert_eq!(solution.givens(), puzzle.givens());
    }

    #[test]
    fn test_progress_reported_for_solving_step() {
        let mut reports = vec![];
        let result = Analyzer::new()
            .analyze_with(&one_missing(), |p| reports.push(p), &CancellationToken::new())
            .unwrap();
        assert!(result.is_solved());
        assert_eq!(reports, [1.0]);
    }

    #[test]
    fn test_solves_classic_puzzle() {
        let mut reports = vec![];
        let result = Analyzer::new()
            .analyze_with(&grid(PUZZLE), |p| reports.push(p), &CancellationToken::new())
            .unwrap();
        assert!(result.is_solved());
        assert_eq!(result.solution().map(digits), Some(digits(&grid(SOLUTION))));
        assert_eq!(result.steps().len(), result.step_grids().len());
        assert_eq!(reports.len(), result.steps_count());
        assert_eq!(reports.last(), Some(&1.0));
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert!(reports.iter().all(|p| (0.0..=1.0).contains(p)));
        for (before, step) in result.solving_path().unwrap() {
            assert!(step.conclusions().iter().any(|&c| before.is_applicable(c)));
        }
    }

    #[test]
    fn test_full_applying_solves_the_same_puzzle() {
        let one_by_one = Analyzer::new().analyze(&grid(PUZZLE)).unwrap();
        let all_at_once = Analyzer::new()
            .with_full_applying(true)
            .analyze(&grid(PUZZLE))
            .unwrap();
        assert!(all_at_once.is_solved());
        assert_eq!(all_at_once.solution(), one_by_one.solution());
    }

    #[test]
    fn test_already_solved() {
        let result = Analyzer::new().analyze(&grid(SOLUTION)).unwrap();
        assert!(result.is_solved());
        assert_eq!(result.steps_count(), 0);
    }

    #[test]
    fn test_wrong_step() {
        let puzzle = one_missing();
        let wrong = StepData::new(
            Technique::NakedSingle,
            "r5c5",
            vec![Conclusion::elimination(Cell::new(4, 4), Digit::D5)],
        );
        let result = Analyzer::new()
            .with_custom_step_searchers(vec![Box::new(Fixed::new(Ok(Some(wrong.clone()))))])
            .analyze(&puzzle)
            .unwrap();
        assert!(!result.is_solved());
        assert_eq!(result.failed_reason(), Some(FailedReason::WrongStep));
        let expected: BoxedStep = Box::new(wrong);
        assert_eq!(result.wrong_step(), Some(&expected));
        assert_eq!(result.wrong_step_grid(), Some(&puzzle));
        assert_eq!(result.steps_count(), 0);
    }

    #[test]
    fn test_pre_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let result = Analyzer::new()
            .analyze_with(&one_missing(), |_| {}, &token)
            .unwrap();
        assert!(!result.is_solved());
        assert_eq!(result.failed_reason(), Some(FailedReason::UserCancelled));
        assert_eq!(result.steps_count(), 0);
    }

    #[test]
    fn test_cancel_from_progress() {
        let token = CancellationToken::new();
        let result = Analyzer::new()
            .analyze_with(&grid(PUZZLE), |_| token.cancel(), &token)
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::UserCancelled));
        assert_eq!(result.steps_count(), 1);
    }

    #[test]
    fn test_invalid_puzzle() {
        // two 5s in the first row
        let mut s = SOLUTION.to_owned();
        s.replace_range(1..2, "5");
        let result = Analyzer::new()
            .with_custom_step_searchers(vec![Box::new(Panicking(StepSearcherMetadata::new(
                "Panicking",
                0,
            )))])
            .analyze(&grid(&s))
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::PuzzleIsInvalid));
        assert!(result.solution().is_none());

        let empty = Analyzer::new().analyze(&Grid::new()).unwrap();
        assert_eq!(empty.failed_reason(), Some(FailedReason::PuzzleIsInvalid));
    }

    #[test]
    fn test_too_hard() {
        let result = Analyzer::new()
            .with_custom_step_searchers(vec![Box::new(Fixed::new(Ok(None)))])
            .analyze(&one_missing())
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::PuzzleIsTooHard));
        assert_eq!(result.max_difficulty(), crate::Difficulty::UNSOLVED);
    }

    #[test]
    fn test_stale_step_is_not_progress() {
        let stale = StepData::new(
            Technique::NakedSingle,
            "r1c1",
            vec![Conclusion::assignment(Cell::new(0, 0), Digit::D5)],
        );
        let result = Analyzer::new()
            .with_custom_step_searchers(vec![Box::new(Fixed::new(Ok(Some(stale))))])
            .analyze(&one_missing())
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::PuzzleIsTooHard));
        assert_eq!(result.steps_count(), 0);
    }

    #[test]
    fn test_searcher_failures() {
        let analyze = |searcher: BoxedStepSearcher| {
            Analyzer::new()
                .with_custom_step_searchers(vec![searcher])
                .analyze(&one_missing())
        };

        let result = analyze(Box::new(Fixed::new(Err(SearcherError::NotSupported)))).unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::NotImplemented));

        let result = analyze(Box::new(Fixed::new(Err(SearcherError::failed("bad")))))
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::ExceptionThrown));
        assert_eq!(
            result.unhandled_error(),
            Some(&SearcherError::failed("bad"))
        );

        let result = analyze(Box::new(Panicking(StepSearcherMetadata::new("Panicking", 0))))
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::ExceptionThrown));
        assert_eq!(
            result.unhandled_error(),
            Some(&SearcherError::failed("boom"))
        );

        assert_eq!(
            analyze(Box::new(Fixed::new(Err(SearcherError::Cancelled)))).unwrap_err(),
            Cancelled
        );
    }

    #[test]
    fn test_searcher_cancellation_with_token() {
        let token = CancellationToken::new();
        let analyzer = Analyzer::new()
            .with_custom_step_searchers(vec![Box::new(Cancelling(token.clone()))]);
        let result = analyzer
            .analyze_with(&one_missing(), |_| {}, &token)
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::UserCancelled));
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_ignore_flags_skip_searchers() {
        let wrong = StepData::new(
            Technique::Aic,
            "r5c5",
            vec![Conclusion::elimination(Cell::new(4, 4), Digit::D5)],
        );
        let mut slow = Fixed::new(Ok(Some(wrong.clone())));
        slow.metadata = StepSearcherMetadata::new("Slow", 0)
            .with_conditional_cases(ConditionalCases::TIME_COMPLEXITY);
        let mut greedy = Fixed::new(Ok(Some(wrong.clone())));
        greedy.metadata = StepSearcherMetadata::new("Greedy", 0)
            .with_conditional_cases(ConditionalCases::SPACE_COMPLEXITY);
        let mut disabled = Fixed::new(Ok(Some(wrong)));
        disabled.metadata = StepSearcherMetadata::new("Disabled", 0).with_enabled(false);

        let searchers: Vec<BoxedStepSearcher> = vec![
            Box::new(slow),
            Box::new(greedy),
            Box::new(disabled),
            Box::new(Singles::new()),
        ];
        let result = Analyzer::new()
            .with_custom_step_searchers(searchers.clone())
            .with_ignore_slow_algorithms(true)
            .with_ignore_high_allocation_algorithms(true)
            .analyze(&one_missing())
            .unwrap();
        assert!(result.is_solved());

        let result = Analyzer::new()
            .with_custom_step_searchers(searchers)
            .analyze(&one_missing())
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::WrongStep));
    }

    #[test]
    fn test_searcher_outside_searching_area_is_skipped() {
        let wrong = StepData::new(
            Technique::NakedSingle,
            "r5c5",
            vec![Conclusion::elimination(Cell::new(4, 4), Digit::D5)],
        );
        let mut gathering = Fixed::new(Ok(Some(wrong)));
        gathering.metadata =
            StepSearcherMetadata::new("Gathering", 0).with_running_area(RunningArea::GATHERING);
        let searchers: Vec<BoxedStepSearcher> =
            vec![Box::new(gathering), Box::new(Singles::new())];
        let result = Analyzer::new()
            .with_custom_step_searchers(searchers)
            .analyze(&one_missing())
            .unwrap();
        assert!(result.is_solved());
        assert_eq!(result.steps_count(), 1);
    }

    #[test]
    fn test_searcher_without_sukaku_support_is_skipped_on_sukaku() {
        // r4c6, r4c9, r5c6 and r5c9 form a swappable 1/3 rectangle; removing
        // 3 from r4c6 makes the solution unique through candidates only.
        let mut s = SOLUTION.to_owned();
        for index in [32, 35, 41, 44] {
            s.replace_range(index..=index, ".");
        }
        let mut sukaku = grid(&s);
        assert!(sukaku.eliminate(Cell::new(3, 5), Digit::D3));
        assert!(sukaku.exactly_validate().unwrap().is_sukaku);

        let wrong = StepData::new(
            Technique::NakedSingle,
            "r4c6",
            vec![Conclusion::elimination(Cell::new(3, 5), Digit::D1)],
        );
        let mut digits_only = Fixed::new(Ok(Some(wrong)));
        digits_only.metadata =
            StepSearcherMetadata::new("Digits only", 0).with_sukaku_support(false);
        let searchers: Vec<BoxedStepSearcher> =
            vec![Box::new(digits_only), Box::new(Singles::new())];

        let result = Analyzer::new()
            .with_custom_step_searchers(searchers.clone())
            .analyze(&sukaku)
            .unwrap();
        assert!(result.is_solved());

        let result = Analyzer::new()
            .with_custom_step_searchers(searchers)
            .analyze(&one_missing())
            .unwrap();
        assert_eq!(result.failed_reason(), Some(FailedReason::WrongStep));
    }

    #[test]
    fn test_analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
        assert_send_sync::<CancellationToken>();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_built_in_steps_agree_with_solution(holes in proptest::collection::vec(0usize..81, 0..40)) {
            let mut s = SOLUTION.as_bytes().to_vec();
            for &i in &holes {
                s[i] = b'.';
            }
            let puzzle = grid(std::str::from_utf8(&s).unwrap());
            let result = Analyzer::new().analyze(&puzzle).unwrap();
            prop_assert!(!matches!(
                result.failed_reason(),
                Some(FailedReason::WrongStep | FailedReason::ExceptionThrown)
            ));
            prop_assert_eq!(result.steps().len(), result.step_grids().len());
            if result.is_solved() {
                prop_assert_eq!(result.solution().map(digits), Some(digits(&grid(SOLUTION))));
            }
        }
    }
}
