//! Step searchers and the built-in searcher pool.
//!
//! Each searcher implements [`StepSearcher`] and describes itself with a
//! [`StepSearcherMetadata`]. The analyzer runs searchers in ascending
//! priority and restarts from the first one after every applied step.

use std::{fmt::Debug, ops::ControlFlow, sync::OnceLock};

use tinyvec::ArrayVec;

pub use self::{
    chaining::{AlternatingInferenceChain, ChainStep, InferencePattern},
    fish::NormalFish,
    locked_candidates::LockedCandidates,
    singles::Singles,
    subsets::Subsets,
};
use crate::{AnalysisContext, BoxedStep, SearcherError};

mod chaining;
mod fish;
mod locked_candidates;
mod singles;
mod subsets;

bitflags::bitflags! {
    /// Where a searcher may run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RunningArea: u8 {
        /// Step-by-step analysis.
        const SEARCHING = 0b0000_0001;
        /// Collecting every step of a grid at once.
        const GATHERING = 0b0000_0010;
    }
}

bitflags::bitflags! {
    /// Cost traits that configuration can opt out of.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConditionalCases: u8 {
        /// No special cost.
        const STANDARD = 0b0000_0001;
        /// Slow on hard grids.
        const TIME_COMPLEXITY = 0b0000_0010;
        /// Allocates heavily on hard grids.
        const SPACE_COMPLEXITY = 0b0000_0100;
    }
}

/// Static description of a searcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSearcherMetadata {
    name: &'static str,
    priority: u16,
    running_area: RunningArea,
    conditional_cases: ConditionalCases,
    supports_sukaku: bool,
    enabled: bool,
}

impl StepSearcherMetadata {
    /// Creates enabled, sukaku-capable metadata with standard cost.
    #[must_use]
    pub const fn new(name: &'static str, priority: u16) -> Self {
        Self {
            name,
            priority,
            running_area: RunningArea::all(),
            conditional_cases: ConditionalCases::STANDARD,
            supports_sukaku: true,
            enabled: true,
        }
    }

    /// Sets the running area.
    #[must_use]
    pub const fn with_running_area(mut self, running_area: RunningArea) -> Self {
        self.running_area = running_area;
        self
    }

    /// Sets the cost traits.
    #[must_use]
    pub const fn with_conditional_cases(mut self, conditional_cases: ConditionalCases) -> Self {
        self.conditional_cases = conditional_cases;
        self
    }

    /// Sets whether sukaku puzzles are supported.
    #[must_use]
    pub const fn with_sukaku_support(mut self, supports_sukaku: bool) -> Self {
        self.supports_sukaku = supports_sukaku;
        self
    }

    /// Enables or disables the searcher.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns the searcher name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the priority; lower runs first.
    #[must_use]
    pub const fn priority(&self) -> u16 {
        self.priority
    }

    /// Returns the running area.
    #[must_use]
    pub const fn running_area(&self) -> RunningArea {
        self.running_area
    }

    /// Returns the cost traits.
    #[must_use]
    pub const fn conditional_cases(&self) -> ConditionalCases {
        self.conditional_cases
    }

    /// Returns `true` if sukaku puzzles are supported.
    #[must_use]
    pub const fn supports_sukaku(&self) -> bool {
        self.supports_sukaku
    }

    /// Returns `true` if the searcher is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` if the searcher is marked slow.
    #[must_use]
    pub const fn is_slow(&self) -> bool {
        self.conditional_cases
            .contains(ConditionalCases::TIME_COMPLEXITY)
    }

    /// Returns `true` if the searcher is marked high-allocation.
    #[must_use]
    pub const fn is_high_allocation(&self) -> bool {
        self.conditional_cases
            .contains(ConditionalCases::SPACE_COMPLEXITY)
    }
}

/// A technique detector.
pub trait StepSearcher: Debug + Send + Sync {
    /// Returns the metadata of the searcher.
    fn metadata(&self) -> &StepSearcherMetadata;

    /// Searches the context's grid.
    ///
    /// In find-one mode, returns the first step found. Otherwise offers every
    /// step to the context and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`SearcherError`] when the search cannot be carried out.
    fn collect(&self, context: &mut AnalysisContext<'_>) -> Result<Option<BoxedStep>, SearcherError>;

    /// Returns a boxed clone of the searcher.
    fn clone_box(&self) -> BoxedStepSearcher;
}

/// A boxed step searcher.
pub type BoxedStepSearcher = Box<dyn StepSearcher>;

impl Clone for BoxedStepSearcher {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

const BUILT_IN: [fn() -> BoxedStepSearcher; 5] = [
    || Box::new(Singles::new()),
    || Box::new(LockedCandidates::new()),
    || Box::new(Subsets::new()),
    || Box::new(NormalFish::new()),
    || Box::new(AlternatingInferenceChain::new()),
];

/// An ordered set of searchers.
///
/// # Examples
///
/// ```
/// use stepwise_analytics::searcher::StepSearcherPool;
///
/// let pool = StepSearcherPool::built_in();
/// let names: Vec<_> = pool.iter().map(|s| s.metadata().name()).collect();
/// assert_eq!(names.first(), Some(&"Singles"));
/// ```
#[derive(Debug, Clone)]
pub struct StepSearcherPool {
    searchers: Vec<BoxedStepSearcher>,
}

impl StepSearcherPool {
    /// Creates a pool ordered by ascending priority.
    ///
    /// Searchers with equal priority keep their relative order.
    #[must_use]
    pub fn new(mut searchers: Vec<BoxedStepSearcher>) -> Self {
        searchers.sort_by_key(|s| s.metadata().priority());
        Self { searchers }
    }

    /// Returns the built-in searchers, materialized on first use.
    #[must_use]
    pub fn built_in() -> &'static Self {
        static POOL: OnceLock<StepSearcherPool> = OnceLock::new();
        POOL.get_or_init(|| Self::new(BUILT_IN.iter().map(|make| make()).collect()))
    }

    /// Returns the searchers in priority order.
    #[must_use]
    pub fn searchers(&self) -> &[BoxedStepSearcher] {
        &self.searchers
    }

    /// Iterates the searchers in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &BoxedStepSearcher> {
        self.searchers.iter()
    }

    /// Returns the number of searchers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.searchers.len()
    }

    /// Returns `true` if the pool holds no searcher.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.searchers.is_empty()
    }

    /// Finds a searcher by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&BoxedStepSearcher> {
        self.searchers
            .iter()
            .find(|s| s.metadata().name().eq_ignore_ascii_case(name))
    }
}

/// Calls `f` with the indices of every `size`-element combination of `len`
/// items, in lexicographic order, until it breaks.
pub(crate) fn for_each_combination<B>(
    len: usize,
    size: usize,
    mut f: impl FnMut(&[usize]) -> ControlFlow<B>,
) -> ControlFlow<B> {
    if size == 0 || size > len {
        return ControlFlow::Continue(());
    }
    let mut indices: ArrayVec<[usize; 9]> = (0..size).collect();
    loop {
        f(&indices)?;
        let Some(i) = (0..size).rev().find(|&i| indices[i] != i + len - size) else {
            return ControlFlow::Continue(());
        };
        indices[i] += 1;
        for j in i + 1..size {
            indices[j] = indices[j - 1] + 1;
        }
    }
}
