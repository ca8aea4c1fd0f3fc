use std::{
    collections::{HashSet, VecDeque},
    fmt::{self, Display},
    sync::Arc,
};

use stepwise_chaining::{Chain, ChainPattern, LinkDictionary, Loop, Node, NodeComparison};
use stepwise_core::{Candidate, CandidateSet, CellSet, Conclusion, Digit, Grid, House};

use crate::{
    AnalysisContext, BoxedStep, Difficulty, LookupCache, SearcherError, Step, Technique,
    searcher::{
        BoxedStepSearcher, ConditionalCases, StepSearcher, StepSearcherMetadata,
        locked_candidates::crossing_lines,
    },
    step::write_conclusions,
    technique::length_bonus,
};

const DEFAULT_MAX_LENGTH: usize = 16;

/// Finds alternating inference chains and continuous nice loops.
///
/// Strong and weak links are collected from conjugate pairs, bivalue cells
/// and (optionally) box/line groups. Every candidate is then assumed true and
/// false in turn, and the links are walked breadth-first:
///
/// - assuming it true and reaching its negation eliminates it, along with
///   every candidate that sees both ends of the chain in between;
/// - assuming it false and reaching it true assigns it;
/// - assuming it false and returning to the same false node closes a loop.
///
/// The searcher only reads the grid; it never consults the solution.
#[derive(Debug, Clone)]
pub struct AlternatingInferenceChain {
    metadata: StepSearcherMetadata,
    max_length: usize,
    grouped_nodes: bool,
}

impl AlternatingInferenceChain {
    const METADATA: StepSearcherMetadata =
        StepSearcherMetadata::new("Alternating Inference Chain", 40)
            .with_conditional_cases(ConditionalCases::SPACE_COMPLEXITY);

    /// Creates the searcher with grouped nodes and chains of up to 16 nodes.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            metadata: Self::METADATA,
            max_length: DEFAULT_MAX_LENGTH,
            grouped_nodes: true,
        }
    }

    /// Sets the maximum number of nodes on a search path.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Enables or disables grouped nodes.
    #[must_use]
    pub const fn with_grouped_nodes(mut self, grouped_nodes: bool) -> Self {
        self.grouped_nodes = grouped_nodes;
        self
    }

    fn search(&self, root: Node, links: &Links, found: &mut Found) {
        let target = !&root;
        let root = Arc::new(root);
        let mut visited = HashSet::from([(*root.map(), root.is_on())]);
        let mut queue = VecDeque::from([(Arc::clone(&root), 1_usize)]);

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= self.max_length {
                continue;
            }
            let next_nodes = if current.is_on() {
                links.weak.get(&current)
            } else {
                links.strong.get(&current)
            };
            for next in next_nodes {
                let child = Node::with_parent(next, Arc::clone(&current));
                if child.eq_with(&target, NodeComparison::IncludeIsOn) {
                    found.chains.extend(Chain::from_last_node(&child));
                    continue;
                }
                if !root.is_on() && child.eq_with(&root, NodeComparison::IncludeIsOn) {
                    found.loops.extend(Loop::from_last_node(&child));
                    continue;
                }
                if visited.insert((*child.map(), child.is_on())) {
                    queue.push_back((Arc::new(child), depth + 1));
                }
            }
        }
    }
}

impl Default for AlternatingInferenceChain {
    fn default() -> Self {
        Self::new()
    }
}

impl StepSearcher for AlternatingInferenceChain {
    fn metadata(&self) -> &StepSearcherMetadata {
        &self.metadata
    }

    fn collect(
        &self,
        context: &mut AnalysisContext<'_>,
    ) -> Result<Option<BoxedStep>, SearcherError> {
        let grid = context.grid();
        let links = build_links(grid, context.cache(), self.grouped_nodes);
        log::trace!(
            "{} strong and {} weak link entries",
            links.strong.edge_count(),
            links.weak.edge_count()
        );

        let mut found = Found::default();
        for cell in context.cache().empty_cells() {
            for digit in grid.candidates_at(cell) {
                let candidate = Candidate::new(cell, digit);
                self.search(Node::from_candidate(candidate, true), &links, &mut found);
                self.search(Node::from_candidate(candidate, false), &links, &mut found);
            }
        }
        log::trace!(
            "found {} chains and {} loops",
            found.chains.len(),
            found.loops.len()
        );

        let mut steps: Vec<ChainStep> = found
            .chains
            .into_iter()
            .map(InferencePattern::Chain)
            .chain(found.loops.into_iter().map(InferencePattern::Loop))
            .filter_map(|pattern| ChainStep::new(pattern, grid))
            .collect();
        steps.sort_by(|a, b| {
            a.difficulty()
                .cmp(&b.difficulty())
                .then_with(|| b.conclusions.len().cmp(&a.conclusions.len()))
                .then_with(|| a.pattern.cmp(&b.pattern))
        });

        let mut seen = HashSet::new();
        for step in steps {
            if !seen.insert(step.conclusions.clone()) {
                continue;
            }
            if let Some(step) = context.offer(Box::new(step)) {
                return Ok(Some(step));
            }
        }
        Ok(None)
    }

    fn clone_box(&self) -> BoxedStepSearcher {
        Box::new(self.clone())
    }
}

#[derive(Debug, Default)]
struct Links {
    strong: LinkDictionary,
    weak: LinkDictionary,
}

#[derive(Debug, Default)]
struct Found {
    chains: HashSet<Chain>,
    loops: HashSet<Loop>,
}

fn crossing_houses(house: House) -> Vec<House> {
    match house {
        House::Box { index } => crossing_lines(index).to_vec(),
        House::Row { y } => (0..3).map(|i| House::Box { index: y / 3 * 3 + i }).collect(),
        House::Column { x } => (0..3).map(|i| House::Box { index: x / 3 + i * 3 }).collect(),
    }
}

/// Single cells plus, when grouping, every box/line segment of two or more cells.
fn units(house: House, positions: CellSet, grouped: bool) -> Vec<CellSet> {
    let mut units: Vec<CellSet> = positions.iter().map(CellSet::from_elem).collect();
    if grouped {
        units.extend(
            crossing_houses(house)
                .into_iter()
                .map(|crossing| positions & crossing.cells())
                .filter(|segment| segment.len() >= 2),
        );
    }
    units
}

fn build_links(grid: &Grid, cache: &LookupCache, grouped: bool) -> Links {
    let mut links = Links::default();

    for house in House::ALL {
        for digit in Digit::ALL {
            let positions = cache.positions(house, digit);
            if positions.len() < 2 {
                continue;
            }
            let node = |unit, is_on| Node::new(CandidateSet::from_cells(unit, digit), is_on);
            let house_units = units(house, positions, grouped);
            for (i, &a) in house_units.iter().enumerate() {
                for &b in &house_units[i + 1..] {
                    if !(a & b).is_empty() {
                        continue;
                    }
                    links.weak.add_entry(&node(a, true), &node(b, false));
                    if (a | b) == positions {
                        links.strong.add_entry(&node(a, false), &node(b, true));
                    }
                }
            }
        }
    }

    for cell in cache.empty_cells() {
        let digits = grid.candidates_at(cell);
        let list: Vec<Digit> = digits.iter().collect();
        for (i, &d1) in list.iter().enumerate() {
            for &d2 in &list[i + 1..] {
                let on = Node::from_candidate(Candidate::new(cell, d1), true);
                let off = Node::from_candidate(Candidate::new(cell, d2), false);
                links.weak.add_entry(&on, &off);
                if digits.len() == 2 {
                    links.strong.add_entry(&!&on, &!&off);
                }
            }
        }
    }

    links
}

/// The chain or loop behind a [`ChainStep`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum InferencePattern {
    /// An open chain.
    Chain(Chain),
    /// A continuous nice loop.
    Loop(Loop),
}

impl InferencePattern {
    /// Returns the pattern as a trait object.
    #[must_use]
    pub fn as_pattern(&self) -> &dyn ChainPattern {
        match self {
            Self::Chain(chain) => chain,
            Self::Loop(cycle) => cycle,
        }
    }

    fn technique(&self) -> Technique {
        match self {
            Self::Chain(chain) if chain.is_grouped() => Technique::GroupedAic,
            Self::Chain(chain) if chain.is_woods_wing() => Technique::WWing,
            Self::Chain(chain) if chain.is_medusa_wing() => Technique::MWing,
            Self::Chain(chain) if chain.is_split_wing() => Technique::SWing,
            Self::Chain(chain) if chain.is_local_wing() => Technique::LWing,
            Self::Chain(chain) if chain.is_hybrid_wing() => Technique::HWing,
            Self::Chain(chain) if chain.is_x() => Technique::XChain,
            Self::Chain(chain) if chain.is_y() => Technique::XyChain,
            Self::Chain(_) => Technique::Aic,
            Self::Loop(cycle) if cycle.is_grouped() => Technique::GroupedContinuousNiceLoop,
            Self::Loop(_) => Technique::ContinuousNiceLoop,
        }
    }
}

impl Display for InferencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chain(chain) => Display::fmt(chain, f),
            Self::Loop(cycle) => Display::fmt(cycle, f),
        }
    }
}

/// A step backed by a chain or a loop.
#[derive(Debug, Clone)]
pub struct ChainStep {
    technique: Technique,
    pattern: InferencePattern,
    conclusions: Vec<Conclusion>,
}

impl ChainStep {
    /// Derives the step from `pattern`, or `None` if it concludes nothing in
    /// `grid`.
    #[must_use]
    pub fn new(pattern: InferencePattern, grid: &Grid) -> Option<Self> {
        let mut conclusions = pattern.as_pattern().conclusions(grid);
        if conclusions.is_empty() {
            return None;
        }
        conclusions.sort_unstable();
        conclusions.dedup();
        Some(Self {
            technique: pattern.technique(),
            pattern,
            conclusions,
        })
    }

    /// Returns the chain or loop.
    #[must_use]
    pub fn pattern(&self) -> &InferencePattern {
        &self.pattern
    }
}

impl Step for ChainStep {
    fn technique(&self) -> Technique {
        self.technique
    }

    fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    fn clone_box(&self) -> BoxedStep {
        Box::new(self.clone())
    }

    fn difficulty(&self) -> Difficulty {
        self.technique.base_difficulty() + length_bonus(self.pattern.as_pattern().len())
    }
}

impl Display for ChainStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} => ", self.technique, self.pattern)?;
        write_conclusions(f, &self.conclusions)
    }
}

#[cfg(test)]
mod tests {
    use stepwise_core::{Cell, DigitSet};

    use super::*;
    use crate::testing::SearcherTester;

    fn digits(values: &[u8]) -> DigitSet {
        values.iter().map(|&value| Digit::from_value(value)).collect()
    }

    /// 1 in r1 only at c2/c7 and in r5 only at c2/c8.
    fn skyscraper_grid() -> Grid {
        let mut grid = Grid::new();
        for (y, keep) in [(0, [1, 6]), (4, [1, 7])] {
            for cell in (House::Row { y }).cells() {
                if !keep.contains(&cell.column()) {
                    grid.eliminate(cell, Digit::D1);
                }
            }
        }
        grid
    }

    fn skyscraper() -> SearcherTester {
        SearcherTester::new(skyscraper_grid())
    }

    #[test]
    fn test_x_chain() {
        let tester = skyscraper()
            .find_step(&AlternatingInferenceChain::new())
            .assert_technique(Technique::XChain)
            .assert_removed_exact(Cell::new(1, 7), Digit::D1)
            .assert_removed_exact(Cell::new(2, 7), Digit::D1)
            .assert_removed_exact(Cell::new(3, 6), Digit::D1)
            .assert_removed_exact(Cell::new(5, 6), Digit::D1)
            .assert_removed_exact(Cell::new(1, 6), DigitSet::EMPTY);
        assert_eq!(tester.step().conclusions().len(), 4);
        assert_eq!(tester.step().difficulty(), Difficulty::from_tenths(46));
    }

    #[test]
    fn test_gathering_deduplicates_conclusions() {
        let steps = skyscraper().collect_all(&AlternatingInferenceChain::new());
        assert_eq!(steps.len(), 1);
        assert!(steps[0].to_string().starts_with("X-Chain: "));
    }

    #[test]
    fn test_contradiction_assigns() {
        // r1c1 off forces r1c1 on:
        // (1)r1c1 = (2)r1c1 - (2)r1c5 = (3)r1c5 - (3)r5c5 = (3)r5c1 - (1)r5c1 = (1)r1c1
        let row = House::Row { y: 4 }
            .cells()
            .into_iter()
            .filter(|cell| cell.column() != 0 && cell.column() != 4);
        let column = House::Column { x: 0 }
            .cells()
            .into_iter()
            .filter(|cell| cell.row() != 0 && cell.row() != 4);
        let tester = SearcherTester::new(Grid::new())
            .restrict(Cell::new(0, 0), digits(&[1, 2]))
            .restrict(Cell::new(0, 4), digits(&[2, 3]))
            .restrict(Cell::new(4, 0), digits(&[1, 3]))
            .eliminate(row, Digit::D3)
            .eliminate(column, Digit::D1);

        let steps = tester.collect_all(&AlternatingInferenceChain::new());
        let assignment = [Conclusion::assignment(Cell::new(0, 0), Digit::D1)];
        assert!(steps.iter().any(|step| step.conclusions() == assignment));
    }

    #[test]
    fn test_x_wing_loop() {
        let others = [0, 4]
            .into_iter()
            .flat_map(|y| House::Row { y }.cells())
            .filter(|cell| cell.column() != 0 && cell.column() != 4)
            .collect::<Vec<_>>();
        let steps = SearcherTester::new(Grid::new())
            .eliminate(others, Digit::D1)
            .collect_all(&AlternatingInferenceChain::new());
        let cycle = steps
            .iter()
            .find(|step| step.technique() == Technique::ContinuousNiceLoop)
            .unwrap();
        assert_eq!(cycle.conclusions().len(), 14);
        assert_eq!(cycle.difficulty(), Difficulty::from_tenths(47));
    }

    #[test]
    fn test_empty_grid_has_no_chain() {
        SearcherTester::new(Grid::new()).assert_no_step(&AlternatingInferenceChain::new());
    }

    #[test]
    fn test_grouped_links() {
        let grid = skyscraper_grid();
        let cache = LookupCache::new(&grid);
        let group = |row: u8, is_on| {
            let cells: CellSet = (3..6).map(|column| Cell::new(row, column)).collect();
            Node::new(CandidateSet::from_cells(cells, Digit::D1), is_on)
        };

        // b2 holds 1 only in r2 and r3
        let links = build_links(&grid, &cache, true);
        assert!(links.strong.contains_edge(&group(1, false), &group(2, true)));
        assert!(links.weak.contains_edge(&group(1, true), &group(2, false)));

        let links = build_links(&grid, &cache, false);
        assert!(!links.strong.contains_edge(&group(1, false), &group(2, true)));
    }

    #[test]
    fn test_crossing_houses() {
        assert_eq!(
            crossing_houses(House::Row { y: 4 }),
            [3, 4, 5].map(|index| House::Box { index })
        );
        assert_eq!(
            crossing_houses(House::Column { x: 7 }),
            [2, 5, 8].map(|index| House::Box { index })
        );
        assert_eq!(crossing_houses(House::Box { index: 0 }).len(), 6);
    }

    #[test]
    fn test_max_length_limits_search() {
        skyscraper().assert_no_step(&AlternatingInferenceChain::new().with_max_length(3));
    }
}
