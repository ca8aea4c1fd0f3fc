//! Closed alternating inference loops.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use stepwise_core::{CandidateSet, Conclusion, Grid};

use crate::{
    ChainPattern, ChainPatternComparison, Node, NodeComparison,
    pattern::{self, canonicalize, conclusions_between, nodes_eq, nodes_eq_reversed, reversed},
};

/// A continuous nice loop.
///
/// The last node links back to the first, so every node has two neighbors.
/// Equality ignores both the traversal direction and the node the loop was
/// entered from.
///
/// # Examples
///
/// ```
/// use stepwise_chaining::{ChainPattern as _, Loop, Node};
/// use stepwise_core::{Candidate, Cell, Conclusion, Digit, Grid};
///
/// let node = |row, column, is_on| {
///     Node::from_candidate(Candidate::new(Cell::new(row, column), Digit::D1), is_on)
/// };
///
/// // r1c1 == r1c5 -- r5c5 == r5c1 -- r1c1, an X-Wing shaped loop
/// let x_wing = Loop::new(vec![
///     node(0, 0, false),
///     node(0, 4, true),
///     node(4, 4, false),
///     node(4, 0, true),
/// ])
/// .unwrap();
///
/// let conclusions = x_wing.conclusions(&Grid::new());
/// assert!(conclusions.contains(&Conclusion::elimination(Cell::new(8, 4), Digit::D1)));
/// assert!(conclusions.contains(&Conclusion::elimination(Cell::new(8, 0), Digit::D1)));
/// ```
#[derive(Debug, Clone)]
pub struct Loop {
    nodes: Box<[Node]>,
}

impl Loop {
    /// Builds a loop by walking the parents of `last` until the walk returns
    /// to a node equal to `last`.
    ///
    /// Returns `None` if the walk never closes or the cycle is too short.
    #[must_use]
    pub fn from_last_node(last: &Node) -> Option<Self> {
        Self::new(pattern::walk_parents(last, true)?)
    }

    /// Builds a loop from cyclically adjacent nodes.
    ///
    /// Returns `None` unless there are at least four nodes and an even count.
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Option<Self> {
        if nodes.len() < 4 || nodes.len() % 2 != 0 {
            return None;
        }
        let nodes = canonicalize(nodes.iter().map(Node::detached).collect());
        Some(Self { nodes })
    }

    /// Returns the same loop traversed in the opposite direction.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            nodes: reversed(&self.nodes),
        }
    }

    fn rotated(&self, start: usize) -> Vec<Node> {
        let (head, tail) = self.nodes.split_at(start);
        tail.iter().chain(head).cloned().collect()
    }

    /// Returns the weak links as (on, off) node pairs, wrapping around.
    fn weak_pairs(&self) -> impl Iterator<Item = (&Node, &Node)> {
        let len = self.nodes.len();
        (0..len)
            .map(move |i| (&self.nodes[i], &self.nodes[(i + 1) % len]))
            .filter(|(from, to)| from.is_on() && !to.is_on())
    }

    /// Compares two loops along both comparison axes, under any rotation.
    #[must_use]
    pub fn eq_with(
        &self,
        other: &Self,
        node_comparison: NodeComparison,
        pattern_comparison: ChainPatternComparison,
    ) -> bool {
        if self.nodes.len() != other.nodes.len() {
            return false;
        }
        (0..other.nodes.len()).any(|start| {
            let rotated = other.rotated(start);
            nodes_eq(&self.nodes, &rotated, node_comparison)
                || (pattern_comparison == ChainPatternComparison::Undirected
                    && nodes_eq_reversed(&self.nodes, &rotated, node_comparison))
        })
    }

    /// Feeds the loop into `state`.
    ///
    /// Rotations always collide, so the nodes are folded in sorted order
    /// under either pattern comparison. `_pattern_comparison` is accepted to
    /// mirror [`Chain::hash_with`](crate::Chain::hash_with) and does not
    /// change the hash.
    pub fn hash_with<H: Hasher>(
        &self,
        state: &mut H,
        node_comparison: NodeComparison,
        _pattern_comparison: ChainPatternComparison,
    ) {
        pattern::hash_nodes(
            &self.nodes,
            state,
            node_comparison,
            ChainPatternComparison::Undirected,
        );
    }

    fn rotation_key(&self) -> Vec<&CandidateSet> {
        let len = self.nodes.len();
        let maps: Vec<&CandidateSet> = self.nodes.iter().map(Node::map).collect();
        (0..len)
            .flat_map(|start| {
                let forward: Vec<&CandidateSet> =
                    (0..len).map(|i| maps[(start + i) % len]).collect();
                let backward: Vec<&CandidateSet> =
                    (0..len).map(|i| maps[(start + len - i) % len]).collect();
                [forward, backward]
            })
            .min()
            .unwrap_or_default()
    }
}

impl ChainPattern for Loop {
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn is_loop(&self) -> bool {
        true
    }

    fn conclusions(&self, grid: &Grid) -> Vec<Conclusion> {
        let mut conclusions: Vec<Conclusion> = self
            .weak_pairs()
            .flat_map(|(on, off)| conclusions_between(grid, on, off))
            .collect();
        conclusions.sort_unstable();
        conclusions.dedup();
        conclusions
    }
}

impl PartialEq for Loop {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(
            other,
            NodeComparison::IgnoreIsOn,
            ChainPatternComparison::Undirected,
        )
    }
}

impl Eq for Loop {}

impl Hash for Loop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(
            state,
            NodeComparison::IgnoreIsOn,
            ChainPatternComparison::Undirected,
        );
    }
}

impl PartialOrd for Loop {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Loop {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nodes
            .len()
            .cmp(&other.nodes.len())
            .then_with(|| self.rotation_key().cmp(&other.rotation_key()))
    }
}

impl Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pattern::write_nodes(f, &self.nodes, true)
    }
}
