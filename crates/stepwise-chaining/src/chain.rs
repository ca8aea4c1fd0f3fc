//! Open alternating inference chains.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use stepwise_core::{Conclusion, Grid};

use crate::{
    ChainPattern, ChainPatternComparison, Node, NodeComparison,
    pattern::{self, canonicalize, conclusions_between, nodes_eq, nodes_eq_reversed, reversed},
};

/// An open alternating chain.
///
/// Nodes are stored root first, so an off node followed by an on node is a
/// strong link and an on node followed by an off node is a weak link.
///
/// A chain whose first node is on starts with a weak link. Such chains come
/// from assuming a candidate true and reaching its negation: the candidate at
/// both ends is a sentinel that [`ChainPattern::nodes`] leaves out, and the
/// remaining nodes form an ordinary chain from a strong link to a strong link.
///
/// # Examples
///
/// ```
/// use stepwise_chaining::{Chain, ChainPattern as _, Node};
/// use stepwise_core::{Candidate, Cell, Conclusion, Digit, Grid};
///
/// let node = |row, column, digit, is_on| {
///     Node::from_candidate(
///         Candidate::new(Cell::new(row, column), Digit::from_value(digit)),
///         is_on,
///     )
/// };
///
/// // r1c1(9) assumed true forces r1c1(9) false through r1c2(9) == r2c1(9).
/// let chain = Chain::new(vec![
///     node(0, 0, 9, true),
///     node(0, 1, 9, false),
///     node(1, 0, 9, true),
///     node(0, 0, 9, false),
/// ])
/// .unwrap();
/// assert!(chain.is_weak_start());
/// assert_eq!(chain.len(), 2);
///
/// let conclusions = chain.conclusions(&Grid::new());
/// assert!(conclusions.contains(&Conclusion::elimination(Cell::new(0, 0), Digit::D9)));
/// ```
#[derive(Debug, Clone)]
pub struct Chain {
    nodes: Box<[Node]>,
    weak_start: bool,
}

impl Chain {
    /// Builds a chain by walking the parents of `last` up to the root.
    ///
    /// Returns `None` if the walk yields fewer than two usable nodes.
    #[must_use]
    pub fn from_last_node(last: &Node) -> Option<Self> {
        Self::new(pattern::walk_parents(last, false)?)
    }

    /// Builds a chain from nodes in root-first order.
    ///
    /// Parents are dropped and the direction is canonicalized. Returns `None`
    /// if fewer than two nodes would remain once weak-start sentinels are
    /// left out.
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Option<Self> {
        if nodes.len() < 2 {
            return None;
        }
        let nodes = canonicalize(nodes.iter().map(Node::detached).collect());
        let weak_start = nodes[0].is_on();
        if weak_start && nodes.len() < 4 {
            return None;
        }
        Some(Self { nodes, weak_start })
    }

    /// Returns `true` if the chain starts and ends with sentinel nodes.
    #[must_use]
    pub fn is_weak_start(&self) -> bool {
        self.weak_start
    }

    /// Returns every stored node, sentinels included.
    #[must_use]
    pub fn raw_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the first valid node.
    #[must_use]
    pub fn first(&self) -> &Node {
        &self.nodes()[0]
    }

    /// Returns the last valid node.
    #[must_use]
    pub fn last(&self) -> &Node {
        let nodes = self.nodes();
        &nodes[nodes.len() - 1]
    }

    /// Returns `true` if the chain ends at the negation of its start.
    #[must_use]
    pub fn is_self_contradiction(&self) -> bool {
        self.first().eq_with(&!self.last(), NodeComparison::IncludeIsOn)
    }

    /// Returns the same chain read in the opposite direction.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            nodes: reversed(&self.nodes),
            weak_start: self.weak_start,
        }
    }

    fn split_mask(&self) -> Option<[u16; 6]> {
        let nodes = self.nodes();
        if nodes.len() != 6 {
            return None;
        }
        let mut masks = [0; 6];
        for (mask, node) in masks.iter_mut().zip(nodes) {
            let digits = node.map().digits();
            if !digits.is_single() {
                return None;
            }
            *mask = digits.bits();
        }
        Some(masks)
    }

    /// W-Wing: `(a=b)-b=b-(b=a)`.
    #[must_use]
    pub fn is_woods_wing(&self) -> bool {
        self.split_mask().is_some_and(|[m1, m2, m3, m4, m5, m6]| {
            m2 == m3 && m3 == m4 && m4 == m5 && m1 == m6 && m1 != m2
        })
    }

    /// M-Wing: `(a=b)-b=b-(b=)a` or its mirror.
    #[must_use]
    pub fn is_medusa_wing(&self) -> bool {
        self.split_mask().is_some_and(|[m1, m2, m3, m4, m5, m6]| {
            (m1 == m5 && m5 == m6 && m2 == m3 && m3 == m4 && m1 != m2)
                || (m1 == m2 && m2 == m6 && m3 == m4 && m4 == m5 && m2 != m3)
        })
    }

    /// S-Wing: `a=a-(a=b)-b=b`.
    #[must_use]
    pub fn is_split_wing(&self) -> bool {
        self.split_mask().is_some_and(|[m1, m2, m3, m4, m5, m6]| {
            m1 == m2 && m2 == m3 && m4 == m5 && m5 == m6 && m1 != m4
        })
    }

    /// L-Wing: `a=a-(a=b)-(b=c)`, three pairs of mutually distinct digits.
    #[must_use]
    pub fn is_local_wing(&self) -> bool {
        self.split_mask().is_some_and(|[m1, m2, m3, m4, m5, m6]| {
            m1 == m2 && m3 == m4 && m5 == m6 && m1 != m3 && m3 != m5 && m1 != m5
        })
    }

    /// H-Wing: `(a=b)-b=b-(b=c)`-like shapes mixing a bivalue cell and a strong link.
    #[must_use]
    pub fn is_hybrid_wing(&self) -> bool {
        self.split_mask().is_some_and(|[m1, m2, m3, m4, m5, m6]| {
            (m2 == m3 && m4 == m5 && m5 == m6 && m1 != m2 && m2 != m4)
                || (m1 == m2 && m2 == m3 && m4 == m5 && m1 != m4 && m4 != m6)
        })
    }

    /// Compares two chains along both comparison axes.
    #[must_use]
    pub fn eq_with(
        &self,
        other: &Self,
        node_comparison: NodeComparison,
        pattern_comparison: ChainPatternComparison,
    ) -> bool {
        match pattern_comparison {
            ChainPatternComparison::Directed => {
                nodes_eq(&self.nodes, &other.nodes, node_comparison)
            }
            ChainPatternComparison::Undirected => {
                nodes_eq(&self.nodes, &other.nodes, node_comparison)
                    || nodes_eq_reversed(&self.nodes, &other.nodes, node_comparison)
            }
        }
    }

    /// Feeds the chain into `state` along both comparison axes.
    pub fn hash_with<H: Hasher>(
        &self,
        state: &mut H,
        node_comparison: NodeComparison,
        pattern_comparison: ChainPatternComparison,
    ) {
        pattern::hash_nodes(&self.nodes, state, node_comparison, pattern_comparison);
    }
}

impl ChainPattern for Chain {
    fn nodes(&self) -> &[Node] {
        if self.weak_start {
            &self.nodes[1..self.nodes.len() - 1]
        } else {
            &self.nodes
        }
    }

    fn is_loop(&self) -> bool {
        false
    }

    fn conclusions(&self, grid: &Grid) -> Vec<Conclusion> {
        conclusions_between(grid, self.first(), self.last())
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(
            other,
            NodeComparison::IgnoreIsOn,
            ChainPatternComparison::Undirected,
        )
    }
}

impl Eq for Chain {}

impl Hash for Chain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(
            state,
            NodeComparison::IgnoreIsOn,
            ChainPatternComparison::Undirected,
        );
    }
}

impl PartialOrd for Chain {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Chain {
    /// Shorter chains first, then self-contradictions, then node by node in
    /// whichever direction reads lower.
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| {
                other
                    .is_self_contradiction()
                    .cmp(&self.is_self_contradiction())
            })
            .then_with(|| {
                pattern::undirected_key(&self.nodes).cmp(&pattern::undirected_key(&other.nodes))
            })
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pattern::write_nodes(f, self.nodes(), false)
    }
}
