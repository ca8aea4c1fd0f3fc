//! Behavior shared by chains and loops.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash as _, Hasher},
};

use stepwise_core::{Candidate, CandidateSet, Conclusion, DigitSet, Grid};

use crate::{ChainPatternComparison, Inference, Link, Node, NodeComparison};

/// An ordered sequence of alternating nodes.
pub trait ChainPattern {
    /// Returns the nodes that take part in the inference.
    fn nodes(&self) -> &[Node];

    /// Returns `true` if the last node links back to the first.
    fn is_loop(&self) -> bool;

    /// Derives the conclusions of the pattern from the live grid.
    fn conclusions(&self, grid: &Grid) -> Vec<Conclusion>;

    /// Returns the number of nodes.
    fn len(&self) -> usize {
        self.nodes().len()
    }

    /// Returns `true` if the pattern has no nodes.
    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    /// Returns the links between consecutive nodes, closing the cycle for loops.
    fn links(&self) -> Vec<Link> {
        let nodes = self.nodes();
        let mut links: Vec<Link> = nodes
            .windows(2)
            .map(|pair| link_between(&pair[0], &pair[1]))
            .collect();
        if self.is_loop()
            && let [first, .., last] = nodes
        {
            links.push(link_between(last, first));
        }
        links
    }

    /// Returns the strong links.
    fn strong_links(&self) -> Vec<Link> {
        self.links().into_iter().filter(Link::is_strong).collect()
    }

    /// Returns the weak links.
    fn weak_links(&self) -> Vec<Link> {
        self.links().into_iter().filter(|l| !l.is_strong()).collect()
    }

    /// Returns `true` if any node is grouped.
    fn is_grouped(&self) -> bool {
        self.nodes().iter().any(Node::is_grouped)
    }

    /// Returns every digit used by the nodes.
    fn digits(&self) -> DigitSet {
        self.nodes()
            .iter()
            .fold(DigitSet::EMPTY, |acc, node| acc | node.map().digits())
    }

    /// Returns `true` if all nodes use the same digit.
    fn is_x(&self) -> bool {
        self.digits().is_single()
    }

    /// Returns `true` if every strong link stays inside one cell.
    fn is_y(&self) -> bool {
        let strong = self.strong_links();
        !strong.is_empty() && strong.iter().all(Link::is_inside_cell)
    }

    /// Returns `true` if two nodes share a candidate.
    fn is_overlapped(&self) -> bool {
        let mut seen = CandidateSet::EMPTY;
        for node in self.nodes() {
            if seen.intersects(node.map()) {
                return true;
            }
            seen |= *node.map();
        }
        false
    }

    /// Returns `true` if any node holds `candidate`.
    fn contains(&self, candidate: Candidate) -> bool {
        self.nodes().iter().any(|node| node.map().contains(candidate))
    }

    /// Returns `true` if any node holds the candidate targeted by a conclusion.
    fn overlaps_with_conclusions(&self, conclusions: &[Conclusion]) -> bool {
        conclusions.iter().any(|c| self.contains(c.candidate()))
    }

    /// Returns the total number of candidates over all nodes.
    fn complexity(&self) -> usize {
        self.nodes().iter().map(|node| node.map().len()).sum()
    }
}

fn link_between(from: &Node, to: &Node) -> Link {
    Link::new(from.clone(), to.clone(), Inference::between(from, to))
}

/// Derives what follows from "`node1` or `node2` is true".
///
/// - If `node1` is `!node2`, the node itself is true: a single candidate is
///   assigned, and a grouped node eliminates its digit from every cell that
///   sees the whole group.
/// - Two single candidates in one cell eliminate every other digit of the cell.
/// - Two single candidates with the same digit eliminate it from the cells
///   seeing both.
/// - Two single candidates with different cells and digits that see each
///   other cross-eliminate: each cell loses the other's digit.
/// - Two groups of one shared digit eliminate it from the cells seeing both.
///
/// Only candidates still present in `grid` are returned.
#[must_use]
pub fn conclusions_between(grid: &Grid, node1: &Node, node2: &Node) -> Vec<Conclusion> {
    if node1.eq_with(&!node2, NodeComparison::IncludeIsOn) {
        return forced_true(grid, node1);
    }

    if let (Some(c1), Some(c2)) = (node1.map().as_single(), node2.map().as_single()) {
        let (cell1, digit1) = (c1.cell(), c1.digit());
        let (cell2, digit2) = (c2.cell(), c2.digit());
        if cell1 == cell2 {
            let keep = DigitSet::from_iter([digit1, digit2]);
            return (grid.candidates_at(cell1) - keep)
                .into_iter()
                .map(|digit| Conclusion::elimination(cell1, digit))
                .collect();
        }
        if digit1 == digit2 {
            let cells = node1.map().cells() | node2.map().cells();
            return (cells.peer_intersection() & grid.candidates_map(digit1))
                .into_iter()
                .map(|cell| Conclusion::elimination(cell, digit1))
                .collect();
        }
        if !cell1.sees(cell2) {
            return vec![];
        }
        let mut conclusions = Vec::with_capacity(2);
        if grid.exists(cell1, digit2) == Some(true) {
            conclusions.push(Conclusion::elimination(cell1, digit2));
        }
        if grid.exists(cell2, digit1) == Some(true) {
            conclusions.push(Conclusion::elimination(cell2, digit1));
        }
        return conclusions;
    }

    match (node1.digit(), node2.digit()) {
        (Some(d1), Some(d2)) if d1 == d2 => {
            let cells = node1.map().cells() | node2.map().cells();
            (cells.peer_intersection() & grid.candidates_map(d1))
                .into_iter()
                .map(|cell| Conclusion::elimination(cell, d1))
                .collect()
        }
        _ => vec![],
    }
}

fn forced_true(grid: &Grid, node: &Node) -> Vec<Conclusion> {
    if let Some(candidate) = node.map().as_single() {
        return vec![Conclusion::assignment(candidate.cell(), candidate.digit())];
    }
    let Some(digit) = node.digit() else {
        return vec![];
    };
    node.map()
        .peer_intersection()
        .iter()
        .filter(|c| c.digit() == digit && grid.exists(c.cell(), digit) == Some(true))
        .map(|c| Conclusion::elimination(c.cell(), digit))
        .collect()
}

/// Walks parents from `last` into root-first order.
///
/// Open walks stop at the root. Closed walks stop on returning to a node equal
/// to `last`, which is not repeated; a closed walk that reaches a root without
/// closing yields `None`.
pub(crate) fn walk_parents(last: &Node, is_loop: bool) -> Option<Vec<Node>> {
    let mut nodes = vec![last.detached()];
    let mut current = last.parent();
    let mut closed = false;
    while let Some(node) = current {
        if is_loop && node.eq_with(last, NodeComparison::IncludeIsOn) {
            closed = true;
            break;
        }
        nodes.push(node.detached());
        current = node.parent();
    }
    if is_loop && !closed {
        return None;
    }
    nodes.reverse();
    Some(nodes)
}

/// Reverses the traversal direction, negating every node.
pub(crate) fn reversed(nodes: &[Node]) -> Box<[Node]> {
    nodes.iter().rev().map(|node| !node).collect()
}

/// Orients `nodes` so the second node does not sort above the second-to-last.
pub(crate) fn canonicalize(nodes: Vec<Node>) -> Box<[Node]> {
    let len = nodes.len();
    if len >= 2
        && nodes[len - 2].cmp_with(&nodes[1], NodeComparison::IgnoreIsOn) == Ordering::Less
    {
        reversed(&nodes)
    } else {
        nodes.into_boxed_slice()
    }
}

/// Returns the lower of the forward and backward map sequences.
pub(crate) fn undirected_key(nodes: &[Node]) -> Vec<&CandidateSet> {
    let forward: Vec<&CandidateSet> = nodes.iter().map(Node::map).collect();
    let backward: Vec<&CandidateSet> = nodes.iter().rev().map(Node::map).collect();
    forward.min(backward)
}

/// Writes nodes joined by `=` for strong and `-` for weak links; closed
/// sequences repeat the first node at the end.
pub(crate) fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node], closed: bool) -> fmt::Result {
    let Some(first) = nodes.first() else {
        return Ok(());
    };
    write!(f, "{first}")?;
    let tail = nodes.iter().skip(1).chain(closed.then_some(first));
    let mut previous = first;
    for node in tail {
        let symbol = match Inference::between(previous, node) {
            Inference::Strong => '=',
            Inference::Weak => '-',
        };
        write!(f, "{symbol}{node}")?;
        previous = node;
    }
    Ok(())
}

pub(crate) fn nodes_eq(a: &[Node], b: &[Node], comparison: NodeComparison) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_with(y, comparison))
}

/// Compares `a` with `b` read backwards and negated.
pub(crate) fn nodes_eq_reversed(a: &[Node], b: &[Node], comparison: NodeComparison) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter().rev())
            .all(|(x, y)| x.eq_with(&!y, comparison))
}

pub(crate) fn hash_nodes<H: Hasher>(
    nodes: &[Node],
    state: &mut H,
    node_comparison: NodeComparison,
    pattern_comparison: ChainPatternComparison,
) {
    nodes.len().hash(state);
    match pattern_comparison {
        ChainPatternComparison::Directed => {
            for node in nodes {
                node.hash_with(state, node_comparison);
            }
        }
        ChainPatternComparison::Undirected => {
            // A reversed pattern holds the same maps with negated states, so
            // only the sorted maps are folded in.
            let mut sorted: Vec<&Node> = nodes.iter().collect();
            sorted.sort_by(|a, b| a.cmp_with(b, node_comparison));
            for node in sorted {
                node.hash_with(state, NodeComparison::IgnoreIsOn);
            }
        }
    }
}
