//! Propositions over candidate sets.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    ops::Not,
    sync::Arc,
};

use stepwise_core::{Candidate, CandidateSet, Digit};

use crate::NodeComparison;

/// A single or grouped proposition carrying an on/off state.
///
/// The default [`PartialEq`], [`Ord`] and [`Hash`] implementations look at the
/// candidate map only; the parent and the on/off state never take part. Use
/// [`Node::eq_with`] and friends with [`NodeComparison::IncludeIsOn`] when the
/// state matters.
///
/// `!node` flips the state and keeps the map and the parent.
///
/// # Examples
///
/// ```
/// use stepwise_chaining::{Node, NodeComparison};
/// use stepwise_core::{Candidate, Cell, Digit};
///
/// let candidate = Candidate::new(Cell::new(2, 3), Digit::D4);
/// let on = Node::from_candidate(candidate, true);
/// let off = !&on;
///
/// assert!(!off.is_on());
/// assert_eq!(on, off);
/// assert!(!on.eq_with(&off, NodeComparison::IncludeIsOn));
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    map: CandidateSet,
    is_on: bool,
    parent: Option<Arc<Node>>,
}

impl Node {
    /// Creates a root node.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `map` is empty.
    #[must_use]
    pub fn new(map: CandidateSet, is_on: bool) -> Self {
        debug_assert!(!map.is_empty(), "a node must hold at least one candidate");
        Self {
            map,
            is_on,
            parent: None,
        }
    }

    /// Creates a root node over a single candidate.
    #[must_use]
    pub fn from_candidate(candidate: Candidate, is_on: bool) -> Self {
        Self::new(CandidateSet::from_elem(candidate), is_on)
    }

    /// Creates a copy of `base` whose parent is `parent`.
    #[must_use]
    pub fn with_parent(base: &Self, parent: Arc<Self>) -> Self {
        Self {
            map: base.map,
            is_on: base.is_on,
            parent: Some(parent),
        }
    }

    /// Returns a copy without a parent.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self::new(self.map, self.is_on)
    }

    /// Returns the candidate map.
    #[must_use]
    pub fn map(&self) -> &CandidateSet {
        &self.map
    }

    /// Returns `true` if the node is assumed true.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns the node this one was reached from.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Returns `true` if the map holds two or more candidates.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.map.len() >= 2
    }

    /// Returns the digit if every candidate of the map shares it.
    #[must_use]
    pub fn digit(&self) -> Option<Digit> {
        self.map.digits().as_single()
    }

    /// Returns the number of nodes above this one in the parent chain.
    #[must_use]
    pub fn ancestors_len(&self) -> usize {
        let mut len = 0;
        let mut current = self.parent();
        while let Some(node) = current {
            len += 1;
            current = node.parent();
        }
        len
    }

    /// Returns `true` if `self` appears in the parent chain of `child`.
    #[must_use]
    pub fn is_ancestor_of(&self, child: &Self, comparison: NodeComparison) -> bool {
        let mut current = child.parent();
        while let Some(node) = current {
            if node.eq_with(self, comparison) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Compares two nodes under `comparison`.
    #[must_use]
    pub fn eq_with(&self, other: &Self, comparison: NodeComparison) -> bool {
        self.map == other.map
            && match comparison {
                NodeComparison::IgnoreIsOn => true,
                NodeComparison::IncludeIsOn => self.is_on == other.is_on,
            }
    }

    /// Orders two nodes under `comparison`; off sorts before on.
    #[must_use]
    pub fn cmp_with(&self, other: &Self, comparison: NodeComparison) -> Ordering {
        let by_map = self.map.cmp(&other.map);
        match comparison {
            NodeComparison::IgnoreIsOn => by_map,
            NodeComparison::IncludeIsOn => by_map.then(self.is_on.cmp(&other.is_on)),
        }
    }

    /// Feeds the node into `state` under `comparison`.
    pub fn hash_with<H: Hasher>(&self, state: &mut H, comparison: NodeComparison) {
        self.map.hash(state);
        if comparison == NodeComparison::IncludeIsOn {
            self.is_on.hash(state);
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, NodeComparison::IgnoreIsOn)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(state, NodeComparison::IgnoreIsOn);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_with(other, NodeComparison::IgnoreIsOn)
    }
}

impl Not for Node {
    type Output = Self;

    fn not(mut self) -> Self {
        self.is_on = !self.is_on;
        self
    }
}

impl Not for &Node {
    type Output = Node;

    fn not(self) -> Node {
        !self.clone()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.map)
    }
}
