//! Adjacency map of links found in a grid.

use std::{
    collections::{HashMap, HashSet},
    hash::{Hash, Hasher},
};

use crate::{Node, NodeComparison};

/// A node keyed by both its map and its on/off state.
#[derive(Debug, Clone)]
struct StateKey(Node);

impl PartialEq for StateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_with(&other.0, NodeComparison::IncludeIsOn)
    }
}

impl Eq for StateKey {}

impl Hash for StateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash_with(state, NodeComparison::IncludeIsOn);
    }
}

/// Links between nodes, with contrapositive closure.
///
/// Every entry is stored in both directions, and the negated pair is stored
/// as well: adding `(a, b)` makes `a -> b`, `b -> a`, `!a -> !b` and `!b -> !a`
/// all present. Keys distinguish the on/off state, so `a` and `!a` have
/// separate neighbor sets.
///
/// Searchers keep one dictionary per inference kind. Looking up an off node in
/// the strong dictionary yields the nodes it forces on; looking up an on node
/// in the weak dictionary yields the nodes it forces off.
///
/// # Examples
///
/// ```
/// use stepwise_chaining::{LinkDictionary, Node};
/// use stepwise_core::{Candidate, Cell, Digit};
///
/// let a = Node::from_candidate(Candidate::new(Cell::new(0, 0), Digit::D1), false);
/// let b = Node::from_candidate(Candidate::new(Cell::new(0, 4), Digit::D1), true);
///
/// let mut strong = LinkDictionary::new();
/// strong.add_entry(&a, &b);
///
/// assert!(strong.contains_edge(&a, &b));
/// assert!(strong.contains_edge(&b, &a));
/// assert!(strong.contains_edge(&!&a, &!&b));
/// assert!(!strong.contains_edge(&a, &!&b));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinkDictionary {
    entries: HashMap<StateKey, HashSet<StateKey>>,
}

impl LinkDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the link between `n1` and `n2` along with its contrapositive.
    pub fn add_entry(&mut self, n1: &Node, n2: &Node) {
        let (n1, n2) = (n1.detached(), n2.detached());
        let (not1, not2) = (!&n1, !&n2);
        self.insert(n1.clone(), n2.clone());
        self.insert(n2, n1);
        self.insert(not1.clone(), not2.clone());
        self.insert(not2, not1);
    }

    fn insert(&mut self, from: Node, to: Node) {
        self.entries
            .entry(StateKey(from))
            .or_default()
            .insert(StateKey(to));
    }

    /// Iterates the neighbors of `node`, matching its on/off state.
    pub fn get(&self, node: &Node) -> impl Iterator<Item = &Node> {
        self.entries
            .get(&StateKey(node.detached()))
            .into_iter()
            .flatten()
            .map(|key| &key.0)
    }

    /// Returns `true` if `to` is a neighbor of `from`.
    #[must_use]
    pub fn contains_edge(&self, from: &Node, to: &Node) -> bool {
        self.entries
            .get(&StateKey(from.detached()))
            .is_some_and(|set| set.contains(&StateKey(to.detached())))
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no link was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of stored directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(HashSet::len).sum()
    }

    /// Iterates every key together with its neighbors.
    pub fn iter(&self) -> impl Iterator<Item = (&Node, impl Iterator<Item = &Node>)> {
        self.entries
            .iter()
            .map(|(key, set)| (&key.0, set.iter().map(|k| &k.0)))
    }
}
