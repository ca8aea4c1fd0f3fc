//! Strong and weak relations between nodes.

use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use crate::{LinkComparison, Node, NodeComparison};

/// The kind of inference a link carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Inference {
    /// The endpoints cannot both be false.
    Strong,
    /// The endpoints cannot both be true.
    Weak,
}

impl Inference {
    /// Infers the link kind from the states of two consecutive nodes.
    ///
    /// Off to on is the strong step of an alternating chain; anything else is
    /// read as weak.
    #[must_use]
    pub fn between(from: &Node, to: &Node) -> Self {
        if !from.is_on() && to.is_on() {
            Self::Strong
        } else {
            Self::Weak
        }
    }
}

/// A relation between two nodes.
///
/// The default [`PartialEq`] and [`Hash`] implementations are undirected.
#[derive(Debug, Clone)]
pub struct Link {
    first: Node,
    second: Node,
    inference: Inference,
}

impl Link {
    /// Creates a link.
    #[must_use]
    pub fn new(first: Node, second: Node, inference: Inference) -> Self {
        Self {
            first,
            second,
            inference,
        }
    }

    /// Returns the first endpoint.
    #[must_use]
    pub fn first(&self) -> &Node {
        &self.first
    }

    /// Returns the second endpoint.
    #[must_use]
    pub fn second(&self) -> &Node {
        &self.second
    }

    /// Returns the inference kind.
    #[must_use]
    pub fn inference(&self) -> Inference {
        self.inference
    }

    /// Returns `true` for strong links.
    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.inference == Inference::Strong
    }

    /// Returns `true` if both endpoints lie in one cell.
    #[must_use]
    pub fn is_inside_cell(&self) -> bool {
        let cells = self.first.map().cells() | self.second.map().cells();
        cells.len() == 1
    }

    /// Compares two links under `comparison`. Endpoints compare by map.
    #[must_use]
    pub fn eq_with(&self, other: &Self, comparison: LinkComparison) -> bool {
        if self.inference != other.inference {
            return false;
        }
        let forward = self.first == other.first && self.second == other.second;
        match comparison {
            LinkComparison::Directed => forward,
            LinkComparison::Undirected => {
                forward || (self.first == other.second && self.second == other.first)
            }
        }
    }

    /// Feeds the link into `state` under `comparison`.
    pub fn hash_with<H: Hasher>(&self, state: &mut H, comparison: LinkComparison) {
        let (a, b) = match comparison {
            LinkComparison::Directed => (&self.first, &self.second),
            LinkComparison::Undirected if self.second < self.first => (&self.second, &self.first),
            LinkComparison::Undirected => (&self.first, &self.second),
        };
        a.hash_with(state, NodeComparison::IgnoreIsOn);
        b.hash_with(state, NodeComparison::IgnoreIsOn);
        self.inference.hash(state);
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, LinkComparison::Undirected)
    }
}

impl Eq for Link {}

impl Hash for Link {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_with(state, LinkComparison::Undirected);
    }
}

impl Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.inference {
            Inference::Strong => "==",
            Inference::Weak => "--",
        };
        write!(f, "{} {symbol} {}", self.first, self.second)
    }
}
