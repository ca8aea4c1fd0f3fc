//! Chain and loop graph model for alternating inference techniques.
//!
//! A [`Node`] is a proposition over one candidate (or a group of candidates
//! sharing a digit) that is either assumed true ("on") or false ("off").
//! Nodes are connected by [`Link`]s:
//!
//! - a **strong** link means the two propositions cannot both be false, so an
//!   off node implies the next node is on;
//! - a **weak** link means they cannot both be true, so an on node implies the
//!   next node is off.
//!
//! Searchers collect links into [`LinkDictionary`] instances, walk them
//! breadth-first while recording parents, and freeze a path into a [`Chain`]
//! or a [`Loop`]. Both derive their conclusions on demand from the live grid.
//!
//! # Examples
//!
//! ```
//! use stepwise_chaining::{Chain, ChainPattern as _, Node};
//! use stepwise_core::{Candidate, Cell, Conclusion, Digit, Grid};
//!
//! // r1c1(1) == r1c5(1) -- r5c5(1) == r5c2(1): a two-strong-link X-Chain
//! let node = |row, column, is_on| {
//!     Node::from_candidate(Candidate::new(Cell::new(row, column), Digit::D1), is_on)
//! };
//! let chain = Chain::new(vec![
//!     node(0, 0, false),
//!     node(0, 4, true),
//!     node(4, 4, false),
//!     node(4, 1, true),
//! ])
//! .unwrap();
//!
//! let conclusions = chain.conclusions(&Grid::new());
//! // r1c2 sees both ends
//! assert!(conclusions.contains(&Conclusion::elimination(Cell::new(0, 1), Digit::D1)));
//! assert!(chain.is_x());
//! ```

pub mod chain;
pub mod chain_loop;
pub mod comparison;
pub mod link;
pub mod link_dictionary;
pub mod node;
pub mod pattern;

pub use self::{
    chain::Chain,
    chain_loop::Loop,
    comparison::{ChainPatternComparison, LinkComparison, NodeComparison, UnknownComparison},
    link::{Inference, Link},
    link_dictionary::LinkDictionary,
    node::Node,
    pattern::{ChainPattern, conclusions_between},
};
