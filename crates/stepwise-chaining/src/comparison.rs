//! Comparison modes for nodes, links and chain patterns.

/// Selects whether the on/off state of a node takes part in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeComparison {
    /// Compare candidate maps only.
    #[default]
    IgnoreIsOn,
    /// Compare candidate maps and on/off states.
    IncludeIsOn,
}

/// Selects whether the order of a link's endpoints matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkComparison {
    /// `(a, b)` equals `(b, a)` when the inference matches.
    #[default]
    Undirected,
    /// Endpoints must match in order.
    Directed,
}

/// Selects whether the traversal direction of a chain or loop matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChainPatternComparison {
    /// A pattern equals its reversal.
    #[default]
    Undirected,
    /// Nodes must match in order.
    Directed,
}

/// Error returned when decoding an unknown comparison mode from its raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown {kind} comparison value: {value}")]
pub struct UnknownComparison {
    kind: &'static str,
    value: u8,
}

macro_rules! impl_try_from_u8 {
    ($ty:ident, $kind:literal, $zero:ident, $one:ident) => {
        impl TryFrom<u8> for $ty {
            type Error = UnknownComparison;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    0 => Ok(Self::$zero),
                    1 => Ok(Self::$one),
                    _ => Err(UnknownComparison { kind: $kind, value }),
                }
            }
        }
    };
}

impl_try_from_u8!(NodeComparison, "node", IgnoreIsOn, IncludeIsOn);
impl_try_from_u8!(LinkComparison, "link", Undirected, Directed);
impl_try_from_u8!(ChainPatternComparison, "chain pattern", Undirected, Directed);
