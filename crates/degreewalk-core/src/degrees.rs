//! Ranked degrees of connection: 1st through 6th.

use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::source::GraphSource;
use crate::traversal::{traverse, LayerMap, TraversalStats};
use crate::types::NodeId;

/// Deepest degree reported in ranked mode. Nodes at this depth are
/// recorded but never expanded.
pub const RANKED_MAX_DEPTH: usize = 6;

/// Ordinal degree of connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Degree {
    /// Direct connection.
    First,
    /// Connection of a connection.
    Second,
    /// Three hops away.
    Third,
    /// Four hops away.
    Fourth,
    /// Five hops away.
    Fifth,
    /// Six hops away.
    Sixth,
}

impl Degree {
    /// All degrees in ordinal order.
    pub const ALL: [Degree; RANKED_MAX_DEPTH] = [
        Degree::First,
        Degree::Second,
        Degree::Third,
        Degree::Fourth,
        Degree::Fifth,
        Degree::Sixth,
    ];

    /// Maps a hop count to its degree; `None` outside 1..=6.
    #[must_use]
    pub fn from_depth(depth: usize) -> Option<Self> {
        depth
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Hop count of this degree.
    #[must_use]
    pub fn depth(self) -> usize {
        self as usize + 1
    }

    /// Bucket name: "first" through "sixth".
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Fourth => "fourth",
            Self::Fifth => "fifth",
            Self::Sixth => "sixth",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Six mutually exclusive buckets of discovered nodes, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DegreeBuckets {
    /// Direct connections.
    pub first: Vec<NodeId>,
    /// Two hops away.
    pub second: Vec<NodeId>,
    /// Three hops away.
    pub third: Vec<NodeId>,
    /// Four hops away.
    pub fourth: Vec<NodeId>,
    /// Five hops away.
    pub fifth: Vec<NodeId>,
    /// Six hops away.
    pub sixth: Vec<NodeId>,
}

impl DegreeBuckets {
    /// Builds buckets from a traversal's layers; depths past the sixth are dropped.
    #[must_use]
    pub fn from_layers(layers: &LayerMap) -> Self {
        let mut buckets = Self::default();
        for (depth, steps) in layers.iter() {
            if let Some(degree) = Degree::from_depth(depth) {
                buckets
                    .get_mut(degree)
                    .extend(steps.iter().map(|s| s.node_id.clone()));
            }
        }
        buckets
    }

    /// Nodes at `degree`.
    #[must_use]
    pub fn get(&self, degree: Degree) -> &[NodeId] {
        match degree {
            Degree::First => &self.first,
            Degree::Second => &self.second,
            Degree::Third => &self.third,
            Degree::Fourth => &self.fourth,
            Degree::Fifth => &self.fifth,
            Degree::Sixth => &self.sixth,
        }
    }

    fn get_mut(&mut self, degree: Degree) -> &mut Vec<NodeId> {
        match degree {
            Degree::First => &mut self.first,
            Degree::Second => &mut self.second,
            Degree::Third => &mut self.third,
            Degree::Fourth => &mut self.fourth,
            Degree::Fifth => &mut self.fifth,
            Degree::Sixth => &mut self.sixth,
        }
    }

    /// Iterates `(degree, nodes)` in ordinal order, empty buckets included.
    pub fn iter(&self) -> impl Iterator<Item = (Degree, &[NodeId])> + '_ {
        Degree::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Degree of `id`, if it was discovered.
    #[must_use]
    pub fn degree_of(&self, id: &NodeId) -> Option<Degree> {
        self.iter()
            .find(|(_, nodes)| nodes.contains(id))
            .map(|(d, _)| d)
    }

    /// Total nodes across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.iter().map(|(_, nodes)| nodes.len()).sum()
    }

    /// Returns true if every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Ranked-degree result with its traversal counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedDegrees {
    /// Nodes per degree.
    pub buckets: DegreeBuckets,
    /// Counters from the underlying traversal.
    pub stats: TraversalStats,
}

/// Classifies every node within six hops of `start` into its degree.
///
/// # Errors
///
/// Returns `Error::InvalidStartId` if `start` is blank. Source failures
/// never error; they only shrink the result.
pub async fn ranked_degrees<S>(source: &S, start: &NodeId) -> Result<RankedDegrees>
where
    S: GraphSource + ?Sized,
{
    let traversal = traverse(source, start, RANKED_MAX_DEPTH).await?;
    Ok(RankedDegrees {
        buckets: DegreeBuckets::from_layers(&traversal.layers),
        stats: traversal.stats,
    })
}
