//! Search tree nodes.
//!
//! Nodes live in the [`SearchTree`] arena and refer to each other by
//! [`NodeId`] index. Each node owns the snapshot reached through its edge,
//! so expanding or simulating a node never touches the live match.
//!
//! [`SearchTree`]: super::tree::SearchTree

use serde::{Deserialize, Serialize};

use crate::core::{Move, Snapshot};

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node in the search tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchNode {
    /// Position reached through `mv`.
    pub snapshot: Snapshot,

    /// Parent node (`None` for the root).
    pub parent: Option<NodeId>,

    /// Edge label: the move that produced this node (`None` for the root).
    pub mv: Option<Move>,

    /// Children in expansion order.
    pub children: Vec<NodeId>,

    /// Total visits to this node.
    pub visits: u32,

    /// Sum of simulation results backpropagated through this node.
    pub score: f64,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Set once every legal move has a child.
    pub expanded: bool,
}

impl SearchNode {
    /// Create a root node.
    #[must_use]
    pub fn root(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            parent: None,
            mv: None,
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            depth: 0,
            expanded: false,
        }
    }

    /// Create a child reached from `parent` by `mv`.
    #[must_use]
    pub fn child(snapshot: Snapshot, parent: NodeId, mv: Move, depth: u16) -> Self {
        Self {
            snapshot,
            parent: Some(parent),
            mv: Some(mv),
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            depth,
            expanded: false,
        }
    }

    /// The match in this node is over.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.snapshot.is_over()
    }

    /// Mean simulation result, `None` before the first visit.
    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(self.score / f64::from(self.visits))
        }
    }

    /// Final-choice ranking key: `(mean, visits)`, unvisited nodes at `-inf`.
    #[must_use]
    pub fn rank(&self) -> (f64, u32) {
        (self.mean_score().unwrap_or(f64::NEG_INFINITY), self.visits)
    }
}
