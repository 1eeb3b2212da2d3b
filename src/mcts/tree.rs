//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references for efficiency,
//! cache-friendliness, and serializability. A tree lives for one decision.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, SearchNode};
use crate::core::{DuelError, Move, Result, Snapshot};

/// Arena-based search tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// The root is always `NodeId(0)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Create a new tree rooted at `snapshot`.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self::with_capacity(snapshot, 1024)
    }

    /// Create a tree with custom initial capacity.
    #[must_use]
    pub fn with_capacity(snapshot: Snapshot, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(snapshot));
        Self { nodes }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.index()]
    }

    /// Append a child of `parent` reached by `mv`, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, snapshot: Snapshot, mv: Move) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let depth = self.get(parent).depth.saturating_add(1);
        self.nodes.push(SearchNode::child(snapshot, parent, mv, depth));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `result` to every node from `from` up to the root.
    pub fn backpropagate(&mut self, from: NodeId, result: f64) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            node.score += result;
            current = node.parent;
        }
    }

    /// Child of `parent` with the greatest `(mean, visits)`. Earlier children
    /// win ties.
    pub fn best_child(&self, parent: NodeId) -> Result<NodeId> {
        let mut best: Option<(NodeId, (f64, u32))> = None;
        for &child in &self.get(parent).children {
            let rank = self.get(child).rank();
            if best.map_or(true, |(_, best_rank)| rank > best_rank) {
                best = Some((child, rank));
            }
        }
        best.map(|(id, _)| id).ok_or(DuelError::EmptyTree)
    }

    /// Edge label of the root's best child.
    pub fn best_move(&self) -> Result<Move> {
        let best = self.best_child(self.root())?;
        self.get(best)
            .mv
            .ok_or_else(|| DuelError::invariant(format!("{best} has no edge label")))
    }

    /// Visit summaries of a node's children, in expansion order.
    #[must_use]
    pub fn child_summaries(&self, parent: NodeId) -> Vec<ChildSummary> {
        self.get(parent)
            .children
            .iter()
            .filter_map(|&id| {
                let node = self.get(id);
                node.mv.map(|mv| ChildSummary {
                    mv,
                    visits: node.visits,
                    score: node.score,
                    mean: node.mean_score(),
                })
            })
            .collect()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal()).count();
        let expanded_count = self.nodes.iter().filter(|n| n.expanded).count();
        let total_children: usize = self.nodes.iter().map(|n| n.children.len()).sum();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            expanded_count,
            total_children,
        }
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// One root child after a search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub mv: Move,
    pub visits: u32,
    pub score: f64,
    pub mean: Option<f64>,
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Nodes whose children were generated.
    pub expanded_count: usize,

    /// Sum of child counts over all nodes.
    pub total_children: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expanded_count == 0 {
            0.0
        } else {
            self.total_children as f64 / self.expanded_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, Hand, Material};
    use crate::core::{Contender, ContenderId, GameRng, Match, MatchMode, ResourcePool, Side};

    fn snapshot() -> Snapshot {
        let card = Card::new(CardId::new(Material::Bricks, 0), 1, "Wall", "fence +3").unwrap();
        let mut hand = Hand::new(8);
        hand.place(card);
        let a = Contender::new(ContenderId::new(1), "A", 30, 10, ResourcePool::uniform(2, 5))
            .with_hand(hand);
        let b = Contender::new(ContenderId::new(2), "B", 30, 10, ResourcePool::uniform(2, 5));
        Snapshot::capture(&Match::from_parts(MatchMode::CpuOnly, 1, a, b, Side::A, GameRng::new(0)))
    }

    fn mv(i: u16) -> Move {
        Move::play(CardId::new(Material::Bricks, i))
    }

    #[test]
    fn test_tree_new() {
        let tree = SearchTree::new(snapshot());

        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root(), NodeId::new(0));
        assert!(tree.get(tree.root()).parent.is_none());
    }

    #[test]
    fn test_add_child_links_parent() {
        let mut tree = SearchTree::new(snapshot());
        let root = tree.root();
        let child = tree.add_child(root, snapshot(), mv(1));
        let grandchild = tree.add_child(child, snapshot(), mv(2));

        assert_eq!(child, NodeId::new(1));
        assert_eq!(tree.get(root).children, vec![child]);
        assert_eq!(tree.get(grandchild).parent, Some(child));
        assert_eq!(tree.get(grandchild).depth, 2);
        assert_eq!(tree.get(grandchild).mv, Some(mv(2)));
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let mut tree = SearchTree::new(snapshot());
        let root = tree.root();
        let child = tree.add_child(root, snapshot(), mv(1));
        let grandchild = tree.add_child(child, snapshot(), mv(2));

        tree.backpropagate(grandchild, -1.0);
        tree.backpropagate(child, 0.5);

        assert_eq!(tree.get(grandchild).visits, 1);
        assert_eq!(tree.get(child).visits, 2);
        assert_eq!(tree.get(child).score, -0.5);
        assert_eq!(tree.get(root).visits, 2);
        assert_eq!(tree.get(root).score, -0.5);
    }

    #[test]
    fn test_best_child_mean_then_visits() {
        let mut tree = SearchTree::new(snapshot());
        let root = tree.root();
        let a = tree.add_child(root, snapshot(), mv(1));
        let b = tree.add_child(root, snapshot(), mv(2));
        let c = tree.add_child(root, snapshot(), mv(3));

        // a: mean 0.5 over 2 visits, b: mean 0.5 over 4 visits, c: unvisited.
        tree.get_mut(a).visits = 2;
        tree.get_mut(a).score = 1.0;
        tree.get_mut(b).visits = 4;
        tree.get_mut(b).score = 2.0;

        assert_eq!(tree.best_child(root).unwrap(), b);
        assert_eq!(tree.best_move().unwrap(), mv(2));
        assert_ne!(tree.best_child(root).unwrap(), c);
    }

    #[test]
    fn test_best_child_tie_keeps_first() {
        let mut tree = SearchTree::new(snapshot());
        let root = tree.root();
        let a = tree.add_child(root, snapshot(), mv(1));
        tree.add_child(root, snapshot(), mv(2));

        // All unvisited: the first child wins.
        assert_eq!(tree.best_child(root).unwrap(), a);
    }

    #[test]
    fn test_empty_root() {
        let tree = SearchTree::new(snapshot());
        assert!(matches!(tree.best_move(), Err(DuelError::EmptyTree)));
    }

    #[test]
    fn test_tree_stats_and_summaries() {
        let mut tree = SearchTree::new(snapshot());
        let root = tree.root();
        let a = tree.add_child(root, snapshot(), mv(1));
        tree.add_child(root, snapshot(), mv(2));
        tree.get_mut(root).expanded = true;
        tree.backpropagate(a, 1.0);

        let stats = tree.stats();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.expanded_count, 1);
        assert_eq!(stats.branching_factor(), 2.0);

        let summaries = tree.child_summaries(root);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].mv, mv(1));
        assert_eq!(summaries[0].mean, Some(1.0));
        assert_eq!(summaries[1].mean, None);
    }

    #[test]
    fn test_tree_iter() {
        let mut tree = SearchTree::new(snapshot());
        tree.add_child(tree.root(), snapshot(), mv(1));

        let nodes: Vec<_> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(nodes, vec![NodeId::new(0), NodeId::new(1)]);
    }
}
