//! Search tree storage.
//!
//! Nodes live in one `Vec` and point at each other through [`NodeId`]
//! indices, so a whole search is a single allocation that is dropped at once.

use engine_core::{GameState, Move, Rules};

use crate::node::{MctsNode, NodeId};

#[derive(Debug)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,
    root: NodeId,
}

impl MctsTree {
    /// One-node tree whose root is `state`.
    pub fn new(rules: &Rules, state: &GameState) -> Self {
        let root = MctsNode::new_root(rules, state);
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Append `node` and hand back its id.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let next = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        NodeId(next)
    }

    /// Node count, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Select the child of `node_id` with the highest UCB1 score.
    /// Equal scores resolve to the later child.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let parent_visits_ln = (node.visits as f64).ln();

        node.children.iter().copied().max_by(|&a, &b| {
            let score_a = self.get(a).ucb1(parent_visits_ln, exploration);
            let score_b = self.get(b).ucb1(parent_visits_ln, exploration);
            score_a
                .partial_cmp(&score_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Turn the parent's untried move at `untried_idx` into a child whose
    /// position is `state`. Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        untried_idx: usize,
        rules: &Rules,
        state: &GameState,
    ) -> NodeId {
        let mv = self.get_mut(parent_id).untried.remove(untried_idx);
        let child_id = self.allocate(MctsNode::new_child(parent_id, mv, rules, state));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Credit a rollout result to `leaf_id` and every ancestor.
    /// `rewards` is indexed by player; each node keeps the share for the
    /// player who moved into it.
    pub fn backpropagate(&mut self, leaf_id: NodeId, rewards: [f64; 2]) {
        let mut cursor = leaf_id;
        while cursor.is_some() {
            let node = self.get_mut(cursor);
            node.update(rewards);
            cursor = node.parent;
        }
    }

    /// The most visited root child. Equal counts resolve to the later child.
    /// Returns (move, visits) or None if root has no children.
    pub fn best_move(&self) -> Option<(Move, u32)> {
        self.get(self.root)
            .children
            .iter()
            .map(|&id| self.get(id))
            .filter_map(|node| node.mv.map(|mv| (mv, node.visits)))
            .max_by_key(|&(_, visits)| visits)
    }

    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.len(),
            root_visits: root.visits,
            root_win_rate: root.win_rate(),
            max_depth: self.depth_below(self.root),
        }
    }

    /// Longest path from `id` down to a leaf, in edges.
    fn depth_below(&self, id: NodeId) -> u32 {
        self.get(id)
            .children
            .iter()
            .map(|&child| 1 + self.depth_below(child))
            .max()
            .unwrap_or(0)
    }
}

/// Shape of a tree after a search, for logging.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_win_rate: f64,
    pub max_depth: u32,
}
