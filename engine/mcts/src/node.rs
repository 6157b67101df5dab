//! MCTS tree node representation.
//!
//! Each node stands for the position reached by playing `mv` from its parent.
//! Positions themselves are not stored; the search replays moves from the
//! root into a local state as it descends.

use engine_core::{list_moves, GameState, Move, Player, Rules};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led here from the parent (None for root)
    pub mv: Option<Move>,

    /// The player whose move produced this position. Rewards stored in
    /// `wins` are from this player's point of view.
    pub player_just_moved: Player,

    /// Number of times this node has been visited
    pub visits: u32,

    /// Sum of rewards (1 win, 0.5 draw, 0 loss) for `player_just_moved`
    pub wins: f64,

    /// Legal moves from this position not yet turned into children, in
    /// enumeration order.
    pub untried: Vec<Move>,

    /// Expanded children, in expansion order.
    pub children: Vec<NodeId>,
}

impl MctsNode {
    /// Create a new root node for `state`.
    pub fn new_root(rules: &Rules, state: &GameState) -> Self {
        Self::new(NodeId::NONE, None, rules, state)
    }

    /// Create a child reached from `parent` by `mv`, now at `state`.
    pub fn new_child(parent: NodeId, mv: Move, rules: &Rules, state: &GameState) -> Self {
        Self::new(parent, Some(mv), rules, state)
    }

    fn new(parent: NodeId, mv: Option<Move>, rules: &Rules, state: &GameState) -> Self {
        let to_move = state.current_player();
        Self {
            parent,
            mv,
            player_just_moved: to_move.other(),
            visits: 0,
            wins: 0.0,
            untried: list_moves(rules, state, to_move),
            children: Vec::new(),
        }
    }

    /// Average reward for `player_just_moved`. 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCB1 score used by the parent to pick among its children:
    /// `wins/visits + sqrt(exploration * ln(N_parent) / visits)`.
    ///
    /// Unvisited children score +inf so each gets tried once.
    ///
    /// Note: Takes pre-computed ln(parent_visits) to avoid redundant ln calls
    /// when comparing multiple children.
    #[inline]
    pub fn ucb1(&self, parent_visits_ln: f64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.wins / visits + (exploration * parent_visits_ln / visits).sqrt()
    }

    /// No untried moves left.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// No untried moves and no children: the player to move here cannot play.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.untried.is_empty() && self.children.is_empty()
    }

    /// Record one rollout result. `rewards` is indexed by player.
    #[inline]
    pub fn update(&mut self, rewards: [f64; 2]) {
        self.visits += 1;
        self.wins += rewards[self.player_just_moved.index()];
    }
}
