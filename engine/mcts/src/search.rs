//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Descend fully expanded nodes by UCB1
//! 2. Expansion: Turn one random untried move into a child
//! 3. Evaluation: Score the new leaf with the evaluator (random rollout)
//! 4. Backpropagation: Credit each node on the path for the player who moved into it

use std::time::{Duration, Instant};

use engine_core::{apply_move, game_result, GameState, Move, NullConsequences, Rejection, Rules};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError, RolloutEvaluator};
use crate::node::NodeId;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Rules engine refused a move from the tree: {0}")]
    Rejected(#[from] Rejection),

    #[error("Evaluator error: {0}")]
    EvaluatorError(#[from] EvaluatorError),

    #[error("Search finished without expanding the root")]
    EmptyTree,
}

/// Counters collected over one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Completed select/expand/rollout/backpropagate iterations
    pub iterations: u32,
    /// Nodes in the tree when the search stopped
    pub tree_nodes: usize,
    /// Deepest node reached during selection and expansion
    pub max_depth: u32,
    /// Random moves played across all rollouts
    pub rollout_moves: u64,
    /// Wall-clock time spent
    pub elapsed_ms: u64,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play. A pass when the side to move has no legal placement.
    pub mv: Move,

    /// Estimated chance that the searching player wins, in [0, 1]
    pub win_probability: f64,

    pub stats: SearchStats,
}

/// MCTS search state.
pub struct MctsSearch<'a, E: Evaluator> {
    tree: MctsTree,
    rules: &'a Rules,
    root_state: GameState,
    evaluator: &'a E,
    config: MctsConfig,
}

impl<'a, E: Evaluator> MctsSearch<'a, E> {
    /// Create a new MCTS search from the given game state.
    pub fn new(rules: &'a Rules, state: &GameState, evaluator: &'a E, config: MctsConfig) -> Self {
        Self {
            tree: MctsTree::new(rules, state),
            rules,
            root_state: state.clone(),
            evaluator,
            config,
        }
    }

    /// Run iterations until the budget is exhausted.
    ///
    /// At least one iteration always runs, so a root with legal moves always
    /// has a child to pick. A root without legal moves returns a pass at once.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let searcher = self.root_state.current_player();

        if self.tree.get(self.tree.root()).is_terminal() {
            debug!(player = %searcher, "No legal moves, passing");
            return Ok(SearchResult {
                mv: Move::pass(searcher),
                win_probability: game_result(self.rules, &self.root_state, searcher),
                stats: SearchStats {
                    tree_nodes: self.tree.len(),
                    ..SearchStats::default()
                },
            });
        }

        let mut stats = SearchStats::default();
        loop {
            let (depth, rollout_moves) = self.simulate(rng)?;
            stats.iterations += 1;
            stats.max_depth = stats.max_depth.max(depth);
            stats.rollout_moves += u64::from(rollout_moves);

            if self.config.budget_exhausted(start.elapsed(), stats.iterations) {
                break;
            }
        }
        stats.tree_nodes = self.tree.len();
        stats.elapsed_ms = duration_ms(start.elapsed());

        let (mv, visits) = self.tree.best_move().ok_or(SearchError::EmptyTree)?;

        // The root credits the opponent of the searching player
        let win_probability = 1.0 - self.tree.get(self.tree.root()).win_rate();

        debug!(
            player = %searcher,
            ?mv,
            visits,
            win_probability,
            iterations = stats.iterations,
            tree_nodes = stats.tree_nodes,
            elapsed_ms = stats.elapsed_ms,
            "Search complete"
        );

        Ok(SearchResult {
            mv,
            win_probability,
            stats,
        })
    }

    /// Run a single iteration (select -> expand -> rollout -> backpropagate).
    /// Returns the depth of the evaluated node and the rollout length.
    fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<(u32, u32), SearchError> {
        let mut node_id = self.tree.root();
        let mut state = self.root_state.clone();
        let mut depth = 0;

        // Selection: descend while fully expanded and not terminal
        while self.tree.get(node_id).is_fully_expanded() {
            let Some(child_id) = self.tree.select_child(node_id, self.config.exploration) else {
                break;
            };
            if let Some(mv) = self.tree.get(child_id).mv {
                state = apply_move(self.rules, &state, &mv, &mut NullConsequences)?;
            }
            node_id = child_id;
            depth += 1;
        }

        // Expansion: one random untried move becomes a child
        let untried = self.tree.get(node_id).untried.len();
        if untried > 0 {
            let idx = rng.gen_range(0..untried);
            let mv = self.tree.get(node_id).untried[idx];
            state = apply_move(self.rules, &state, &mv, &mut NullConsequences)?;
            node_id = self.tree.add_child(node_id, idx, self.rules, &state);
            depth += 1;
        }

        // Evaluation
        let eval = self.evaluator.evaluate(self.rules, &state, rng)?;

        // Backpropagation
        self.tree.backpropagate(node_id, eval.rewards);

        trace!(
            leaf = node_id.0,
            depth,
            rollout_moves = eval.rollout_moves,
            rewards = ?eval.rewards,
            "MCTS iteration complete"
        );

        Ok((depth, eval.rollout_moves))
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    /// The root node ID, for callers walking the tree.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Run a single search with a caller-supplied evaluator.
pub fn run_mcts<E: Evaluator>(
    rules: &Rules,
    state: &GameState,
    evaluator: &E,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    MctsSearch::new(rules, state, evaluator, config).run(rng)
}

/// Pick a move for the player to move in `state` using random-rollout MCTS.
pub fn choose_move(
    rules: &Rules,
    state: &GameState,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let evaluator = RolloutEvaluator::new(config.max_rollout_moves);
    run_mcts(rules, state, &evaluator, config.clone(), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{list_moves, CardId, CardSpec, CardValue, Placement, Player};
    use rand::SeedableRng;

    /// 3x1 board, target 7. Player 0 holds a 4 and a 1, player 1 a 3.
    /// Every line of play ends with player 0 ahead.
    fn forced_win_rules() -> Rules {
        let card = |id: u16, player: u8, value: u8| CardSpec {
            id: CardId(id),
            player: Player::try_from(player).unwrap(),
            value: CardValue::Number(value),
        };
        Rules::from_parts(3, 1, 7, vec![card(0, 0, 4), card(1, 0, 1), card(2, 1, 3)]).unwrap()
    }

    #[test]
    fn test_choose_move_is_legal() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let config = MctsConfig::for_testing();

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let result = choose_move(&rules, &state, &config, &mut rng).unwrap();

        let legal = list_moves(&rules, &state, state.current_player());
        assert!(legal.contains(&result.mv));
        assert!((0.0..=1.0).contains(&result.win_probability));
        assert_eq!(result.stats.iterations, 200);
        assert!(result.stats.tree_nodes > 1);
        assert!(result.stats.max_depth >= 1);
        assert!(result.stats.rollout_moves > 0);
    }

    #[test]
    fn test_same_seed_same_move() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let config = MctsConfig::for_testing().with_max_iterations(100);

        let mut rng_a = ChaCha20Rng::seed_from_u64(7);
        let mut rng_b = ChaCha20Rng::seed_from_u64(7);
        let a = choose_move(&rules, &state, &config, &mut rng_a).unwrap();
        let b = choose_move(&rules, &state, &config, &mut rng_b).unwrap();

        assert_eq!(a.mv, b.mv);
        assert_eq!(a.win_probability, b.win_probability);
        assert_eq!(a.stats.tree_nodes, b.stats.tree_nodes);
    }

    #[test]
    fn test_returns_most_visited_child() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let evaluator = RolloutEvaluator::default();
        let mut search = MctsSearch::new(&rules, &state, &evaluator, MctsConfig::for_testing());

        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let result = search.run(&mut rng).unwrap();

        let tree = search.tree();
        let root = tree.get(search.root());
        let max_visits = root
            .children
            .iter()
            .map(|&id| tree.get(id).visits)
            .max()
            .unwrap();
        let chosen = root
            .children
            .iter()
            .map(|&id| tree.get(id))
            .find(|node| node.mv == Some(result.mv))
            .unwrap();
        assert_eq!(chosen.visits, max_visits);
        assert_eq!(root.visits, result.stats.iterations);
    }

    #[test]
    fn test_no_legal_moves_passes() {
        // 1x1 board already holding player 0's card; player 1 cannot play over it
        let rules = Rules::with_decks(1, 1, 100, &[CardValue::Number(2)]).unwrap();
        let state = apply_move(
            &rules,
            &rules.initial_state(),
            &Move::place(Player::FIRST, CardId(0), Placement::new(0, 0)),
            &mut NullConsequences,
        )
        .unwrap();

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let result = choose_move(&rules, &state, &MctsConfig::for_testing(), &mut rng).unwrap();

        assert_eq!(result.mv, Move::pass(Player::SECOND));
        assert_eq!(result.stats.iterations, 0);
        assert_eq!(result.win_probability, 0.0);
    }

    #[test]
    fn test_forced_win_has_certain_probability() {
        let rules = forced_win_rules();
        let state = rules.initial_state();

        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let result = choose_move(&rules, &state, &MctsConfig::for_testing(), &mut rng).unwrap();

        assert!(result.mv.player() == Player::FIRST && !result.mv.is_pass());
        assert!((result.win_probability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_iteration_budget() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let config = MctsConfig::default().with_time_budget(Duration::ZERO);

        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let result = choose_move(&rules, &state, &config, &mut rng).unwrap();

        assert_eq!(result.stats.iterations, 1);
        assert_eq!(result.stats.tree_nodes, 2);
        assert!(list_moves(&rules, &state, Player::FIRST).contains(&result.mv));
    }
}
