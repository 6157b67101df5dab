//! Evaluator trait for leaf evaluation.
//!
//! The evaluator estimates the outcome of a position reached at the edge of
//! the tree. The default [`RolloutEvaluator`] plays uniformly random moves
//! until the side to move is stuck and scores the final board.

use engine_core::{
    apply_move, game_result, list_moves, GameState, NullConsequences, Player, Rejection, Rules,
};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Rollout played a move the rules refused: {0}")]
    IllegalRolloutMove(#[from] Rejection),

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),
}

/// Result of evaluating a game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Reward per player (indexed by player): 1.0 win, 0.5 draw, 0.0 loss.
    pub rewards: [f64; 2],

    /// Moves played to reach the scored position.
    pub rollout_moves: u32,
}

/// Trait for leaf evaluators.
pub trait Evaluator: Send + Sync {
    /// Estimate the outcome of `state`.
    fn evaluate(
        &self,
        rules: &Rules,
        state: &GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Evaluation, EvaluatorError>;
}

/// Random rollout evaluator that plays random moves to a terminal state.
/// Returns the game outcome as the value estimate.
#[derive(Debug, Clone)]
pub struct RolloutEvaluator {
    /// Maximum rollout length to guarantee termination
    pub max_moves: u32,
}

impl Default for RolloutEvaluator {
    fn default() -> Self {
        Self { max_moves: 500 }
    }
}

impl RolloutEvaluator {
    pub fn new(max_moves: u32) -> Self {
        Self { max_moves }
    }
}

impl Evaluator for RolloutEvaluator {
    fn evaluate(
        &self,
        rules: &Rules,
        state: &GameState,
        rng: &mut ChaCha20Rng,
    ) -> Result<Evaluation, EvaluatorError> {
        let mut state = state.clone();
        let mut rollout_moves = 0;

        while rollout_moves < self.max_moves {
            let moves = list_moves(rules, &state, state.current_player());
            let Some(mv) = moves.choose(rng) else {
                break;
            };
            state = apply_move(rules, &state, mv, &mut NullConsequences)?;
            rollout_moves += 1;
        }

        Ok(Evaluation {
            rewards: Player::BOTH.map(|player| game_result(rules, &state, player)),
            rollout_moves,
        })
    }
}
