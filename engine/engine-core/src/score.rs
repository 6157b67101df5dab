//! Scoring and end-of-game detection.

use serde::Serialize;

use crate::card::{CardValue, Player};
use crate::moves::has_moves;
use crate::rules::Rules;
use crate::state::GameState;

/// Sum of `player`'s numeric cards currently on the board.
pub fn compute_score(rules: &Rules, state: &GameState, player: Player) -> u32 {
    state
        .board()
        .cells()
        .iter()
        .flatten()
        .filter_map(|&id| rules.card(id))
        .filter(|card| card.player == player)
        .map(|card| match card.value {
            CardValue::Number(n) => u32::from(n),
            CardValue::Direction(_) => 0,
        })
        .sum()
}

/// Reward for `player` in `state`: 1.0 ahead, 0.0 behind, 0.5 level.
pub fn game_result(rules: &Rules, state: &GameState, player: Player) -> f64 {
    let mine = compute_score(rules, state, player);
    let theirs = compute_score(rules, state, player.other());
    match mine.cmp(&theirs) {
        std::cmp::Ordering::Greater => 1.0,
        std::cmp::Ordering::Less => 0.0,
        std::cmp::Ordering::Equal => 0.5,
    }
}

/// The game ends when neither player can place a card.
pub fn is_game_over(rules: &Rules, state: &GameState) -> bool {
    !has_moves(rules, state, state.current_player())
        && !has_moves(rules, &state.with_turn_advanced(), state.current_player().other())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    /// Indexed by player.
    pub scores: [u32; 2],
    /// `None` on a draw.
    pub winner: Option<Player>,
}

/// Final scores and winner of `state`. Meaningful once [`is_game_over`]
/// holds, but computable at any point.
pub fn outcome(rules: &Rules, state: &GameState) -> GameOutcome {
    let scores = Player::BOTH.map(|player| compute_score(rules, state, player));
    let winner = match scores[0].cmp(&scores[1]) {
        std::cmp::Ordering::Greater => Some(Player::FIRST),
        std::cmp::Ordering::Less => Some(Player::SECOND),
        std::cmp::Ordering::Equal => None,
    };
    GameOutcome { scores, winner }
}
