//! Strategy dispatch: turn a seat's AI type into a chosen move.

use engine_core::{apply_move, list_moves, Consequences, GameState, Move, Rejection, Rules};
use mcts::MctsConfig;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DispatchError;
use crate::player::AiType;

/// Win probability reported by strategies that do not estimate one.
pub const UNKNOWN_WIN_PROBABILITY: f64 = -1.0;

/// A move picked by some strategy, with its own estimate of how likely the
/// mover is to win (or [`UNKNOWN_WIN_PROBABILITY`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChosenMove {
    pub mv: Move,
    pub win_probability: f64,
    pub iterations: Option<u32>,
}

/// Uniformly random legal move for the player to move, or a pass when
/// there is none.
pub fn random_move(rules: &Rules, state: &GameState, rng: &mut ChaCha20Rng) -> ChosenMove {
    let player = state.current_player();
    let moves = list_moves(rules, state, player);

    let mv = if moves.is_empty() {
        Move::pass(player)
    } else {
        moves[rng.gen_range(0..moves.len())]
    };

    ChosenMove {
        mv,
        win_probability: UNKNOWN_WIN_PROBABILITY,
        iterations: None,
    }
}

/// Pick a move for the player to move using the given strategy.
pub fn choose_move(
    rules: &Rules,
    state: &GameState,
    ai_type: AiType,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<ChosenMove, DispatchError> {
    match ai_type {
        AiType::Random => Ok(random_move(rules, state, rng)),
        AiType::Mcts => {
            let result = mcts::choose_move(rules, state, config, rng)?;

            debug!(
                mv = ?result.mv,
                win_probability = format!("{:.3}", result.win_probability),
                iterations = result.stats.iterations,
                tree_nodes = result.stats.tree_nodes,
                max_depth = result.stats.max_depth,
                elapsed_ms = result.stats.elapsed_ms,
                "MCTS search complete"
            );

            Ok(ChosenMove {
                mv: result.mv,
                win_probability: result.win_probability,
                iterations: Some(result.stats.iterations),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStats {
    pub win_probability_estimate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
}

/// What the AI hands back to the game loop. `mv == None` means there was
/// nothing to play and the caller should apply a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiResult {
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    pub stats: AiStats,
}

impl From<ChosenMove> for AiResult {
    fn from(chosen: ChosenMove) -> Self {
        Self {
            mv: (!chosen.mv.is_pass()).then_some(chosen.mv),
            stats: AiStats {
                win_probability_estimate: chosen.win_probability,
                iterations: chosen.iterations,
            },
        }
    }
}

/// Hand an AI decision to the rules engine on the authoritative state.
pub fn apply_ai_result<C: Consequences + ?Sized>(
    rules: &Rules,
    state: &GameState,
    result: &AiResult,
    cons: &mut C,
) -> Result<GameState, Rejection> {
    let mv = result
        .mv
        .unwrap_or_else(|| Move::pass(state.current_player()));
    apply_move(rules, state, &mv, cons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{can_play, CardId, CardSpec, CardValue, NullConsequences, Player};
    use rand::SeedableRng;

    fn stuck_rules() -> Rules {
        // 1x1 board and a single card: once it is down nobody can move.
        Rules::from_parts(
            1,
            1,
            5,
            vec![CardSpec {
                id: CardId(0),
                player: Player::FIRST,
                value: CardValue::Number(3),
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_random_move_is_legal() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        for _ in 0..20 {
            let chosen = random_move(&rules, &state, &mut rng);
            assert!(!chosen.mv.is_pass());
            assert!(can_play(&rules, &state, &chosen.mv).is_ok());
            assert_eq!(chosen.win_probability, UNKNOWN_WIN_PROBABILITY);
        }
    }

    #[test]
    fn test_random_move_passes_when_stuck() {
        let rules = stuck_rules();
        let state = rules.initial_state();
        let first = list_moves(&rules, &state, Player::FIRST)[0];
        let state = apply_move(&rules, &state, &first, &mut NullConsequences).unwrap();

        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let chosen = random_move(&rules, &state, &mut rng);
        assert_eq!(chosen.mv, Move::pass(Player::SECOND));
    }

    #[test]
    fn test_choose_move_dispatches_on_ai_type() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let config = MctsConfig::for_testing().with_max_iterations(50);
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        let mcts = choose_move(&rules, &state, AiType::Mcts, &config, &mut rng).unwrap();
        assert_eq!(mcts.iterations, Some(50));
        assert!((0.0..=1.0).contains(&mcts.win_probability));

        let random = choose_move(&rules, &state, AiType::Random, &config, &mut rng).unwrap();
        assert_eq!(random.iterations, None);
        assert_eq!(random.win_probability, UNKNOWN_WIN_PROBABILITY);
    }

    #[test]
    fn test_pass_becomes_null_move() {
        let result = AiResult::from(ChosenMove {
            mv: Move::pass(Player::FIRST),
            win_probability: 0.5,
            iterations: Some(0),
        });
        assert_eq!(result.mv, None);

        let json = serde_json::to_value(result).unwrap();
        assert!(json["move"].is_null());
        assert_eq!(json["stats"]["winProbabilityEstimate"], 0.5);
    }

    #[test]
    fn test_apply_ai_result_substitutes_pass() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let result = AiResult {
            mv: None,
            stats: AiStats {
                win_probability_estimate: UNKNOWN_WIN_PROBABILITY,
                iterations: None,
            },
        };

        let next = apply_ai_result(&rules, &state, &result, &mut NullConsequences).unwrap();
        assert_eq!(next.current_player(), Player::SECOND);
        assert_eq!(next.board(), state.board());
    }

    #[test]
    fn test_apply_ai_result_rejects_stale_move() {
        let rules = Rules::standard();
        let state = rules.initial_state();
        let mv = list_moves(&rules, &state, Player::FIRST)[0];
        let result = AiResult::from(ChosenMove {
            mv,
            win_probability: 0.4,
            iterations: Some(10),
        });

        let next = apply_ai_result(&rules, &state, &result, &mut NullConsequences).unwrap();
        // The same decision replayed on the new position belongs to the wrong seat.
        assert!(apply_ai_result(&rules, &next, &result, &mut NullConsequences).is_err());
    }
}
