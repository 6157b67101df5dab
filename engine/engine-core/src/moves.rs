//! Moves and legal-move enumeration.

use serde::{Deserialize, Serialize};

use crate::apply::can_play;
use crate::card::{CardId, Player};
use crate::rules::{Placement, Rules};
use crate::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Move {
    /// Give up the turn. Always legal.
    Pass { player: Player },
    /// Play `card_id` from the player's deck onto `placement`.
    #[serde(rename_all = "camelCase")]
    Place {
        player: Player,
        card_id: CardId,
        placement: Placement,
    },
}

impl Move {
    #[inline]
    pub fn pass(player: Player) -> Self {
        Move::Pass { player }
    }

    #[inline]
    pub fn place(player: Player, card_id: CardId, placement: Placement) -> Self {
        Move::Place {
            player,
            card_id,
            placement,
        }
    }

    #[inline]
    pub fn player(&self) -> Player {
        match *self {
            Move::Pass { player } | Move::Place { player, .. } => player,
        }
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass { .. })
    }
}

/// Every legal placement for `player`: each card in their deck (slot order)
/// against each cell (column-major), kept iff [`can_play`] accepts it.
///
/// Passes are not listed; an empty result means `player` cannot move.
/// Only the player to move has legal placements, so asking for the other
/// player always yields nothing; use [`GameState::with_turn_advanced`] to
/// ask what they could play on their turn.
pub fn list_moves(rules: &Rules, state: &GameState, player: Player) -> Vec<Move> {
    let deck = state.deck(player);
    let mut moves = Vec::with_capacity(deck.card_count() * rules.num_cells());

    for card_id in deck.card_ids() {
        for placement in rules.placements() {
            let mv = Move::place(player, card_id, placement);
            if can_play(rules, state, &mv).is_ok() {
                moves.push(mv);
            }
        }
    }

    moves
}

/// Whether `player` has at least one legal placement. Cheaper than
/// `!list_moves(..).is_empty()` since it stops at the first hit.
pub fn has_moves(rules: &Rules, state: &GameState, player: Player) -> bool {
    state.deck(player).card_ids().any(|card_id| {
        rules
            .placements()
            .any(|placement| can_play(rules, state, &Move::place(player, card_id, placement)).is_ok())
    })
}
