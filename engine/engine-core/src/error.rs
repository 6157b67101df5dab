//! Error types for the rules engine.

use thiserror::Error;

use crate::card::{CardId, Player};
use crate::rules::Placement;

/// Configuration or data-integrity failures. These are never produced for an
/// ordinary illegal move; see [`Rejection`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Malformed card value: {0:?}")]
    MalformedCardValue(String),

    #[error("Invalid player index: {0}")]
    InvalidPlayer(u8),

    #[error("Invalid rules: {0}")]
    InvalidRules(String),

    #[error("Card {0} is not in the card table")]
    UnknownCard(CardId),

    #[error("Card {card} found in {found} locations, expected exactly one")]
    CardNotConserved { card: CardId, found: usize },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Why a move was refused. Refusal is an expected outcome, not a failure:
/// search and input handling probe illegal moves all the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("It is not {0}'s turn")]
    NotYourTurn(Player),

    #[error("Card {0} is not in the card table")]
    UnknownCard(CardId),

    #[error("Card {card} is not in {player}'s deck")]
    CardNotInDeck { card: CardId, player: Player },

    #[error("Placement ({}, {}) is outside the board", .0.col, .0.row)]
    OffBoard(Placement),

    #[error("Cannot play over a card owned by the other player")]
    OpponentOccupant,

    #[error("Can only play over a card of equal or higher value")]
    HigherValueRequired,

    #[error("Modifier cards must target an occupied cell")]
    ModifierOnEmptyCell,

    #[error("Modifier would push a card off the board")]
    PushOffBoard,
}
