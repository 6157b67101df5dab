//! State model and rules engine for the gridsum card game
//!
//! Two players place numbered cards on a grid. A row or column whose numeric
//! sum hits the target exactly is cleared into the trash; whoever holds more
//! points on the board when neither side can move wins.
//!
//! This crate provides:
//! - `Rules`: immutable board geometry, target and card table
//! - `GameState`: cheaply cloned, structurally shared position
//! - `apply_move` / `can_play`: the pure state-transition function
//! - `list_moves`: legal-move enumeration
//! - `compute_score` / `outcome`: scoring and end-of-game detection

pub mod apply;
pub mod card;
pub mod consequences;
pub mod error;
pub mod moves;
pub mod rules;
pub mod score;
pub mod state;

pub use apply::{apply_move, can_play};
pub use card::{CardId, CardSpec, CardValue, Direction, Player};
pub use consequences::{
    Consequences, Event, NullConsequences, RecordingConsequences, Snapshot, PRESENTATION_MILLIS,
};
pub use error::{CoreError, Rejection};
pub use moves::{has_moves, list_moves, Move};
pub use rules::{
    standard_deck, Placement, Rules, DEFAULT_MAX_SUM, DEFAULT_NUM_COLS, DEFAULT_NUM_ROWS,
    MAX_CELLS,
};
pub use score::{compute_score, game_result, is_game_over, outcome, GameOutcome};
pub use state::{Board, Cell, Deck, GameState};

#[cfg(test)]
mod tests;
