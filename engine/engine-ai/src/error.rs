//! Error types for AI dispatch.

use engine_core::{CoreError, Player};
use mcts::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid game snapshot: {0}")]
    InvalidSnapshot(#[from] CoreError),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("{0} is not an AI seat")]
    NotAnAi(Player),

    #[error("Malformed worker message: {0}")]
    Message(#[from] serde_json::Error),

    #[error("Unknown player kind: {0:?} (expected \"human\" or \"ai\")")]
    UnknownPlayerKind(String),

    #[error("Unknown AI type: {0:?} (expected \"mcts\" or \"random\")")]
    UnknownAiType(String),
}
