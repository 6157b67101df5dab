//! Seat configuration: who plays each side, and how.

use std::fmt;
use std::str::FromStr;

use engine_core::{GameState, Player};
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiType {
    #[default]
    Mcts,
    Random,
}

impl FromStr for PlayerKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "ai" => Ok(PlayerKind::Ai),
            other => Err(DispatchError::UnknownPlayerKind(other.to_string())),
        }
    }
}

impl FromStr for AiType {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mcts" => Ok(AiType::Mcts),
            "random" => Ok(AiType::Random),
            other => Err(DispatchError::UnknownAiType(other.to_string())),
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "human"),
            PlayerKind::Ai => write!(f, "ai"),
        }
    }
}

impl fmt::Display for AiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiType::Mcts => write!(f, "mcts"),
            AiType::Random => write!(f, "random"),
        }
    }
}

/// One seat at the table. `ai_type` is only consulted for AI seats and
/// defaults to MCTS when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    pub name: String,
    pub kind: PlayerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_type: Option<AiType>,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
            ai_type: None,
        }
    }

    pub fn ai(name: impl Into<String>, ai_type: AiType) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Ai,
            ai_type: Some(ai_type),
        }
    }

    #[inline]
    pub fn is_ai(&self) -> bool {
        self.kind == PlayerKind::Ai
    }

    /// The strategy this seat plays with, or `None` for a human.
    pub fn strategy(&self) -> Option<AiType> {
        self.is_ai().then(|| self.ai_type.unwrap_or_default())
    }
}

/// Whether the game loop should hand the turn to the AI: the seat to move
/// is configured as an AI.
pub fn should_invoke_ai(players: &[PlayerConfig; 2], state: &GameState) -> bool {
    players[state.current_player().index()].is_ai()
}

/// Seat lookup by player.
pub fn seat(players: &[PlayerConfig; 2], player: Player) -> &PlayerConfig {
    &players[player.index()]
}
