//! Card identities and values.
//!
//! Card specs are created once when the rules are built and never change;
//! only a card's location (deck slot, board cell, trash) moves through
//! [`GameState`](crate::GameState) values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Dense card identifier. Ids index the card table held by [`Rules`](crate::Rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u16);

impl CardId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two seats. Serialized as a bare `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Player(u8);

impl Player {
    pub const FIRST: Player = Player(0);
    pub const SECOND: Player = Player(1);
    pub const BOTH: [Player; 2] = [Player::FIRST, Player::SECOND];

    #[inline]
    pub fn other(self) -> Player {
        Player(1 - self.0)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Player {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 | 1 => Ok(Player(value)),
            other => Err(CoreError::InvalidPlayer(other)),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Push direction carried by a modifier card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "U")]
    Up,
    #[serde(rename = "D")]
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Column/row delta of one step in this direction. Rows grow downwards.
    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Single-letter deck notation (`L`, `R`, `U`, `D`).
    pub fn tag(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }

    /// Parse deck notation. Anything but the four known tags is a data-integrity error.
    pub fn from_tag(tag: &str) -> Result<Direction, CoreError> {
        match tag {
            "L" => Ok(Direction::Left),
            "R" => Ok(Direction::Right),
            "U" => Ok(Direction::Up),
            "D" => Ok(Direction::Down),
            other => Err(CoreError::MalformedCardValue(other.to_string())),
        }
    }
}

/// What is printed on a card: a magnitude or a push instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardValue {
    Number(u8),
    Direction(Direction),
}

impl CardValue {
    /// Contribution to row/column sums and scores. Modifiers count as zero.
    #[inline]
    pub fn numeric(self) -> u32 {
        match self {
            CardValue::Number(n) => u32::from(n),
            CardValue::Direction(_) => 0,
        }
    }

    #[inline]
    pub fn is_modifier(self) -> bool {
        matches!(self, CardValue::Direction(_))
    }
}

impl FromStr for CardValue {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            if n == 0 {
                return Err(CoreError::MalformedCardValue(s.to_string()));
            }
            return Ok(CardValue::Number(n));
        }
        Direction::from_tag(s).map(CardValue::Direction)
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Number(n) => write!(f, "{n}"),
            CardValue::Direction(d) => write!(f, "{}", d.tag()),
        }
    }
}

/// Immutable description of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSpec {
    pub id: CardId,
    pub player: Player,
    pub value: CardValue,
}
