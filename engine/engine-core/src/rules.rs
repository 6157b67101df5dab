//! Static game configuration: board geometry, clearing target and card table.
//!
//! `Rules` is the immutable context every rules function takes by reference.
//! It holds no per-game mutable state, so any number of searches may share it.

use serde::{Deserialize, Serialize};

use crate::card::{CardId, CardSpec, CardValue, Direction, Player};
use crate::error::CoreError;
use crate::state::{Board, Deck, GameState};

/// Standard board width.
pub const DEFAULT_NUM_COLS: usize = 4;
/// Standard board height.
pub const DEFAULT_NUM_ROWS: usize = 3;
/// Standard clearing target.
pub const DEFAULT_MAX_SUM: u32 = 8;
/// Largest board accepted, in cells.
pub const MAX_CELLS: usize = 4096;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub col: usize,
    pub row: usize,
}

impl Placement {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Per-player deck composition used by the standard game: `1..=7, U, D`.
pub fn standard_deck() -> Vec<CardValue> {
    let mut deck: Vec<CardValue> = (1..=7).map(CardValue::Number).collect();
    deck.push(CardValue::Direction(Direction::Up));
    deck.push(CardValue::Direction(Direction::Down));
    deck
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RulesParts")]
pub struct Rules {
    num_cols: usize,
    num_rows: usize,
    max_sum: u32,
    cards: Vec<CardSpec>,
}

/// Unchecked wire form; deserializing goes through [`Rules::from_parts`].
#[derive(Deserialize)]
struct RulesParts {
    num_cols: usize,
    num_rows: usize,
    max_sum: u32,
    cards: Vec<CardSpec>,
}

impl TryFrom<RulesParts> for Rules {
    type Error = CoreError;

    fn try_from(parts: RulesParts) -> Result<Self, Self::Error> {
        Rules::from_parts(parts.num_cols, parts.num_rows, parts.max_sum, parts.cards)
    }
}

impl Rules {
    /// Build rules from an explicit card table.
    ///
    /// Card ids must be dense (`cards[i].id == i`), numeric values non-zero,
    /// and `max_sum` positive so that every clear removes at least one card.
    pub fn from_parts(
        num_cols: usize,
        num_rows: usize,
        max_sum: u32,
        cards: Vec<CardSpec>,
    ) -> Result<Self, CoreError> {
        if num_cols == 0 || num_rows == 0 {
            return Err(CoreError::InvalidRules(format!(
                "board must be at least 1x1, got {num_cols}x{num_rows}"
            )));
        }
        match num_cols.checked_mul(num_rows) {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => {
                return Err(CoreError::InvalidRules(format!(
                    "board of {num_cols}x{num_rows} exceeds {MAX_CELLS} cells"
                )))
            }
        }
        if max_sum == 0 {
            return Err(CoreError::InvalidRules("max_sum must be positive".into()));
        }
        if cards.len() > usize::from(u16::MAX) {
            return Err(CoreError::InvalidRules(format!(
                "too many cards: {}",
                cards.len()
            )));
        }
        for (i, card) in cards.iter().enumerate() {
            if card.id.index() != i {
                return Err(CoreError::InvalidRules(format!(
                    "card ids must be dense: slot {i} holds {}",
                    card.id
                )));
            }
            if card.value == CardValue::Number(0) {
                return Err(CoreError::MalformedCardValue("0".into()));
            }
        }

        Ok(Self {
            num_cols,
            num_rows,
            max_sum,
            cards,
        })
    }

    /// Build rules where both players get the same deck composition.
    /// Player 0's cards take the first ids, player 1's the next ones.
    pub fn with_decks(
        num_cols: usize,
        num_rows: usize,
        max_sum: u32,
        deck: &[CardValue],
    ) -> Result<Self, CoreError> {
        let cards = Player::BOTH
            .iter()
            .flat_map(|&player| deck.iter().map(move |&value| (player, value)))
            .enumerate()
            .map(|(i, (player, value))| CardSpec {
                id: CardId(i as u16),
                player,
                value,
            })
            .collect();
        Self::from_parts(num_cols, num_rows, max_sum, cards)
    }

    /// The 4x3, target-8 game with the standard deck.
    pub fn standard() -> Self {
        Self::with_decks(
            DEFAULT_NUM_COLS,
            DEFAULT_NUM_ROWS,
            DEFAULT_MAX_SUM,
            &standard_deck(),
        )
        .expect("standard rules are valid")
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.num_cols * self.num_rows
    }

    #[inline]
    pub fn max_sum(&self) -> u32 {
        self.max_sum
    }

    #[inline]
    pub fn cards(&self) -> &[CardSpec] {
        &self.cards
    }

    #[inline]
    pub fn card(&self, id: CardId) -> Option<&CardSpec> {
        self.cards.get(id.index())
    }

    #[inline]
    pub fn cell_index(&self, placement: Placement) -> usize {
        placement.col + placement.row * self.num_cols
    }

    #[inline]
    pub fn contains(&self, placement: Placement) -> bool {
        placement.col < self.num_cols && placement.row < self.num_rows
    }

    /// The cell one step from `from` in `dir`, or `None` past the edge.
    pub fn neighbor(&self, from: Placement, dir: Direction) -> Option<Placement> {
        let (dcol, drow) = dir.offset();
        let col = from.col.checked_add_signed(dcol)?;
        let row = from.row.checked_add_signed(drow)?;
        let to = Placement::new(col, row);
        self.contains(to).then_some(to)
    }

    /// Iterate every board coordinate, column-major.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        (0..self.num_cols)
            .flat_map(move |col| (0..self.num_rows).map(move |row| Placement::new(col, row)))
    }

    /// Starting position: empty board, every card in its owner's deck, player 0 to move.
    pub fn initial_state(&self) -> GameState {
        let decks = Player::BOTH.map(|player| {
            Deck::new(
                self.cards
                    .iter()
                    .filter(|card| card.player == player)
                    .map(|card| Some(card.id))
                    .collect(),
            )
        });
        GameState::new(
            Player::FIRST,
            Board::empty(self.num_cols, self.num_rows),
            decks,
        )
    }
}
