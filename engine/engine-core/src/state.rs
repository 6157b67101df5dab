//! Board, deck and game state values.
//!
//! A [`GameState`] is never mutated once handed out. Cloning one is cheap
//! (three `Arc` bumps); the rules engine clones, then copies-on-write only
//! the board or deck a transition actually touches. Search trees and the
//! authoritative game can therefore hold the same historical states freely.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::card::{CardId, CardSpec, Player};
use crate::error::CoreError;
use crate::rules::{Placement, Rules};

/// Contents of a board cell or deck slot.
pub type Cell = Option<CardId>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Row-major cells, indexed by `col + row * num_cols`.
    cells: Vec<Cell>,
    /// Cards removed from play, in the order they were removed.
    trashed_card_ids: Vec<CardId>,
}

impl Board {
    pub fn empty(num_cols: usize, num_rows: usize) -> Self {
        Self {
            cells: vec![None; num_cols * num_rows],
            trashed_card_ids: Vec::new(),
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn trashed(&self) -> &[CardId] {
        &self.trashed_card_ids
    }

    #[inline]
    pub fn cell(&self, rules: &Rules, at: Placement) -> Cell {
        self.cells[rules.cell_index(at)]
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Sum of numeric card values in `row`.
    pub fn sum_row(&self, rules: &Rules, row: usize) -> u32 {
        (0..rules.num_cols())
            .map(|col| self.value_at(rules, Placement::new(col, row)))
            .sum()
    }

    /// Sum of numeric card values in `col`.
    pub fn sum_col(&self, rules: &Rules, col: usize) -> u32 {
        (0..rules.num_rows())
            .map(|row| self.value_at(rules, Placement::new(col, row)))
            .sum()
    }

    /// The card spec for whatever sits at `at`.
    pub fn card_at<'r>(&self, rules: &'r Rules, at: Placement) -> Option<&'r CardSpec> {
        self.cell(rules, at).and_then(|id| rules.card(id))
    }

    fn value_at(&self, rules: &Rules, at: Placement) -> u32 {
        self.card_at(rules, at)
            .map_or(0, |card| card.value.numeric())
    }

    pub(crate) fn set(&mut self, rules: &Rules, at: Placement, cell: Cell) {
        let idx = rules.cell_index(at);
        self.cells[idx] = cell;
    }

    pub(crate) fn trash(&mut self, card: CardId) {
        self.trashed_card_ids.push(card);
    }
}

/// A player's hand. Slots are fixed; an empty slot is a card already played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cells: Vec<Cell>,
}

impl Deck {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn contains(&self, card: CardId) -> bool {
        self.cells.contains(&Some(card))
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Cards still held, in slot order.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub(crate) fn remove(&mut self, card: CardId) {
        for slot in self.cells.iter_mut() {
            if *slot == Some(card) {
                *slot = None;
            }
        }
    }

    /// Put a card back into the first empty slot.
    pub(crate) fn add(&mut self, card: CardId) {
        if let Some(slot) = self.cells.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(card);
        } else {
            self.cells.push(Some(card));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    current_player: Player,
    board: Arc<Board>,
    decks: [Arc<Deck>; 2],
}

impl GameState {
    pub fn new(current_player: Player, board: Board, decks: [Deck; 2]) -> Self {
        Self {
            current_player,
            board: Arc::new(board),
            decks: decks.map(Arc::new),
        }
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn deck(&self, player: Player) -> &Deck {
        &self.decks[player.index()]
    }

    /// Whether `self` and `other` share the same board allocation.
    pub fn shares_board_with(&self, other: &GameState) -> bool {
        Arc::ptr_eq(&self.board, &other.board)
    }

    /// Whether `self` and `other` share the same deck allocation for `player`.
    pub fn shares_deck_with(&self, other: &GameState, player: Player) -> bool {
        Arc::ptr_eq(&self.decks[player.index()], &other.decks[player.index()])
    }

    /// Same position with the other player to move.
    pub fn with_turn_advanced(&self) -> GameState {
        let mut next = self.clone();
        next.current_player = self.current_player.other();
        next
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        Arc::make_mut(&mut self.board)
    }

    pub(crate) fn deck_mut(&mut self, player: Player) -> &mut Deck {
        Arc::make_mut(&mut self.decks[player.index()])
    }

    pub(crate) fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Check the state against the rules: board dimensions, deck ownership,
    /// and that every card sits in exactly one location.
    pub fn validate(&self, rules: &Rules) -> Result<(), CoreError> {
        if self.board.cells.len() != rules.num_cells() {
            return Err(CoreError::InvalidState(format!(
                "board has {} cells, rules expect {}",
                self.board.cells.len(),
                rules.num_cells()
            )));
        }

        let mut seen = vec![0usize; rules.cards().len()];
        let mut count = |card: CardId| -> Result<(), CoreError> {
            let slot = seen
                .get_mut(card.index())
                .ok_or(CoreError::UnknownCard(card))?;
            *slot += 1;
            Ok(())
        };

        for player in Player::BOTH {
            for card in self.deck(player).card_ids() {
                count(card)?;
                let spec = rules.card(card).ok_or(CoreError::UnknownCard(card))?;
                if spec.player != player {
                    return Err(CoreError::InvalidState(format!(
                        "card {card} owned by {} sits in {player}'s deck",
                        spec.player
                    )));
                }
            }
        }
        for card in self.board.cells.iter().flatten() {
            count(*card)?;
        }
        for card in &self.board.trashed_card_ids {
            count(*card)?;
        }

        match seen.iter().position(|&n| n != 1) {
            Some(idx) => Err(CoreError::CardNotConserved {
                card: CardId(idx as u16),
                found: seen[idx],
            }),
            None => Ok(()),
        }
    }
}
