//! The state-transition function.
//!
//! [`apply_move`] validates a move, places the card, resolves line clears to
//! convergence and hands the turn over. It never mutates its input: the
//! previous state stays valid for whoever still holds it.

use tracing::trace;

use crate::card::{CardId, CardValue, Direction, Player};
use crate::consequences::{Consequences, Event};
use crate::error::Rejection;
use crate::moves::Move;
use crate::rules::{Placement, Rules};
use crate::state::GameState;

/// Check a move against the current state without building the next one.
pub fn can_play(rules: &Rules, state: &GameState, mv: &Move) -> Result<(), Rejection> {
    let (player, card_id, placement) = match *mv {
        Move::Pass { .. } => return Ok(()),
        Move::Place {
            player,
            card_id,
            placement,
        } => (player, card_id, placement),
    };

    if player != state.current_player() {
        return Err(Rejection::NotYourTurn(player));
    }
    let card = rules.card(card_id).ok_or(Rejection::UnknownCard(card_id))?;
    if !state.deck(player).contains(card_id) {
        return Err(Rejection::CardNotInDeck {
            card: card_id,
            player,
        });
    }
    if !rules.contains(placement) {
        return Err(Rejection::OffBoard(placement));
    }

    let under = state.board().card_at(rules, placement);

    match card.value {
        CardValue::Number(value) => {
            if let Some(under) = under {
                if under.player != card.player {
                    return Err(Rejection::OpponentOccupant);
                }
                if under.value.numeric() < u32::from(value) {
                    return Err(Rejection::HigherValueRequired);
                }
            }
        }
        CardValue::Direction(dir) => {
            if under.is_none() {
                return Err(Rejection::ModifierOnEmptyCell);
            }
            if rules.neighbor(placement, dir).is_none() {
                return Err(Rejection::PushOffBoard);
            }
        }
    }

    Ok(())
}

/// Apply `mv` to `prev`, returning the resulting state.
///
/// On `Err` nothing happened and `prev` is still the position. On `Ok` the
/// turn has passed to the other player, even if the board ended up unchanged.
pub fn apply_move<C>(
    rules: &Rules,
    prev: &GameState,
    mv: &Move,
    cons: &mut C,
) -> Result<GameState, Rejection>
where
    C: Consequences + ?Sized,
{
    can_play(rules, prev, mv)?;

    let mut state = prev.clone();
    match *mv {
        Move::Pass { player } => {
            cons.record(Event::Passed { player }, &state);
        }
        Move::Place {
            player,
            card_id,
            placement,
        } => {
            let card = rules.card(card_id).ok_or(Rejection::UnknownCard(card_id))?;
            match card.value {
                CardValue::Number(_) => {
                    place_number(rules, &mut state, player, card_id, placement, cons)
                }
                CardValue::Direction(dir) => {
                    push_occupant(rules, &mut state, player, card_id, placement, dir, cons)
                }
            }
            clear_lines(rules, &mut state, cons);
        }
    }

    state.set_current_player(prev.current_player().other());
    Ok(state)
}

fn place_number<C: Consequences + ?Sized>(
    rules: &Rules,
    state: &mut GameState,
    player: Player,
    card_id: CardId,
    placement: Placement,
    cons: &mut C,
) {
    let under = state.board().cell(rules, placement);

    state.deck_mut(player).remove(card_id);
    state.board_mut().set(rules, placement, Some(card_id));
    cons.record(
        Event::CardPlaced {
            card: card_id,
            placement,
            over: under,
        },
        state,
    );

    if let Some(under) = under {
        state.deck_mut(player).add(under);
        cons.record(Event::CardReturned { card: under, player }, state);
    }
}

/// The modifier goes to the trash; the targeted card and whatever sits one
/// step away in `dir` trade places.
fn push_occupant<C: Consequences + ?Sized>(
    rules: &Rules,
    state: &mut GameState,
    player: Player,
    modifier: CardId,
    from: Placement,
    dir: Direction,
    cons: &mut C,
) {
    // can_play guarantees both of these
    let Some(to) = rules.neighbor(from, dir) else {
        return;
    };
    let Some(occupant) = state.board().cell(rules, from) else {
        return;
    };
    let displaced = state.board().cell(rules, to);

    state.deck_mut(player).remove(modifier);
    let board = state.board_mut();
    board.set(rules, from, displaced);
    board.set(rules, to, Some(occupant));
    board.trash(modifier);

    cons.record(Event::CardsSwapped { modifier, from, to }, state);
}

/// Lines whose numeric sum is exactly the target.
fn hot_lines(rules: &Rules, state: &GameState) -> (Vec<usize>, Vec<usize>) {
    let board = state.board();
    let cols = (0..rules.num_cols())
        .filter(|&col| board.sum_col(rules, col) == rules.max_sum())
        .collect();
    let rows = (0..rules.num_rows())
        .filter(|&row| board.sum_row(rules, row) == rules.max_sum())
        .collect();
    (cols, rows)
}

/// Clear hot columns then hot rows, and repeat until no line hits the target.
///
/// Terminates: a hot line sums to `max_sum > 0`, so it holds at least one
/// card, and every pass therefore strictly shrinks the board.
fn clear_lines<C: Consequences + ?Sized>(rules: &Rules, state: &mut GameState, cons: &mut C) {
    loop {
        let (cols, rows) = hot_lines(rules, state);
        if cols.is_empty() && rows.is_empty() {
            return;
        }
        let before = state.board().card_count();

        for &col in &cols {
            for row in 0..rules.num_rows() {
                discard(rules, state, Placement::new(col, row), cons);
            }
            cons.record(Event::ColCleared { col }, state);
        }
        for &row in &rows {
            for col in 0..rules.num_cols() {
                discard(rules, state, Placement::new(col, row), cons);
            }
            cons.record(Event::RowCleared { row }, state);
        }

        let after = state.board().card_count();
        trace!(?cols, ?rows, removed = before - after, "Cleared lines");
        if after == before {
            return;
        }
    }
}

fn discard<C: Consequences + ?Sized>(
    rules: &Rules,
    state: &mut GameState,
    at: Placement,
    cons: &mut C,
) {
    if let Some(card) = state.board().cell(rules, at) {
        let board = state.board_mut();
        board.set(rules, at, None);
        board.trash(card);
        cons.record(Event::CardLost { card }, state);
    }
}
