//! Game-level scenarios for the rules engine.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::*;

fn play(rules: &Rules, state: &GameState, player: u8, card: u16, col: usize, row: usize) -> GameState {
    let mv = Move::place(
        Player::try_from(player).unwrap(),
        CardId(card),
        Placement::new(col, row),
    );
    apply_move(rules, state, &mv, &mut NullConsequences).unwrap()
}

fn pass(rules: &Rules, state: &GameState) -> GameState {
    apply_move(
        rules,
        state,
        &Move::pass(state.current_player()),
        &mut NullConsequences,
    )
    .unwrap()
}

/// Move a card from its owner's deck straight onto the board.
fn setup(rules: &Rules, state: &mut GameState, card: u16, col: usize, row: usize) {
    let owner = rules.card(CardId(card)).unwrap().player;
    state.deck_mut(owner).remove(CardId(card));
    state
        .board_mut()
        .set(rules, Placement::new(col, row), Some(CardId(card)));
}

#[test]
fn test_row_clear_scenario() {
    // Standard ids: player 0 holds 0..=8 (values 1..=7, U, D), player 1 holds 9..=17.
    let rules = Rules::standard();
    let mut state = rules.initial_state();
    state = play(&rules, &state, 0, 1, 1, 1); // "2"
    state = play(&rules, &state, 1, 13, 2, 1); // "5"
    assert_eq!(compute_score(&rules, &state, Player::FIRST), 2);
    assert_eq!(compute_score(&rules, &state, Player::SECOND), 5);

    let mut cons = RecordingConsequences::new();
    let mv = Move::place(Player::FIRST, CardId(0), Placement::new(0, 1)); // "1"
    let next = apply_move(&rules, &state, &mv, &mut cons).unwrap();

    assert_eq!(cons.rows_cleared, vec![1]);
    assert!(cons.cols_cleared.is_empty());
    assert_eq!(next.board().card_count(), 0);
    assert_eq!(next.board().trashed(), &[CardId(0), CardId(1), CardId(13)]);
    assert_eq!(compute_score(&rules, &next, Player::FIRST), 0);
    assert_eq!(compute_score(&rules, &next, Player::SECOND), 0);
    assert_eq!(next.current_player(), Player::SECOND);
    assert!(next.validate(&rules).is_ok());

    let events: Vec<_> = cons.events().cloned().collect();
    assert_eq!(
        events,
        vec![
            Event::CardPlaced {
                card: CardId(0),
                placement: Placement::new(0, 1),
                over: None
            },
            Event::CardLost { card: CardId(0) },
            Event::CardLost { card: CardId(1) },
            Event::CardLost { card: CardId(13) },
            Event::RowCleared { row: 1 },
        ]
    );
    assert!(cons
        .snapshots
        .iter()
        .all(|snap| snap.millis == PRESENTATION_MILLIS));

    // the input state is untouched
    assert_eq!(state.board().card_count(), 2);
    assert_eq!(state.current_player(), Player::FIRST);
}

#[test]
fn test_clear_requires_exact_sum() {
    let rules = Rules::standard();
    let mut state = rules.initial_state();
    state = play(&rules, &state, 0, 3, 0, 0); // "4"
    state = play(&rules, &state, 1, 11, 1, 0); // "3", row 0 = 7
    assert_eq!(state.board().card_count(), 2);
    state = play(&rules, &state, 0, 1, 2, 0); // "2", row 0 = 9
    assert_eq!(state.board().card_count(), 3);
    assert_eq!(state.board().sum_row(&rules, 0), 9);

    let mut exact = rules.initial_state();
    exact = play(&rules, &exact, 0, 6, 0, 0); // "7"
    exact = play(&rules, &exact, 1, 9, 1, 0); // "1", row 0 = 8
    assert_eq!(exact.board().card_count(), 0);
    assert_eq!(exact.board().trashed().len(), 2);
}

#[test]
fn test_clearing_cascades_to_convergence() {
    let rules = Rules::standard();
    let mut state = rules.initial_state();
    // column 0 holds 1 + 3 + 5 = 9
    setup(&rules, &mut state, 0, 0, 0);
    setup(&rules, &mut state, 2, 0, 1);
    setup(&rules, &mut state, 4, 0, 2);
    assert!(state.validate(&rules).is_ok());

    // "7" makes row 0 sum to 8; clearing it leaves column 0 at 3 + 5 = 8
    let mut cons = RecordingConsequences::new();
    let mv = Move::place(Player::FIRST, CardId(6), Placement::new(1, 0));
    let next = apply_move(&rules, &state, &mv, &mut cons).unwrap();

    assert_eq!(cons.rows_cleared, vec![0]);
    assert_eq!(cons.cols_cleared, vec![0]);
    assert_eq!(next.board().card_count(), 0);
    assert_eq!(
        next.board().trashed(),
        &[CardId(0), CardId(6), CardId(2), CardId(4)]
    );
    assert!(next.validate(&rules).is_ok());
}

#[test]
fn test_columns_clear_before_rows() {
    let rules = Rules::standard();
    let mut state = rules.initial_state();
    setup(&rules, &mut state, 4, 0, 1); // "5" at (0,1)
    setup(&rules, &mut state, 14, 1, 0); // P1 "6" at (1,0)
    state = pass(&rules, &state);
    state = pass(&rules, &state);

    // "2" at (1,1) completes column 1 (6 + 2) while row 1 sits at 7
    let mut cons = RecordingConsequences::new();
    let mv = Move::place(Player::FIRST, CardId(1), Placement::new(1, 1));
    let next = apply_move(&rules, &state, &mv, &mut cons).unwrap();
    assert_eq!(cons.cols_cleared, vec![1]);
    assert!(cons.rows_cleared.is_empty());
    assert_eq!(next.board().card_count(), 1);

    let mut both = rules.initial_state();
    setup(&rules, &mut both, 4, 0, 1); // "5" at (0,1)
    setup(&rules, &mut both, 15, 1, 0); // P1 "7" at (1,0)
    setup(&rules, &mut both, 1, 2, 1); // "2" at (2,1), row 1 = 7
    let mut cons = RecordingConsequences::new();
    let mv = Move::place(Player::FIRST, CardId(0), Placement::new(1, 1)); // "1"
    let next = apply_move(&rules, &both, &mv, &mut cons).unwrap();

    // column 1 = 7 + 1 = 8 and row 1 = 5 + 1 + 2 = 8 in the same pass;
    // the shared card is trashed once, by the column
    assert_eq!(cons.cols_cleared, vec![1]);
    assert_eq!(cons.rows_cleared, vec![1]);
    assert_eq!(next.board().card_count(), 0);
    assert_eq!(
        next.board().trashed(),
        &[CardId(15), CardId(0), CardId(4), CardId(1)]
    );
    assert!(next.validate(&rules).is_ok());
}

#[test]
fn test_rejections() {
    let rules = Rules::standard();
    let start = rules.initial_state();
    let at = |col, row| Placement::new(col, row);
    let check = |state: &GameState, mv: Move| apply_move(&rules, state, &mv, &mut NullConsequences);

    assert_eq!(
        check(&start, Move::place(Player::SECOND, CardId(9), at(0, 0))),
        Err(Rejection::NotYourTurn(Player::SECOND))
    );
    assert_eq!(
        check(&start, Move::place(Player::FIRST, CardId(99), at(0, 0))),
        Err(Rejection::UnknownCard(CardId(99)))
    );
    assert_eq!(
        check(&start, Move::place(Player::FIRST, CardId(9), at(0, 0))),
        Err(Rejection::CardNotInDeck {
            card: CardId(9),
            player: Player::FIRST
        })
    );
    assert_eq!(
        check(&start, Move::place(Player::FIRST, CardId(0), at(4, 0))),
        Err(Rejection::OffBoard(at(4, 0)))
    );
    assert_eq!(
        check(&start, Move::place(Player::FIRST, CardId(7), at(0, 0))),
        Err(Rejection::ModifierOnEmptyCell)
    );

    // player 0 holds (0,0) with a "5"
    let held = play(&rules, &start, 0, 4, 0, 0);
    assert_eq!(
        check(&held, Move::place(Player::SECOND, CardId(9), at(0, 0))),
        Err(Rejection::OpponentOccupant)
    );

    let held = pass(&rules, &held);
    assert_eq!(
        check(&held, Move::place(Player::FIRST, CardId(5), at(0, 0))),
        Err(Rejection::HigherValueRequired)
    );
    assert_eq!(
        check(&held, Move::place(Player::FIRST, CardId(7), at(0, 0))),
        Err(Rejection::PushOffBoard)
    );
    // a card already played is no longer in the deck
    assert_eq!(
        check(&held, Move::place(Player::FIRST, CardId(4), at(1, 1))),
        Err(Rejection::CardNotInDeck {
            card: CardId(4),
            player: Player::FIRST
        })
    );
}

#[test]
fn test_playing_lower_returns_card_to_deck() {
    let rules = Rules::standard();
    let mut state = play(&rules, &rules.initial_state(), 0, 4, 0, 0); // "5"
    state = pass(&rules, &state);

    let mut cons = RecordingConsequences::new();
    let mv = Move::place(Player::FIRST, CardId(2), Placement::new(0, 0)); // "3"
    let next = apply_move(&rules, &state, &mv, &mut cons).unwrap();

    assert_eq!(next.board().cell(&rules, Placement::new(0, 0)), Some(CardId(2)));
    assert!(next.deck(Player::FIRST).contains(CardId(4)));
    assert!(!next.deck(Player::FIRST).contains(CardId(2)));
    // the returned card fills the first free slot, the one "3" just left
    assert_eq!(next.deck(Player::FIRST).cells()[2], Some(CardId(4)));
    assert_eq!(next.deck(Player::FIRST).cells()[4], None);
    assert!(cons.events().any(|e| *e
        == Event::CardReturned {
            card: CardId(4),
            player: Player::FIRST
        }));
    assert!(next.shares_deck_with(&state, Player::SECOND));
    assert!(next.validate(&rules).is_ok());
}

#[test]
fn test_modifier_swaps_with_neighbor() {
    let rules = Rules::standard();
    let mut state = play(&rules, &rules.initial_state(), 0, 2, 1, 1); // "3" at (1,1)
    state = play(&rules, &state, 1, 10, 1, 0); // P1 "2" at (1,0)

    let mut cons = RecordingConsequences::new();
    let mv = Move::place(Player::FIRST, CardId(7), Placement::new(1, 1)); // "U"
    let next = apply_move(&rules, &state, &mv, &mut cons).unwrap();

    let board = next.board();
    assert_eq!(board.cell(&rules, Placement::new(1, 0)), Some(CardId(2)));
    assert_eq!(board.cell(&rules, Placement::new(1, 1)), Some(CardId(10)));
    assert_eq!(board.trashed(), &[CardId(7)]);
    assert!(!next.deck(Player::FIRST).contains(CardId(7)));
    assert_eq!(
        cons.events().next(),
        Some(&Event::CardsSwapped {
            modifier: CardId(7),
            from: Placement::new(1, 1),
            to: Placement::new(1, 0)
        })
    );
    assert!(next.validate(&rules).is_ok());

    // pushing into an empty cell moves the occupant
    let state = play(&rules, &next, 1, 17, 1, 0); // P1 "D" on (1,0)
    assert_eq!(state.board().cell(&rules, Placement::new(1, 0)), Some(CardId(10)));
    assert_eq!(state.board().cell(&rules, Placement::new(1, 1)), Some(CardId(2)));
    let state = play(&rules, &state, 0, 8, 1, 1); // "D" on (1,1) into empty (1,2)
    assert_eq!(state.board().cell(&rules, Placement::new(1, 1)), None);
    assert_eq!(state.board().cell(&rules, Placement::new(1, 2)), Some(CardId(2)));
    assert!(state.validate(&rules).is_ok());
}

#[test]
fn test_turn_alternates() {
    let rules = Rules::standard();
    let state = rules.initial_state();
    assert_eq!(state.current_player(), Player::FIRST);

    let mut cons = RecordingConsequences::new();
    let passed = apply_move(&rules, &state, &Move::pass(Player::FIRST), &mut cons).unwrap();
    assert_eq!(passed.current_player(), Player::SECOND);
    assert_eq!(passed.board(), state.board());
    assert_eq!(
        cons.events().collect::<Vec<_>>(),
        vec![&Event::Passed {
            player: Player::FIRST
        }]
    );

    let placed = play(&rules, &passed, 1, 9, 0, 0);
    assert_eq!(placed.current_player(), Player::FIRST);
}

#[test]
fn test_random_playouts_conserve_cards() {
    let rules = Rules::standard();
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    for _ in 0..20 {
        let mut state = rules.initial_state();
        let mut plies = 0;
        while !is_game_over(&rules, &state) && plies < 1000 {
            let moves = list_moves(&rules, &state, state.current_player());
            let mv = moves
                .choose(&mut rng)
                .copied()
                .unwrap_or_else(|| Move::pass(state.current_player()));
            state = apply_move(&rules, &state, &mv, &mut NullConsequences).unwrap();
            assert!(state.validate(&rules).is_ok());
            plies += 1;
        }
        assert!(is_game_over(&rules, &state));
    }
}

#[test]
fn test_state_wire_format() {
    let rules = Rules::standard();
    let state = play(&rules, &rules.initial_state(), 0, 1, 1, 1);
    let json = serde_json::to_value(&state).unwrap();

    assert_eq!(json["currentPlayer"], 1);
    assert_eq!(json["board"]["cells"][5], 1);
    assert!(json["board"]["cells"][0].is_null());
    assert_eq!(json["decks"][0]["cells"][1], serde_json::Value::Null);
    assert_eq!(json["board"]["trashedCardIds"], serde_json::json!([]));
    assert!(json["board"].get("trashed_card_ids").is_none());

    let back: GameState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);
}
