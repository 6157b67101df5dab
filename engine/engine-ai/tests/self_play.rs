//! Full games driven only through the JSON worker contract.

use engine_ai::{
    apply_ai_result, should_invoke_ai, AiType, AiWorker, GameSnapshot, PlayerConfig,
    SearchSlot, WorkerRequest, WorkerResponse,
};
use engine_core::{is_game_over, outcome, NullConsequences, Rules};
use mcts::MctsConfig;

fn play(players: [PlayerConfig; 2], seed: u64) -> (u32, engine_core::GameOutcome) {
    let rules = Rules::standard();
    let mut worker = AiWorker::with_seed(MctsConfig::for_testing().with_max_iterations(20), seed);
    let slot = SearchSlot::new();

    let mut state = rules.initial_state();
    let mut plies = 0;
    while !is_game_over(&rules, &state) {
        assert!(plies < 1000, "game did not terminate");
        assert!(should_invoke_ai(&players, &state));

        let request = serde_json::to_string(&WorkerRequest::ProcessAi {
            game_snapshot: GameSnapshot::new(&rules, &state, &players),
        })
        .unwrap();

        let ticket = slot.try_begin().unwrap();
        let response = worker.handle_json(&request).unwrap();
        drop(ticket);

        let WorkerResponse::ProcessAi { result } = serde_json::from_str(&response).unwrap();
        state = apply_ai_result(&rules, &state, &result, &mut NullConsequences).unwrap();
        state.validate(&rules).unwrap();
        plies += 1;
    }
    (plies, outcome(&rules, &state))
}

#[test]
fn random_vs_random_finishes() {
    let players = [
        PlayerConfig::ai("red", AiType::Random),
        PlayerConfig::ai("blue", AiType::Random),
    ];
    let (plies, result) = play(players, 1);
    assert!(plies > 0);
    match result.winner {
        Some(w) => assert!(result.scores[w.index()] > result.scores[w.other().index()]),
        None => assert_eq!(result.scores[0], result.scores[1]),
    }
}

#[test]
fn mcts_vs_random_finishes() {
    let players = [
        PlayerConfig::ai("red", AiType::Mcts),
        PlayerConfig::ai("blue", AiType::Random),
    ];
    let (plies, _) = play(players, 2);
    assert!(plies > 0);
}

#[test]
fn same_seed_replays_the_same_game() {
    let players = [
        PlayerConfig::ai("red", AiType::Mcts),
        PlayerConfig::ai("blue", AiType::Mcts),
    ];
    assert_eq!(play(players.clone(), 9), play(players, 9));
}
