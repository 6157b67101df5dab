//! Worker message contract.
//!
//! The game loop sends a [`WorkerRequest`] carrying a self-contained
//! [`GameSnapshot`] and gets a [`WorkerResponse`] back. Both sides speak
//! JSON:
//!
//! ```text
//! -> {"task":"processAI","gameSnapshot":{"numCols":4,"numRows":3,"maxSum":8,...}}
//! <- {"task":"processAI","result":{"move":{...}|null,"stats":{"winProbabilityEstimate":0.61}}}
//! ```

use engine_core::{CardSpec, GameState, Rules};
use mcts::MctsConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dispatch::{choose_move, AiResult};
use crate::error::DispatchError;
use crate::player::PlayerConfig;

/// Everything the AI needs to pick a move. No hidden globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub num_cols: usize,
    pub num_rows: usize,
    pub max_sum: u32,
    pub state: GameState,
    pub card_specs: Vec<CardSpec>,
    pub players: [PlayerConfig; 2],
}

impl GameSnapshot {
    pub fn new(rules: &Rules, state: &GameState, players: &[PlayerConfig; 2]) -> Self {
        Self {
            num_cols: rules.num_cols(),
            num_rows: rules.num_rows(),
            max_sum: rules.max_sum(),
            state: state.clone(),
            card_specs: rules.cards().to_vec(),
            players: players.clone(),
        }
    }

    /// Rebuild the rules this snapshot was taken under, and check that the
    /// carried state is consistent with them.
    pub fn rules(&self) -> Result<Rules, DispatchError> {
        let rules = Rules::from_parts(
            self.num_cols,
            self.num_rows,
            self.max_sum,
            self.card_specs.clone(),
        )?;
        self.state.validate(&rules)?;
        Ok(rules)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task")]
pub enum WorkerRequest {
    #[serde(rename = "processAI", rename_all = "camelCase")]
    ProcessAi { game_snapshot: GameSnapshot },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task")]
pub enum WorkerResponse {
    #[serde(rename = "processAI")]
    ProcessAi { result: AiResult },
}

/// Pick a move for the seat to move in `snapshot`.
///
/// Fails with [`DispatchError::NotAnAi`] if that seat is a human.
pub fn process_ai(
    snapshot: &GameSnapshot,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<AiResult, DispatchError> {
    let rules = snapshot.rules()?;
    let state = &snapshot.state;
    let player = state.current_player();

    let seat = &snapshot.players[player.index()];
    let strategy = seat.strategy().ok_or(DispatchError::NotAnAi(player))?;
    debug!(seat = %seat.name, %strategy, "Processing AI turn");

    let chosen = choose_move(&rules, state, strategy, config, rng)?;
    Ok(AiResult::from(chosen))
}

pub fn handle_request(
    request: &WorkerRequest,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<WorkerResponse, DispatchError> {
    match request {
        WorkerRequest::ProcessAi { game_snapshot } => {
            let result = process_ai(game_snapshot, config, rng)?;
            Ok(WorkerResponse::ProcessAi { result })
        }
    }
}

/// Owns the search configuration and random stream for one worker.
pub struct AiWorker {
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl AiWorker {
    pub fn new(config: MctsConfig) -> Self {
        Self {
            config,
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn handle(&mut self, request: &WorkerRequest) -> Result<WorkerResponse, DispatchError> {
        handle_request(request, &self.config, &mut self.rng)
    }

    /// JSON in, JSON out.
    pub fn handle_json(&mut self, request: &str) -> Result<String, DispatchError> {
        let request: WorkerRequest = serde_json::from_str(request).map_err(|e| {
            warn!(error = %e, "Rejecting malformed worker request");
            e
        })?;
        let response = self.handle(&request)?;
        Ok(serde_json::to_string(&response)?)
    }
}
