//! AI dispatch for the gridsum card game.
//!
//! Sits between the game loop and the search: decides when the AI should
//! move, routes the turn to the configured strategy (MCTS or uniform random),
//! and defines the JSON request/response pair exchanged with a background
//! worker.
//!
//! ```rust,ignore
//! use engine_ai::{AiWorker, GameSnapshot, PlayerConfig, AiType, WorkerRequest};
//!
//! let players = [PlayerConfig::ai("red", AiType::Mcts), PlayerConfig::human("blue")];
//! let request = WorkerRequest::ProcessAi {
//!     game_snapshot: GameSnapshot::new(&rules, &state, &players),
//! };
//! let response = AiWorker::new(mcts::MctsConfig::default()).handle(&request)?;
//! ```

pub mod dispatch;
pub mod error;
pub mod messages;
pub mod player;
pub mod slot;

pub use dispatch::{
    apply_ai_result, choose_move, random_move, AiResult, AiStats, ChosenMove,
    UNKNOWN_WIN_PROBABILITY,
};
pub use error::DispatchError;
pub use messages::{handle_request, process_ai, AiWorker, GameSnapshot, WorkerRequest, WorkerResponse};
pub use player::{seat, should_invoke_ai, AiType, PlayerConfig, PlayerKind};
pub use slot::{SearchSlot, SearchTicket};
