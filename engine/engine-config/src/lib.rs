//! Shared configuration for gridsum components.
//!
//! Values resolve in three layers, later layers winning:
//!
//! 1. `config.defaults.toml`, embedded at compile time
//! 2. a `config.toml` file (`GRIDSUM_CONFIG`, else [`CONFIG_SEARCH_PATHS`])
//! 3. `GRIDSUM_<SECTION>_<KEY>` environment variables
//!
//! ```text
//! GRIDSUM_COMMON_LOG_LEVEL=debug
//! GRIDSUM_GAME_DECK=1,2,3,4,5,L,R
//! GRIDSUM_MCTS_TIME_BUDGET_MS=250
//! GRIDSUM_PLAYERS_SECOND_KIND=human
//! ```
//!
//! The binary layers its own CLI flags on top.

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
