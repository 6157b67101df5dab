//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so every component starts from the same values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    game: GameDefaults,
    mcts: MctsDefaults,
    players: PlayersDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    num_cols: usize,
    num_rows: usize,
    max_sum: u32,
    deck: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    time_budget_ms: u64,
    max_iterations: u32,
    exploration: f64,
    max_rollout_moves: u32,
}

#[derive(Debug, Deserialize)]
struct PlayersDefaults {
    first_name: String,
    first_kind: String,
    first_ai: String,
    second_name: String,
    second_kind: String,
    second_ai: String,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    games: u32,
    seed: u64,
    log_interval: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Game
pub fn num_cols() -> usize {
    DEFAULTS.game.num_cols
}
pub fn num_rows() -> usize {
    DEFAULTS.game.num_rows
}
pub fn max_sum() -> u32 {
    DEFAULTS.game.max_sum
}
pub fn deck() -> &'static [String] {
    &DEFAULTS.game.deck
}

// MCTS
pub fn time_budget_ms() -> u64 {
    DEFAULTS.mcts.time_budget_ms
}
pub fn max_iterations() -> u32 {
    DEFAULTS.mcts.max_iterations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn max_rollout_moves() -> u32 {
    DEFAULTS.mcts.max_rollout_moves
}

// Players
pub fn first_name() -> &'static str {
    &DEFAULTS.players.first_name
}
pub fn first_kind() -> &'static str {
    &DEFAULTS.players.first_kind
}
pub fn first_ai() -> &'static str {
    &DEFAULTS.players.first_ai
}
pub fn second_name() -> &'static str {
    &DEFAULTS.players.second_name
}
pub fn second_kind() -> &'static str {
    &DEFAULTS.players.second_kind
}
pub fn second_ai() -> &'static str {
    &DEFAULTS.players.second_ai
}

// Actor
pub fn games() -> u32 {
    DEFAULTS.actor.games
}
pub fn seed() -> u64 {
    DEFAULTS.actor.seed
}
pub fn log_interval() -> u32 {
    DEFAULTS.actor.log_interval
}
