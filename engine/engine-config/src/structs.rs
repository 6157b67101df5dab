//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_num_cols() -> usize {
    defaults::num_cols()
}
fn d_num_rows() -> usize {
    defaults::num_rows()
}
fn d_max_sum() -> u32 {
    defaults::max_sum()
}
fn d_deck() -> Vec<String> {
    defaults::deck().to_vec()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_max_rollout_moves() -> u32 {
    defaults::max_rollout_moves()
}
fn d_first_name() -> String {
    defaults::first_name().into()
}
fn d_first_kind() -> String {
    defaults::first_kind().into()
}
fn d_first_ai() -> String {
    defaults::first_ai().into()
}
fn d_second_name() -> String {
    defaults::second_name().into()
}
fn d_second_kind() -> String {
    defaults::second_kind().into()
}
fn d_second_ai() -> String {
    defaults::second_ai().into()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub players: PlayersConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Board geometry, clearing target and per-player deck composition.
///
/// Deck entries use the game's card notation: a positive number, or one of
/// the direction tags `L`, `R`, `U`, `D`. They are kept as strings here and
/// validated when the rules are built.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_num_cols")]
    pub num_cols: usize,
    #[serde(default = "d_num_rows")]
    pub num_rows: usize,
    #[serde(default = "d_max_sum")]
    pub max_sum: u32,
    #[serde(default = "d_deck")]
    pub deck: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_cols: defaults::num_cols(),
            num_rows: defaults::num_rows(),
            max_sum: defaults::max_sum(),
            deck: defaults::deck().to_vec(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// 0 means the search is bounded by time only
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_max_rollout_moves")]
    pub max_rollout_moves: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: defaults::time_budget_ms(),
            max_iterations: defaults::max_iterations(),
            exploration: defaults::exploration(),
            max_rollout_moves: defaults::max_rollout_moves(),
        }
    }
}

/// Seat configuration. `*_kind` is `human` or `ai`, `*_ai` is `mcts` or
/// `random` and only matters for AI seats.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayersConfig {
    #[serde(default = "d_first_name")]
    pub first_name: String,
    #[serde(default = "d_first_kind")]
    pub first_kind: String,
    #[serde(default = "d_first_ai")]
    pub first_ai: String,
    #[serde(default = "d_second_name")]
    pub second_name: String,
    #[serde(default = "d_second_kind")]
    pub second_kind: String,
    #[serde(default = "d_second_ai")]
    pub second_ai: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            first_name: defaults::first_name().into(),
            first_kind: defaults::first_kind().into(),
            first_ai: defaults::first_ai().into(),
            second_name: defaults::second_name().into(),
            second_kind: defaults::second_kind().into(),
            second_ai: defaults::second_ai().into(),
        }
    }
}

/// Actor (self-play) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_seed")]
    pub seed: u64,
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            seed: defaults::seed(),
            log_interval: defaults::log_interval(),
        }
    }
}
