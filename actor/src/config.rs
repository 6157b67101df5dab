//! Configuration for the self-play actor
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use engine_ai::{AiType, PlayerConfig, PlayerKind};
use engine_config::{load_config, CentralConfig};
use engine_core::{CardValue, Rules};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

#[derive(Parser, Debug, Clone)]
#[command(name = "actor")]
#[command(about = "gridsum actor - AI vs AI self-play runner")]
#[command(
    long_about = "Plays a series of gridsum games between two AI seats and reports
the tally. Every AI decision goes through the same processAI request/response
pair a game front end would send to its background worker.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = CENTRAL_CONFIG.common.log_level.clone())]
    pub log_level: String,

    /// Number of games to play
    #[arg(long, default_value_t = CENTRAL_CONFIG.actor.games)]
    pub games: u32,

    /// Base seed; game N searches with seed + N
    #[arg(long, default_value_t = CENTRAL_CONFIG.actor.seed)]
    pub seed: u64,

    /// Log the running tally every N games (0 to disable)
    #[arg(long, default_value_t = CENTRAL_CONFIG.actor.log_interval)]
    pub log_interval: u32,

    /// Board width
    #[arg(long, default_value_t = CENTRAL_CONFIG.game.num_cols)]
    pub num_cols: usize,

    /// Board height
    #[arg(long, default_value_t = CENTRAL_CONFIG.game.num_rows)]
    pub num_rows: usize,

    /// Line sum that triggers a clear
    #[arg(long, default_value_t = CENTRAL_CONFIG.game.max_sum)]
    pub max_sum: u32,

    /// Deck dealt to each player, e.g. 1,2,3,4,5,6,7,U,D
    #[arg(long, value_delimiter = ',', default_values_t = CENTRAL_CONFIG.game.deck.clone())]
    pub deck: Vec<String>,

    /// Wall-clock budget per MCTS decision in milliseconds
    #[arg(long, default_value_t = CENTRAL_CONFIG.mcts.time_budget_ms)]
    pub time_budget_ms: u64,

    /// Iteration cap per MCTS decision (0 for time budget only)
    #[arg(long, default_value_t = CENTRAL_CONFIG.mcts.max_iterations)]
    pub max_iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = CENTRAL_CONFIG.mcts.exploration)]
    pub exploration: f64,

    /// Rollout length cap
    #[arg(long, default_value_t = CENTRAL_CONFIG.mcts.max_rollout_moves)]
    pub max_rollout_moves: u32,

    #[arg(long, default_value_t = CENTRAL_CONFIG.players.first_name.clone())]
    pub first_name: String,

    /// human or ai
    #[arg(long, default_value_t = CENTRAL_CONFIG.players.first_kind.clone())]
    pub first_kind: String,

    /// mcts or random
    #[arg(long, default_value_t = CENTRAL_CONFIG.players.first_ai.clone())]
    pub first_ai: String,

    #[arg(long, default_value_t = CENTRAL_CONFIG.players.second_name.clone())]
    pub second_name: String,

    /// human or ai
    #[arg(long, default_value_t = CENTRAL_CONFIG.players.second_kind.clone())]
    pub second_kind: String,

    /// mcts or random
    #[arg(long, default_value_t = CENTRAL_CONFIG.players.second_ai.clone())]
    pub second_ai: String,
}

fn seat(name: &str, kind: &str, ai: &str) -> Result<PlayerConfig> {
    let kind: PlayerKind = kind.parse()?;
    let ai_type: AiType = ai.parse()?;
    Ok(PlayerConfig {
        name: name.to_string(),
        kind,
        ai_type: (kind == PlayerKind::Ai).then_some(ai_type),
    })
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        for player in self.seats()? {
            if !player.is_ai() {
                return Err(anyhow!(
                    "seat '{}' is human; self-play needs both seats set to ai",
                    player.name
                ));
            }
        }

        self.rules()?;
        Ok(())
    }

    /// Board, target and decks as configured.
    pub fn rules(&self) -> Result<Rules> {
        let deck = self
            .deck
            .iter()
            .map(|tag| tag.parse::<CardValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid deck")?;
        Ok(Rules::with_decks(
            self.num_cols,
            self.num_rows,
            self.max_sum,
            &deck,
        )?)
    }

    /// Seats in configured order.
    pub fn seats(&self) -> Result<[PlayerConfig; 2]> {
        Ok([
            seat(&self.first_name, &self.first_kind, &self.first_ai)
                .context("invalid first seat")?,
            seat(&self.second_name, &self.second_kind, &self.second_ai)
                .context("invalid second seat")?,
        ])
    }

    pub fn mcts_config(&self) -> MctsConfig {
        let config = MctsConfig::default()
            .with_time_budget(self.time_budget())
            .with_exploration(self.exploration)
            .with_max_rollout_moves(self.max_rollout_moves);
        match self.max_iterations {
            0 => config,
            n => config.with_max_iterations(n),
        }
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    pub fn game_seed(&self, game_index: u32) -> u64 {
        self.seed.wrapping_add(u64::from(game_index))
    }
}
