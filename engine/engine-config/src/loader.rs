//! Finding, reading and overriding the config file.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where to look for a config file when `GRIDSUM_CONFIG` is unset, in order.
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml", "/etc/gridsum/config.toml"];

fn find_config_file() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("GRIDSUM_CONFIG") {
        let explicit = PathBuf::from(explicit);
        if explicit.is_file() {
            return Some(explicit);
        }
        warn!(
            path = %explicit.display(),
            "GRIDSUM_CONFIG points at a missing file, falling back to search paths"
        );
    }

    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_file())
}

/// Resolve the effective configuration.
///
/// `GRIDSUM_CONFIG` wins over [`CONFIG_SEARCH_PATHS`]; with no file at all
/// the embedded defaults are used. `GRIDSUM_*` variables are applied last.
pub fn load_config() -> CentralConfig {
    match find_config_file() {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            load_from_path(&path)
        }
        None => {
            debug!("No config file found, using embedded defaults");
            apply_env_overrides(CentralConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<CentralConfig, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
    toml::from_str(&text).map_err(|e| format!("parse failed: {e}"))
}

/// Load one specific file. Unreadable or invalid files fall back to defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    let base = read_config(path).unwrap_or_else(|reason| {
        warn!(path = %path.display(), %reason, "Ignoring config file");
        CentralConfig::default()
    });
    apply_env_overrides(base)
}

/// `from_env!(config, KEY => section.field)` overwrites a field when the
/// variable is set. `parsed` skips values that fail to parse; `list` splits
/// on commas.
macro_rules! from_env {
    ($config:ident, $key:literal => $section:ident . $field:ident) => {
        if let Ok(raw) = std::env::var($key) {
            $config.$section.$field = raw;
        }
    };
    ($config:ident, $key:literal => $section:ident . $field:ident, parsed) => {
        match std::env::var($key).map(|raw| raw.trim().parse()) {
            Ok(Ok(value)) => $config.$section.$field = value,
            Ok(Err(_)) => warn!(key = $key, "Ignoring unparseable override"),
            Err(_) => {}
        }
    };
    ($config:ident, $key:literal => $section:ident . $field:ident, list) => {
        if let Ok(raw) = std::env::var($key) {
            $config.$section.$field = raw
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect();
        }
    };
}

/// Apply `GRIDSUM_<SECTION>_<KEY>` overrides.
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    from_env!(config, "GRIDSUM_COMMON_LOG_LEVEL" => common.log_level);

    from_env!(config, "GRIDSUM_GAME_NUM_COLS" => game.num_cols, parsed);
    from_env!(config, "GRIDSUM_GAME_NUM_ROWS" => game.num_rows, parsed);
    from_env!(config, "GRIDSUM_GAME_MAX_SUM" => game.max_sum, parsed);
    from_env!(config, "GRIDSUM_GAME_DECK" => game.deck, list);

    from_env!(config, "GRIDSUM_MCTS_TIME_BUDGET_MS" => mcts.time_budget_ms, parsed);
    from_env!(config, "GRIDSUM_MCTS_MAX_ITERATIONS" => mcts.max_iterations, parsed);
    from_env!(config, "GRIDSUM_MCTS_EXPLORATION" => mcts.exploration, parsed);
    from_env!(config, "GRIDSUM_MCTS_MAX_ROLLOUT_MOVES" => mcts.max_rollout_moves, parsed);

    from_env!(config, "GRIDSUM_PLAYERS_FIRST_NAME" => players.first_name);
    from_env!(config, "GRIDSUM_PLAYERS_FIRST_KIND" => players.first_kind);
    from_env!(config, "GRIDSUM_PLAYERS_FIRST_AI" => players.first_ai);
    from_env!(config, "GRIDSUM_PLAYERS_SECOND_NAME" => players.second_name);
    from_env!(config, "GRIDSUM_PLAYERS_SECOND_KIND" => players.second_kind);
    from_env!(config, "GRIDSUM_PLAYERS_SECOND_AI" => players.second_ai);

    from_env!(config, "GRIDSUM_ACTOR_GAMES" => actor.games, parsed);
    from_env!(config, "GRIDSUM_ACTOR_SEED" => actor.seed, parsed);
    from_env!(config, "GRIDSUM_ACTOR_LOG_INTERVAL" => actor.log_interval, parsed);

    config
}
