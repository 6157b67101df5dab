//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Wall-clock budget per search. Checked once per completed iteration,
    /// so the last iteration always finishes.
    pub time_budget: Duration,

    /// Optional hard cap on iterations. Whichever of this and `time_budget`
    /// runs out first ends the search.
    pub max_iterations: Option<u32>,

    /// Constant inside the UCB1 exploration term:
    /// `wins/visits + sqrt(exploration * ln(parent_visits) / visits)`.
    /// 2.0 gives classic UCB1.
    pub exploration: f64,

    /// Upper bound on random moves per rollout. The standard deck always
    /// terminates well before this; decks with duplicate values may not.
    pub max_rollout_moves: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(1000),
            max_iterations: None,
            exploration: 2.0,
            max_rollout_moves: 500,
        }
    }
}

impl MctsConfig {
    /// Fast, deterministic config for tests: a fixed iteration count and a
    /// time budget generous enough never to be the limiting factor.
    pub fn for_testing() -> Self {
        Self {
            time_budget: Duration::from_secs(60),
            max_iterations: Some(200),
            exploration: 2.0,
            max_rollout_moves: 500,
        }
    }

    /// Builder pattern: set the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: cap the number of iterations.
    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the rollout length cap.
    pub fn with_max_rollout_moves(mut self, n: u32) -> Self {
        self.max_rollout_moves = n;
        self
    }

    /// Whether a search that started `elapsed` ago and has completed
    /// `iterations` should stop.
    #[inline]
    pub fn budget_exhausted(&self, elapsed: Duration, iterations: u32) -> bool {
        self.max_iterations.is_some_and(|max| iterations >= max) || elapsed >= self.time_budget
    }
}
