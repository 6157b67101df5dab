//! Self-play match runner
//!
//! Plays `games` matches between the two configured AI seats. Seats swap
//! sides every other game so each strategy moves first half the time. Each
//! decision is sent through the worker request/response contract on a
//! blocking task, exactly as a front end would hand it to a background
//! worker.

use anyhow::{anyhow, bail, Result};
use engine_ai::{
    apply_ai_result, should_invoke_ai, AiResult, AiWorker, GameSnapshot, PlayerConfig, SearchSlot,
    WorkerRequest, WorkerResponse,
};
use engine_core::{is_game_over, outcome, GameOutcome, NullConsequences, Rules};
use indicatif::{ProgressBar, ProgressStyle};
use mcts::MctsConfig;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc, Mutex,
};
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

use crate::config::Config;

/// Result of one finished game, seen from the configured seats.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub game_index: u32,
    /// Whether configured seat 0 played second in this game.
    pub swapped: bool,
    pub outcome: GameOutcome,
    pub plies: u32,
    /// Mean win-probability estimate reported per configured seat; `None`
    /// when that seat never reported one.
    pub mean_estimate: [Option<f64>; 2],
}

impl GameRecord {
    /// Configured seat that won, or `None` on a draw.
    pub fn winning_seat(&self) -> Option<usize> {
        self.outcome.winner.map(|player| {
            let idx = player.index();
            if self.swapped {
                1 - idx
            } else {
                idx
            }
        })
    }
}

/// Running win/draw count per configured seat.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatchTally {
    pub wins: [u32; 2],
    pub draws: u32,
}

impl MatchTally {
    pub fn record(&mut self, game: &GameRecord) {
        match game.winning_seat() {
            Some(seat) => self.wins[seat] += 1,
            None => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.draws
    }
}

pub struct Actor {
    config: Config,
    rules: Rules,
    seats: [PlayerConfig; 2],
    mcts: MctsConfig,
    games_played: AtomicU32,
    shutdown_signal: AtomicBool,
    search_slot: SearchSlot,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        let rules = config.rules()?;
        let seats = config.seats()?;
        let mcts = config.mcts_config();

        info!(
            num_cols = rules.num_cols(),
            num_rows = rules.num_rows(),
            max_sum = rules.max_sum(),
            cards = rules.cards().len(),
            "Rules loaded"
        );
        info!(
            time_budget_ms = config.time_budget_ms,
            max_iterations = ?mcts.max_iterations,
            exploration = mcts.exploration,
            "MCTS config"
        );
        for (i, seat) in seats.iter().enumerate() {
            info!(
                seat = i,
                name = %seat.name,
                strategy = ?seat.strategy(),
                "Seat configured"
            );
        }

        Ok(Self {
            config,
            rules,
            seats,
            mcts,
            games_played: AtomicU32::new(0),
            shutdown_signal: AtomicBool::new(false),
            search_slot: SearchSlot::new(),
        })
    }

    pub async fn run(&self) -> Result<MatchTally> {
        info!(
            games = self.config.games,
            seed = self.config.seed,
            "Actor starting main loop"
        );

        // Progress bar only when stderr is a TTY
        let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(u64::from(self.config.games));
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut tally = MatchTally::default();

        for game_index in 0..self.config.games {
            if self.shutdown_requested() {
                info!("Shutdown signal received, stopping actor");
                break;
            }

            let game_start = Instant::now();
            match self.play_game(game_index).await {
                Ok(Some(record)) => {
                    tally.record(&record);
                    let played = self.games_played.fetch_add(1, Ordering::Relaxed) + 1;
                    debug!(
                        game = record.game_index,
                        plies = record.plies,
                        scores = ?record.outcome.scores,
                        winner = ?record.winning_seat().map(|s| &self.seats[s].name),
                        estimates = ?record.mean_estimate,
                        duration = game_start.elapsed().as_secs_f64(),
                        "Game completed"
                    );

                    if let Some(ref pb) = progress {
                        pb.inc(1);
                    }

                    if self.config.log_interval > 0 && played % self.config.log_interval == 0 {
                        let line = self.tally_line(&tally);
                        match progress {
                            Some(ref pb) => pb.suspend(|| info!("{}", line)),
                            None => info!("{}", line),
                        }
                    }
                }
                Ok(None) => {
                    info!(game = game_index, "Game abandoned on shutdown");
                    break;
                }
                Err(e) => {
                    error!("Game {} failed: {:#}", game_index, e);
                    // Continue with next game rather than stopping
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        info!("{}", self.tally_line(&tally));
        Ok(tally)
    }

    pub fn shutdown(&self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
        info!("Shutdown signal set");
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown_signal.load(Ordering::Relaxed)
    }

    /// Seats as they sit at the table for this game.
    fn seats_for(&self, game_index: u32) -> ([PlayerConfig; 2], bool) {
        let swapped = game_index % 2 == 1;
        let [a, b] = self.seats.clone();
        if swapped {
            ([b, a], true)
        } else {
            ([a, b], false)
        }
    }

    fn tally_line(&self, tally: &MatchTally) -> String {
        format!(
            "After {} games: {} {} - {} {} ({} draws)",
            tally.games(),
            self.seats[0].name,
            tally.wins[0],
            tally.wins[1],
            self.seats[1].name,
            tally.draws
        )
    }

    /// Guard against a custom deck that keeps the game alive forever.
    fn max_plies(&self) -> u32 {
        let cards = u32::try_from(self.rules.cards().len()).unwrap_or(u32::MAX);
        cards.saturating_mul(50).max(1000)
    }

    /// Play one game to completion. `Ok(None)` if shutdown interrupted it.
    async fn play_game(&self, game_index: u32) -> Result<Option<GameRecord>> {
        let (seats, swapped) = self.seats_for(game_index);
        let worker = Arc::new(Mutex::new(AiWorker::with_seed(
            self.mcts.clone(),
            self.config.game_seed(game_index),
        )));

        let mut state = self.rules.initial_state();
        let mut plies = 0u32;
        let mut estimates: [Vec<f64>; 2] = [Vec::new(), Vec::new()];
        let max_plies = self.max_plies();

        while !is_game_over(&self.rules, &state) {
            if self.shutdown_requested() {
                return Ok(None);
            }
            if plies >= max_plies {
                warn!(game = game_index, plies, "Game exceeded ply limit");
                bail!("game exceeded {} plies without ending", max_plies);
            }
            if !should_invoke_ai(&seats, &state) {
                bail!("{} is not an AI seat", state.current_player());
            }

            let request = WorkerRequest::ProcessAi {
                game_snapshot: GameSnapshot::new(&self.rules, &state, &seats),
            };
            let result = self.request_move(&worker, request).await?;

            let player = state.current_player();
            trace!(
                game = game_index,
                ply = plies,
                %player,
                mv = ?result.mv,
                win_probability = result.stats.win_probability_estimate,
                "AI moved"
            );
            if result.stats.win_probability_estimate >= 0.0 {
                let seat = if swapped { 1 - player.index() } else { player.index() };
                estimates[seat].push(result.stats.win_probability_estimate);
            }

            state = apply_ai_result(&self.rules, &state, &result, &mut NullConsequences)?;
            plies += 1;
        }

        let mean_estimate = estimates.map(|e| {
            (!e.is_empty()).then(|| e.iter().sum::<f64>() / e.len() as f64)
        });

        Ok(Some(GameRecord {
            game_index,
            swapped,
            outcome: outcome(&self.rules, &state),
            plies,
            mean_estimate,
        }))
    }

    /// Run one AI decision off the async runtime.
    async fn request_move(
        &self,
        worker: &Arc<Mutex<AiWorker>>,
        request: WorkerRequest,
    ) -> Result<AiResult> {
        let _ticket = self
            .search_slot
            .try_begin()
            .ok_or_else(|| anyhow!("an AI search is already in flight"))?;

        let worker = Arc::clone(worker);
        let response = tokio::task::spawn_blocking(move || {
            let mut worker = worker
                .lock()
                .map_err(|e| anyhow!("AI worker lock poisoned: {}", e))?;
            Ok::<_, anyhow::Error>(worker.handle(&request)?)
        })
        .await??;

        let WorkerResponse::ProcessAi { result } = response;
        Ok(result)
    }

    /// Get number of completed games (for testing)
    #[allow(dead_code)]
    pub fn games_played(&self) -> u32 {
        self.games_played.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::base_config;
    use engine_core::Player;

    fn random_vs_random() -> Config {
        let mut config = base_config();
        config.first_ai = "random".into();
        config.second_ai = "random".into();
        config
    }

    #[tokio::test]
    async fn test_play_single_game() {
        let actor = Actor::new(random_vs_random()).unwrap();

        let record = actor.play_game(0).await.unwrap().unwrap();
        assert!(record.plies > 0);
        assert!(!record.swapped);
        assert_eq!(record.mean_estimate, [None, None]);
        assert_eq!(record.game_index, 0);

        let record = actor.play_game(3).await.unwrap().unwrap();
        assert_eq!(record.game_index, 3);
        assert!(record.swapped);
    }

    #[tokio::test]
    async fn test_mcts_seat_reports_estimates() {
        let actor = Actor::new(base_config()).unwrap();

        let record = actor.play_game(0).await.unwrap().unwrap();
        let estimate = record.mean_estimate[0].unwrap();
        assert!((0.0..=1.0).contains(&estimate));
        // The random seat never estimates.
        assert_eq!(record.mean_estimate[1], None);
    }

    #[tokio::test]
    async fn test_run_tallies_every_game() {
        let mut config = random_vs_random();
        config.games = 4;
        let actor = Actor::new(config).unwrap();

        let tally = actor.run().await.unwrap();
        assert_eq!(tally.games(), 4);
        assert_eq!(actor.games_played(), 4);
    }

    #[tokio::test]
    async fn test_shutdown_stops_before_first_game() {
        let actor = Actor::new(random_vs_random()).unwrap();
        actor.shutdown();

        let tally = actor.run().await.unwrap();
        assert_eq!(tally, MatchTally::default());
    }

    #[test]
    fn test_swapped_seats_map_winner_back() {
        let record = GameRecord {
            game_index: 1,
            swapped: true,
            outcome: GameOutcome {
                scores: [3, 9],
                winner: Some(Player::SECOND),
            },
            plies: 12,
            mean_estimate: [None, None],
        };
        assert_eq!(record.winning_seat(), Some(0));

        let mut tally = MatchTally::default();
        tally.record(&record);
        assert_eq!(tally.wins, [1, 0]);
    }

    #[test]
    fn test_seats_alternate() {
        let actor = Actor::new(base_config()).unwrap();
        let (even, swapped) = actor.seats_for(0);
        assert!(!swapped);
        assert_eq!(even[0].name, "red");

        let (odd, swapped) = actor.seats_for(1);
        assert!(swapped);
        assert_eq!(odd[0].name, "blue");
    }
}
