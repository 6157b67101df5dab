//! Monte Carlo Tree Search (MCTS) for the gridsum card game.
//!
//! This crate searches positions produced by the `engine-core` rules engine
//! using plain UCB1 with random rollouts.
//!
//! # Overview
//!
//! Every iteration walks down from the root and grows the tree by one node:
//!
//! - while the current node has no untried moves, step to the child with the
//!   best UCB1 score
//! - otherwise pick one untried move at random and add its child
//! - play random moves from there until the side to move is stuck, then
//!   score the board
//! - add the result to every node on the path, each from the point of view
//!   of the player who moved into it
//!
//! # Usage
//!
//! ```rust,ignore
//! use engine_core::Rules;
//! use mcts::{choose_move, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let rules = Rules::standard();
//! let state = rules.initial_state();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = choose_move(&rules, &state, &MctsConfig::default(), &mut rng).unwrap();
//!
//! println!("Best move: {:?}", result.mv);
//! println!("Win probability: {:.2}", result.win_probability);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `time_budget`: Wall-clock time per search (default: 1s)
//! - `max_iterations`: Optional iteration cap (default: none)
//! - `exploration`: Constant inside the UCB1 square root (default: 2.0)
//! - `max_rollout_moves`: Rollout length cap (default: 500)
//!
//! # Evaluators
//!
//! The search asks an [`Evaluator`] to score each new leaf.
//! [`RolloutEvaluator`] plays random moves to the end of the game.

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{Evaluation, Evaluator, EvaluatorError, RolloutEvaluator};
pub use node::{MctsNode, NodeId};
pub use search::{choose_move, run_mcts, MctsSearch, SearchError, SearchResult, SearchStats};
pub use tree::{MctsTree, TreeStats};
