//! # farkle-engine
//!
//! Farkle dice scoring, selection rules, and the turn-flow state machine.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every roll comes from a seeded ChaCha8 stream, so a
//!    game replays exactly from its seed or from a snapshot.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Configuration Over Convention**: Targets, break-in, multipliers,
//!    and fixed-point combos all come from `GameSettings`.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, RNG, configuration, errors
//! - `dice`: Die values and the six-dice set
//! - `scoring`: Score calculation and selection groups
//! - `rules`: `RulesEngine` trait and the Farkle turn-flow state machine
//! - `profile`: Player profiles and game results
//! - `strategy`: Automated players and a game driver
//!
//! ## Example
//!
//! ```
//! use farkle_engine::{Action, FarkleRules, RulesEngine, TurnFlowState};
//!
//! let rules = FarkleRules::default();
//! let mut state = rules.new_state(42);
//!
//! rules.apply_action(&mut state, Action::NewGame).unwrap();
//! rules.apply_action(&mut state, Action::Roll).unwrap();
//!
//! assert!(matches!(
//!     state.flow(),
//!     TurnFlowState::SelectDice | TurnFlowState::EndTurn
//! ));
//! ```

pub mod core;
pub mod dice;
pub mod profile;
pub mod rules;
pub mod scoring;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord,
    ComboKind, ComboRule, GameSettings,
    ConfigError, FarkleError, SnapshotError,
    PlayerId, PlayerMap,
    GameRng, GameRngState,
    GameSnapshot, GameState, PublicState,
};

pub use crate::dice::{DiceSet, Die, DieValue, DICE_COUNT};

pub use crate::scoring::{calculate_score, is_farkle, score_breakdown, ScoreBreakdown};

pub use crate::rules::{FarkleRules, GameResult, PlayerScore, RulesEngine, TurnEvent, TurnFlowState};

pub use crate::profile::{record_game_results, GameResultEntry, PlayerProfile, ProfileRegistry};

pub use crate::strategy::{play_game, RandomStrategy, Strategy, ThresholdStrategy};
