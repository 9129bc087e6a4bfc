//! Core engine types: players, state, actions, RNG, configuration, errors.
//!
//! These are the building blocks the dice, scoring, and rules modules share.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{ComboKind, ComboRule, GameSettings, MAX_PLAYERS, MAX_POINTS, MIN_PLAYERS};
pub use error::{ConfigError, FarkleError, SnapshotError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameSnapshot, GameState, PublicState};
