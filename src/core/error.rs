//! Error types.
//!
//! `FarkleError` covers every player input the rules reject. A rejected
//! action never changes the game state.
//!
//! `ConfigError` covers settings that fail to load or validate.
//!
//! `SnapshotError` covers state checkpoints that fail to encode or decode.

use derive_more::{Display, Error};

use super::action::Action;
use crate::rules::turn::TurnFlowState;

/// A rejected die operation or action.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum FarkleError {
    /// Face value outside 1-6.
    #[display("Invalid die face {}", _0)]
    InvalidFace(#[error(not(source))] u8),

    /// Die index outside the six dice.
    #[display("Invalid die index {}", _0)]
    InvalidDieIndex(#[error(not(source))] usize),

    /// The die has not been rolled since it was reset.
    #[display("Die {} has not been rolled", _0)]
    DieNotRolled(#[error(not(source))] usize),

    /// The die was already scored this turn.
    #[display("Die {} is already held", _0)]
    DieHeld(#[error(not(source))] usize),

    /// The die is not part of any scoring combination.
    #[display("Die {} does not score", _0)]
    NotScoring(#[error(not(source))] usize),

    /// The action is not accepted in the current turn state.
    #[display("{:?} is not allowed during {}", action, state)]
    IllegalAction {
        /// Rejected action.
        action: Action,
        /// Turn state when it was attempted.
        state: TurnFlowState,
    },

    /// Rolling or banking needs at least one selected die.
    #[display("No dice selected")]
    NothingSelected,

    /// A turn-opening roll or bottom feed after the turn's first roll, or
    /// a bottom-feed roll with no stake left.
    #[display("Cannot roll: the turn has already started")]
    CannotRoll,

    /// The player has not reached the break-in threshold.
    #[display("Need {} points to break in, have {}", needed, have)]
    NotBrokenIn {
        /// Break-in threshold.
        needed: u32,
        /// Points counted toward it.
        have: u32,
    },

    /// Bottom feeding requires points left over from the previous player.
    #[display("Nothing at stake to bottom feed")]
    NothingAtStake,

    /// The game has ended.
    #[display("Game is over")]
    GameOver,
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// A game state checkpoint could not be encoded or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Snapshot error: {}", message)]
pub struct SnapshotError {
    /// Error message.
    pub message: String,
}

impl SnapshotError {
    /// Creates a new snapshot error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<bincode::Error> for SnapshotError {
    fn from(err: bincode::Error) -> Self {
        Self::new(err.to_string())
    }
}
