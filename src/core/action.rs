//! Player actions and the history record kept for each one.
//!
//! Actions are the inputs of the turn-flow state machine. Each maps to one
//! control a player has at the table: roll, pick a die, bank, bottom feed,
//! pass the dice, start a new game.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Start a new game (before the first game or after game over).
    NewGame,

    /// Roll the free dice, scoring any selection first.
    Roll,

    /// Select or deselect the scoring group containing die `index`.
    ToggleDie(usize),

    /// Hold the selected dice, bank the turn score, end the turn.
    Bank,

    /// Take over the previous player's banked points and held dice.
    BottomFeed,

    /// Hand the dice to the next player.
    NextPlayer,
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
