//! Turn-flow states, per-player score sheet, and the events a turn emits.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::core::player::PlayerId;
use crate::dice::DieValue;

/// Where the game is within a turn.
///
/// `InitGame`, `RollDice` and `Farkle` are pass-through states: they run
/// their entry logic and move on, so a game at rest is never in them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnFlowState {
    /// No game started yet.
    #[default]
    None,
    /// Resetting players and dice for a new game.
    InitGame,
    /// Waiting for the current player to roll or bottom feed.
    StartTurn,
    /// The player took over the previous player's points and held dice.
    BottomFeed,
    /// Scoring the selection and rolling the free dice.
    RollDice,
    /// Waiting for the player to pick dice, roll again, or bank.
    SelectDice,
    /// Turn finished; waiting to pass the dice.
    EndTurn,
    /// The roll scored nothing; turn points are lost.
    Farkle,
    /// Final round complete.
    GameOver,
}

impl TurnFlowState {
    /// States a game can rest in between actions.
    #[must_use]
    pub fn is_resting(self) -> bool {
        !matches!(
            self,
            TurnFlowState::InitGame | TurnFlowState::RollDice | TurnFlowState::Farkle
        )
    }
}

/// One player's score sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Banked points.
    pub score: u32,
    /// Points scored this turn, not yet banked.
    pub turn_score: u32,
    /// Points in the current (unheld) selection.
    pub selected_score: u32,
    /// Turns started.
    pub turns: u32,
    /// Turns lost to a farkle.
    pub farkles: u32,
}

impl PlayerScore {
    /// Points at risk right now: turn score plus the current selection.
    #[must_use]
    pub fn pending(&self) -> u32 {
        self.turn_score + self.selected_score
    }

    /// Whether the player may bank.
    ///
    /// A player is broken in once their banked score reaches the threshold,
    /// or while the points pending this turn do.
    #[must_use]
    pub fn is_broken_in(&self, break_in_score: u32) -> bool {
        self.score >= break_in_score || self.pending() >= break_in_score
    }

    /// Clear the turn and selection scores.
    pub fn reset_turn(&mut self) {
        self.turn_score = 0;
        self.selected_score = 0;
    }
}

/// What an accepted action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A new game began; `first` is up.
    GameStarted {
        /// First player to act.
        first: PlayerId,
    },

    /// Dice were picked for scoring.
    Selected {
        /// Dice added to the selection.
        dice: Vec<usize>,
        /// Score of the whole selection.
        selected_score: u32,
    },

    /// Dice were put back.
    Deselected {
        /// Dice removed from the selection.
        dice: Vec<usize>,
        /// Score of the remaining selection.
        selected_score: u32,
    },

    /// The free dice were rolled and at least one scores.
    Rolled {
        /// Points the previous selection (plus any bottom-feed stake) added.
        scored: u32,
        /// Turn score after scoring.
        turn_score: u32,
        /// Faces of the dice just rolled.
        roll: Vec<DieValue>,
    },

    /// The free dice were rolled and nothing scores.
    Farkled {
        /// Turn points lost.
        lost: u32,
        /// Faces of the dice just rolled.
        roll: Vec<DieValue>,
    },

    /// The player took over the previous player's points.
    BottomFed {
        /// Points at stake.
        stake: u32,
    },

    /// Turn score was banked.
    Banked {
        /// Points added to the player's total.
        points: u32,
        /// Banked total after this turn.
        total: u32,
        /// Whether this total triggered the final round.
        reached_target: bool,
    },

    /// The dice passed to the next player.
    TurnPassed {
        /// Player now up.
        next: PlayerId,
    },

    /// The game ended.
    GameOver {
        /// Highest scorer, if anyone scored.
        winner: Option<PlayerId>,
    },
}
