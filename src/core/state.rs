//! Game state: the table everyone can see, plus the dice RNG.
//!
//! ## PublicState
//!
//! Observable information for all players:
//! - Score sheets and final-round flags
//! - The six dice and which are held or selected
//! - Turn-flow state, current player, bottom-feed stake
//! - Action history and flow trace
//!
//! ## GameState
//!
//! Public state plus the deterministic RNG. Checkpoint with
//! [`GameState::snapshot`] or [`GameState::to_bytes`].

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::ActionRecord;
use super::config::{MAX_PLAYERS, MIN_PLAYERS};
use super::error::SnapshotError;
use super::player::{PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState};
use crate::dice::{DiceSet, DieValue};
use crate::rules::turn::{PlayerScore, TurnFlowState};

/// Public game state - observable by all players.
///
/// History and trace use `im` persistent vectors so cloning a state to
/// look ahead stays cheap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    player_count: usize,

    // === Players ===
    /// Score sheet per player.
    pub scores: PlayerMap<PlayerScore>,

    /// Players who have had their turn in the final round.
    pub final_turn_taken: PlayerMap<bool>,

    // === Table ===
    /// The six dice.
    pub dice: DiceSet,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Current turn-flow state.
    pub flow: TurnFlowState,

    /// Points the last banker left on the table.
    pub bottom_feed_score: u32,

    /// No roll made yet this turn.
    pub first_roll: bool,

    /// Someone reached the target; the final round is under way.
    pub game_ending: bool,

    /// Set when the game is over and someone scored.
    pub winner: Option<PlayerId>,

    // === Progression ===
    /// Turn number across the whole game (starts at 1 once play begins).
    pub turn_number: u32,

    /// Action sequence within turn.
    pub action_sequence: u32,

    /// Accepted actions, oldest first.
    pub action_history: Vector<ActionRecord>,

    /// Every flow state entered, oldest first.
    pub flow_trace: Vector<TurnFlowState>,
}

impl PublicState {
    /// Create an empty table for `player_count` players.
    ///
    /// Nothing happens until a `NewGame` action is applied.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            scores: PlayerMap::with_default(player_count),
            final_turn_taken: PlayerMap::with_value(player_count, false),
            dice: DiceSet::new(),
            current_player: PlayerId::new(0),
            flow: TurnFlowState::None,
            bottom_feed_score: 0,
            first_roll: true,
            game_ending: false,
            winner: None,
            turn_number: 0,
            action_sequence: 0,
            action_history: Vector::new(),
            flow_trace: Vector::new(),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Score sheet of the player whose turn it is.
    #[must_use]
    pub fn current_score(&self) -> &PlayerScore {
        &self.scores[self.current_player]
    }

    /// Mutable score sheet of the player whose turn it is.
    pub fn current_score_mut(&mut self) -> &mut PlayerScore {
        let player = self.current_player;
        &mut self.scores[player]
    }

    /// The player seated after the current one.
    #[must_use]
    pub fn next_player(&self) -> PlayerId {
        self.current_player.next(self.player_count)
    }

    /// Player with the strictly highest banked score.
    ///
    /// Ties go to the earliest seat. `None` if nobody has scored.
    #[must_use]
    pub fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<(PlayerId, u32)> = None;
        for (player, sheet) in self.scores.iter() {
            let beats = match best {
                Some((_, score)) => sheet.score > score,
                None => sheet.score > 0,
            };
            if beats {
                best = Some((player, sheet.score));
            }
        }
        best.map(|(player, _)| player)
    }

    /// Move to `flow`, recording it in the trace.
    pub fn enter(&mut self, flow: TurnFlowState) {
        debug!(from = %self.flow, to = %flow, player = %self.current_player, "Flow transition");
        self.flow = flow;
        self.flow_trace.push_back(flow);
    }

    /// Clear scores, dice and round state for a fresh game of
    /// `player_count` players.
    ///
    /// History and trace are kept so a session can span several games.
    pub fn reset_for_new_game(&mut self, player_count: usize) {
        self.player_count = player_count;
        self.scores = PlayerMap::with_default(self.player_count);
        self.final_turn_taken = PlayerMap::with_value(self.player_count, false);
        self.dice.reset_all();
        self.current_player = PlayerId::new(0);
        self.bottom_feed_score = 0;
        self.first_roll = true;
        self.game_ending = false;
        self.winner = None;
        self.turn_number = 0;
        self.action_sequence = 0;
    }

    /// Start the current player's turn counters.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.action_sequence = 0;
        self.first_roll = true;
        self.current_score_mut().turns += 1;
    }

    // === Action History ===

    /// Record an action in history.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.action_history.push_back(record);
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.action_sequence;
        self.action_sequence += 1;
        seq
    }

    /// Check the table is one the rules could have produced.
    pub fn check_table(&self) -> Result<(), SnapshotError> {
        let count = self.player_count;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(SnapshotError::new(format!(
                "player count {} outside {}-{}",
                count, MIN_PLAYERS, MAX_PLAYERS
            )));
        }
        if self.scores.player_count() != count {
            return Err(SnapshotError::new("player count does not match score sheets"));
        }
        if self.final_turn_taken.player_count() != count {
            return Err(SnapshotError::new("player count does not match final-round flags"));
        }
        if !self.current_player.is_seated(count) {
            return Err(SnapshotError::new(format!("current player {} is not seated", self.current_player)));
        }
        if let Some(winner) = self.winner.filter(|w| !w.is_seated(count)) {
            return Err(SnapshotError::new(format!("winner {} is not seated", winner)));
        }
        for (index, die) in self.dice.dice().iter().enumerate() {
            if die.value().face() > DieValue::FACES {
                return Err(SnapshotError::new(format!(
                    "die {} shows face {}",
                    index,
                    die.value().face()
                )));
            }
            if die.is_held() && die.is_selected() {
                return Err(SnapshotError::new(format!("die {} is both held and selected", index)));
            }
        }
        Ok(())
    }
}

/// Full game state: public table plus the dice RNG.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Public state (observable by all).
    pub public: PublicState,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create a new game state.
    #[must_use]
    pub fn new(player_count: usize, seed: u64) -> Self {
        Self {
            public: PublicState::new(player_count),
            rng: GameRng::new(seed),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.public.player_count()
    }

    /// Current turn-flow state.
    #[must_use]
    pub fn flow(&self) -> TurnFlowState {
        self.public.flow
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.public.current_player
    }

    /// Roll every unheld die.
    pub fn roll_dice(&mut self) {
        self.public.dice.roll(&mut self.rng);
    }

    // === Checkpointing ===

    /// Capture the full state, including the RNG position.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            public: self.public.clone(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a state from a snapshot. Subsequent rolls match the ones the
    /// original would have made.
    #[must_use]
    pub fn restore(snapshot: &GameSnapshot) -> Self {
        Self {
            public: snapshot.public.clone(),
            rng: GameRng::from_state(&snapshot.rng),
        }
    }

    /// Encode a snapshot with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    /// Decode a state written by [`GameState::to_bytes`].
    ///
    /// Bytes that decode but describe an impossible table are rejected, so
    /// the rules never see a seat or face that does not exist.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        snapshot.public.check_table()?;
        Ok(Self::restore(&snapshot))
    }
}

/// Serializable checkpoint of a [`GameState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Public table.
    pub public: PublicState,
    /// RNG position.
    pub rng: GameRngState,
}
