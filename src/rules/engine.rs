//! The Farkle turn-flow state machine.
//!
//! `RulesEngine` is the seam strategies and front ends drive:
//! - What actions are legal
//! - How actions modify state
//! - When the game is over
//!
//! `FarkleRules` implements it. Every action is validated before anything
//! is mutated, so a rejected action leaves the state exactly as it was.

use tracing::{debug, info, instrument, warn};

use crate::core::action::{Action, ActionRecord};
use crate::core::config::GameSettings;
use crate::core::error::{ConfigError, FarkleError};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, PublicState};
use crate::dice::DICE_COUNT;
use crate::rules::turn::{TurnEvent, TurnFlowState};
use crate::scoring::{calculate_score, can_select_die, is_farkle, scoring_group};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Nobody banked any points.
    NoWinner,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::NoWinner => false,
        }
    }

    /// The winner, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::NoWinner => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Return empty vec only in pass-through states
/// - `apply_action`: Must be deterministic given the state's RNG
/// - `is_terminal`: Return None if game continues
pub trait RulesEngine {
    /// Get the game settings.
    fn settings(&self) -> &GameSettings;

    /// Every action the current player may take.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply an action for the current player.
    ///
    /// On error the state is unchanged.
    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<TurnEvent, FarkleError>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `action` would be accepted right now.
    fn is_legal(&self, state: &GameState, action: Action) -> bool {
        self.legal_actions(state).contains(&action)
    }
}

/// Standard Farkle rules over a set of [`GameSettings`].
#[derive(Clone, Debug, Default)]
pub struct FarkleRules {
    settings: GameSettings,
}

impl FarkleRules {
    /// Create rules from validated settings.
    pub fn new(settings: GameSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// A fresh state sized for these settings. Apply `NewGame` to start.
    #[must_use]
    pub fn new_state(&self, seed: u64) -> GameState {
        GameState::new(self.settings.player_count, seed)
    }

    // === Actions ===

    fn new_game(&self, state: &mut GameState) -> TurnEvent {
        let public = &mut state.public;
        public.enter(TurnFlowState::InitGame);
        public.reset_for_new_game(self.settings.player_count);
        info!(players = self.settings.player_count, target = self.settings.target_score, "New game");
        self.enter_start_turn(public);
        TurnEvent::GameStarted {
            first: public.current_player,
        }
    }

    fn start_roll(&self, state: &mut GameState) -> TurnEvent {
        state.public.dice.reset_all();
        state.public.bottom_feed_score = 0;
        self.roll(state)
    }

    fn bottom_feed(&self, state: &mut GameState) -> Result<TurnEvent, FarkleError> {
        let public = &mut state.public;
        if !public.first_roll {
            return Err(FarkleError::CannotRoll);
        }
        let stake = public.bottom_feed_score;
        if stake == 0 {
            return Err(FarkleError::NothingAtStake);
        }
        let sheet = public.current_score();
        if !sheet.is_broken_in(self.settings.break_in_score) {
            return Err(FarkleError::NotBrokenIn {
                needed: self.settings.break_in_score,
                have: sheet.score,
            });
        }

        public.enter(TurnFlowState::BottomFeed);
        info!(player = %public.current_player, stake, "Bottom feeding");
        Ok(TurnEvent::BottomFed { stake })
    }

    /// Gate for every way into `RollDice`. A turn-opening roll needs a
    /// fresh turn (and, when bottom feeding, a stake); a re-roll needs a
    /// selection.
    fn check_can_roll(&self, public: &PublicState) -> Result<(), FarkleError> {
        match public.flow {
            TurnFlowState::StartTurn if public.first_roll => Ok(()),
            TurnFlowState::BottomFeed if public.first_roll && public.bottom_feed_score > 0 => Ok(()),
            TurnFlowState::StartTurn | TurnFlowState::BottomFeed => Err(FarkleError::CannotRoll),
            TurnFlowState::SelectDice if public.dice.any_selected() => Ok(()),
            TurnFlowState::SelectDice => Err(FarkleError::NothingSelected),
            flow => Err(FarkleError::IllegalAction {
                action: Action::Roll,
                state: flow,
            }),
        }
    }

    /// Score the selection and roll the free dice. Preconditions are
    /// checked by the caller.
    fn roll(&self, state: &mut GameState) -> TurnEvent {
        state.public.enter(TurnFlowState::RollDice);
        let scored = self.score_selection(&mut state.public);
        state.public.dice.clear_after_scoring();
        state.roll_dice();

        let public = &mut state.public;
        public.first_roll = false;
        let roll: Vec<_> = public.dice.unheld_values().into_vec();
        let turn_score = public.current_score().turn_score;

        if is_farkle(&roll, &self.settings) {
            self.enter_farkle(public);
            return TurnEvent::Farkled {
                lost: turn_score,
                roll,
            };
        }

        public.enter(TurnFlowState::SelectDice);
        debug!(?roll, turn_score, "Rolled");
        TurnEvent::Rolled {
            scored,
            turn_score,
            roll,
        }
    }

    fn toggle_die(&self, state: &mut GameState, index: usize) -> Result<TurnEvent, FarkleError> {
        let public = &mut state.public;
        let die = *public.dice.get(index)?;

        if die.is_selected() && !die.is_held() {
            let mut removed: Vec<usize> = match scoring_group(&public.dice, index, &self.settings) {
                Ok(group) => group.into_vec(),
                Err(_) => vec![index],
            };
            removed.retain(|&i| public.dice.dice()[i].is_selected());
            for &i in &removed {
                public.dice.get_mut(i)?.deselect();
            }
            removed.extend(self.prune_selection(public));
            removed.sort_unstable();

            let selected_score = self.update_selected_score(public);
            return Ok(TurnEvent::Deselected {
                dice: removed,
                selected_score,
            });
        }

        let group = scoring_group(&public.dice, index, &self.settings)?;
        let added: Vec<usize> = group
            .into_iter()
            .filter(|&i| !public.dice.dice()[i].is_selected())
            .collect();
        for &i in &added {
            public.dice.get_mut(i)?.select();
        }

        let selected_score = self.update_selected_score(public);
        Ok(TurnEvent::Selected {
            dice: added,
            selected_score,
        })
    }

    /// Deselect dice whose scoring group is no longer fully selected.
    ///
    /// Dropping part of a combo (say the four of a kind out of a pair plus
    /// four of a kind) can strand dice that only scored as part of it.
    fn prune_selection(&self, public: &mut PublicState) -> Vec<usize> {
        let mut pruned = Vec::new();
        loop {
            let stranded = public.dice.selected_indices().into_iter().find(|&i| {
                match scoring_group(&public.dice, i, &self.settings) {
                    Ok(group) => !group.iter().all(|&j| public.dice.dice()[j].is_selected()),
                    Err(_) => true,
                }
            });
            match stranded {
                Some(i) => {
                    if let Ok(die) = public.dice.get_mut(i) {
                        die.deselect();
                    }
                    pruned.push(i);
                }
                None => return pruned,
            }
        }
    }

    fn bank(&self, state: &mut GameState) -> Result<TurnEvent, FarkleError> {
        let public = &mut state.public;
        if !public.dice.any_selected() {
            return Err(FarkleError::NothingSelected);
        }
        let sheet = public.current_score();
        if !sheet.is_broken_in(self.settings.break_in_score) {
            return Err(FarkleError::NotBrokenIn {
                needed: self.settings.break_in_score,
                have: sheet.pending(),
            });
        }

        self.score_selection(public);
        public.dice.clear_after_scoring();

        let player = public.current_player;
        let sheet = public.current_score_mut();
        let points = sheet.turn_score;
        sheet.score = sheet.score.saturating_add(points);
        sheet.reset_turn();
        let total = sheet.score;
        public.bottom_feed_score = points;

        let reached_target = total >= self.settings.target_score;
        if reached_target {
            if !public.game_ending {
                info!(%player, total, "Target reached, final round");
            }
            public.game_ending = true;
            public.final_turn_taken[player] = true;
        }
        info!(%player, points, total, "Banked");

        self.enter_end_turn(public);
        Ok(TurnEvent::Banked {
            points,
            total,
            reached_target,
        })
    }

    fn next_player(&self, state: &mut GameState) -> TurnEvent {
        let public = &mut state.public;
        public.current_player = public.next_player();
        self.enter_start_turn(public);

        if public.flow == TurnFlowState::GameOver {
            TurnEvent::GameOver {
                winner: public.winner,
            }
        } else {
            TurnEvent::TurnPassed {
                next: public.current_player,
            }
        }
    }

    // === State Entry ===

    fn enter_start_turn(&self, public: &mut PublicState) {
        public.enter(TurnFlowState::StartTurn);
        if public.final_turn_taken[public.current_player] {
            self.enter_game_over(public);
            return;
        }
        public.advance_turn();
        debug!(player = %public.current_player, turn = public.turn_number, "Turn started");
    }

    fn enter_farkle(&self, public: &mut PublicState) {
        public.enter(TurnFlowState::Farkle);
        let sheet = public.current_score_mut();
        sheet.farkles += 1;
        sheet.reset_turn();
        public.bottom_feed_score = 0;
        public.dice.reset_all();
        info!(player = %public.current_player, "Farkle");
        self.enter_end_turn(public);
    }

    fn enter_end_turn(&self, public: &mut PublicState) {
        public.enter(TurnFlowState::EndTurn);
        if public.game_ending {
            let player = public.current_player;
            public.final_turn_taken[player] = true;
            if public.final_turn_taken[public.next_player()] {
                self.enter_game_over(public);
            }
        }
    }

    fn enter_game_over(&self, public: &mut PublicState) {
        public.enter(TurnFlowState::GameOver);
        public.winner = public.leader();
        match public.winner {
            Some(winner) => {
                info!(%winner, score = public.scores[winner].score, "Game over")
            }
            None => info!("Game over, nobody scored"),
        }
    }

    // === Scoring Helpers ===

    /// Hold and score the selection, adding it and any bottom-feed stake to
    /// the turn score.
    fn score_selection(&self, public: &mut PublicState) -> u32 {
        let held = public.dice.hold_selected();
        let scored = calculate_score(&held, &self.settings).saturating_add(public.bottom_feed_score);
        public.bottom_feed_score = 0;

        let sheet = public.current_score_mut();
        sheet.turn_score = sheet.turn_score.saturating_add(scored);
        sheet.selected_score = 0;
        scored
    }

    fn update_selected_score(&self, public: &mut PublicState) -> u32 {
        let score = calculate_score(&public.dice.selected_values(), &self.settings);
        public.current_score_mut().selected_score = score;
        score
    }
}

impl RulesEngine for FarkleRules {
    fn settings(&self) -> &GameSettings {
        &self.settings
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let public = &state.public;
        match public.flow {
            TurnFlowState::None | TurnFlowState::GameOver => vec![Action::NewGame],
            TurnFlowState::StartTurn => {
                let mut actions = Vec::new();
                if self.check_can_roll(public).is_ok() {
                    actions.push(Action::Roll);
                }
                if public.first_roll
                    && public.bottom_feed_score > 0
                    && public.current_score().is_broken_in(self.settings.break_in_score)
                {
                    actions.push(Action::BottomFeed);
                }
                actions
            }
            TurnFlowState::BottomFeed => match self.check_can_roll(public) {
                Ok(()) => vec![Action::Roll],
                Err(_) => Vec::new(),
            },
            TurnFlowState::SelectDice => {
                let dice = &public.dice;
                let mut actions: Vec<Action> = (0..DICE_COUNT)
                    .filter(|&i| {
                        let die = &dice.dice()[i];
                        (die.is_selected() && !die.is_held()) || can_select_die(dice, i, &self.settings)
                    })
                    .map(Action::ToggleDie)
                    .collect();
                if self.check_can_roll(public).is_ok() {
                    actions.push(Action::Roll);
                    if public.current_score().is_broken_in(self.settings.break_in_score) {
                        actions.push(Action::Bank);
                    }
                }
                actions
            }
            TurnFlowState::EndTurn => vec![Action::NextPlayer],
            TurnFlowState::InitGame | TurnFlowState::RollDice | TurnFlowState::Farkle => Vec::new(),
        }
    }

    #[instrument(
        level = "debug",
        skip(self, state),
        fields(player = %state.public.current_player, flow = %state.public.flow)
    )]
    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<TurnEvent, FarkleError> {
        let flow = state.public.flow;
        let actor = state.public.current_player;

        let result = match (flow, action) {
            (TurnFlowState::None | TurnFlowState::GameOver, Action::NewGame) => Ok(self.new_game(state)),
            (TurnFlowState::GameOver, _) => Err(FarkleError::GameOver),
            (TurnFlowState::StartTurn, Action::Roll) => {
                self.check_can_roll(&state.public).map(|()| self.start_roll(state))
            }
            (TurnFlowState::StartTurn, Action::BottomFeed) => self.bottom_feed(state),
            (TurnFlowState::BottomFeed | TurnFlowState::SelectDice, Action::Roll) => {
                self.check_can_roll(&state.public).map(|()| self.roll(state))
            }
            (TurnFlowState::SelectDice, Action::ToggleDie(index)) => self.toggle_die(state, index),
            (TurnFlowState::SelectDice, Action::Bank) => self.bank(state),
            (TurnFlowState::EndTurn, Action::NextPlayer) => Ok(self.next_player(state)),
            (flow, action) => Err(FarkleError::IllegalAction { action, state: flow }),
        };

        match &result {
            Ok(event) => {
                let public = &mut state.public;
                let sequence = public.next_sequence();
                public.record_action(ActionRecord::new(actor, action, public.turn_number, sequence));
                debug!(?event, "Action applied");
            }
            Err(err) => warn!(?action, %err, "Action rejected"),
        }
        result
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.public.flow != TurnFlowState::GameOver {
            return None;
        }
        Some(match state.public.winner {
            Some(winner) => GameResult::Winner(winner),
            None => GameResult::NoWinner,
        })
    }
}
