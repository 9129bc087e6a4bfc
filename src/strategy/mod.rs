//! Automated players.
//!
//! A [`Strategy`] picks the next action for whoever is up. [`play_game`]
//! drives a game through a `RulesEngine` until it ends, asking each seat's
//! strategy in turn.
//!
//! - `policies`: `RandomStrategy` and `ThresholdStrategy`

pub mod policies;

pub use policies::{RandomStrategy, ThresholdStrategy};

use tracing::{debug, instrument};

use crate::core::action::Action;
use crate::core::error::FarkleError;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::rules::engine::{GameResult, RulesEngine};
use crate::rules::turn::TurnFlowState;

/// Chooses actions for a seat.
pub trait Strategy<E: RulesEngine>: Send + Sync {
    /// Choose the next action for the current player.
    ///
    /// Returns `None` if no legal actions exist.
    fn choose_action(&self, engine: &E, state: &GameState, rng: &mut GameRng) -> Option<Action>;
}

/// Play from the current state until the game ends.
///
/// Seat `i` is played by `strategies[i % strategies.len()]`, so a single
/// strategy can fill every seat. A game still in `None` is started first.
/// Strategy choices draw from a fork of the state's RNG, leaving the dice
/// stream untouched.
///
/// Returns `Ok(None)` if `max_actions` run out (or no strategies are given)
/// before the game ends.
#[instrument(level = "debug", skip(rules, state, strategies))]
pub fn play_game<E: RulesEngine>(
    rules: &E,
    state: &mut GameState,
    strategies: &[&dyn Strategy<E>],
    max_actions: u32,
) -> Result<Option<GameResult>, FarkleError> {
    if strategies.is_empty() {
        return Ok(None);
    }
    if state.flow() == TurnFlowState::None {
        rules.apply_action(state, Action::NewGame)?;
    }

    let mut rng = state.rng.fork();
    for _ in 0..max_actions {
        if let Some(result) = rules.is_terminal(state) {
            debug!(?result, turns = state.public.turn_number, "Game finished");
            return Ok(Some(result));
        }

        let seat = state.current_player().index() % strategies.len();
        let Some(action) = strategies[seat].choose_action(rules, state, &mut rng) else {
            return Ok(None);
        };
        rules.apply_action(state, action)?;
    }

    Ok(rules.is_terminal(state))
}
