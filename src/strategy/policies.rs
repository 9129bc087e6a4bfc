//! Built-in strategies.

use crate::core::action::Action;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::rules::engine::RulesEngine;
use crate::rules::turn::TurnFlowState;

use super::Strategy;

/// Uniform random strategy.
///
/// Selects uniformly from legal actions. Useful for fuzzing the rules, not
/// for winning: it toggles dice back and forth and rarely banks.
#[derive(Clone, Debug, Default)]
pub struct RandomStrategy;

impl<E: RulesEngine> Strategy<E> for RandomStrategy {
    fn choose_action(&self, engine: &E, state: &GameState, rng: &mut GameRng) -> Option<Action> {
        rng.choose(&engine.legal_actions(state)).copied()
    }
}

/// Keep rolling until the turn is worth `bank_at`, then bank.
///
/// Every roll, all scoring dice are selected. A bottom feed is taken when
/// the stake is at least `bottom_feed_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdStrategy {
    /// Bank once turn score plus selection reaches this.
    pub bank_at: u32,
    /// Minimum stake worth bottom feeding.
    pub bottom_feed_at: u32,
}

impl ThresholdStrategy {
    /// Bank at `bank_at`; bottom feed any stake of at least the same.
    #[must_use]
    pub fn new(bank_at: u32) -> Self {
        Self {
            bank_at,
            bottom_feed_at: bank_at,
        }
    }

    /// Set the bottom-feed threshold.
    #[must_use]
    pub fn with_bottom_feed_at(mut self, stake: u32) -> Self {
        self.bottom_feed_at = stake;
        self
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::new(350)
    }
}

impl<E: RulesEngine> Strategy<E> for ThresholdStrategy {
    fn choose_action(&self, engine: &E, state: &GameState, _rng: &mut GameRng) -> Option<Action> {
        let actions = engine.legal_actions(state);
        let public = &state.public;

        let chosen = match public.flow {
            TurnFlowState::StartTurn => {
                if actions.contains(&Action::BottomFeed)
                    && public.bottom_feed_score >= self.bottom_feed_at
                {
                    Some(Action::BottomFeed)
                } else {
                    Some(Action::Roll)
                }
            }
            TurnFlowState::SelectDice => {
                let unselected = actions.iter().copied().find(|action| match action {
                    Action::ToggleDie(i) => !public.dice.dice()[*i].is_selected(),
                    _ => false,
                });
                match unselected {
                    Some(toggle) => Some(toggle),
                    None if public.current_score().pending() >= self.bank_at
                        && actions.contains(&Action::Bank) =>
                    {
                        Some(Action::Bank)
                    }
                    None => Some(Action::Roll),
                }
            }
            _ => None,
        };

        chosen
            .filter(|action| actions.contains(action))
            .or_else(|| actions.first().copied())
    }
}
