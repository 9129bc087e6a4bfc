//! Farkle turn rules.
//!
//! - `turn`: Turn-flow states, score sheets, and turn events
//! - `engine`: `RulesEngine` trait and the `FarkleRules` state machine
//!
//! Front ends and strategies drive a game only through `RulesEngine`.

pub mod engine;
pub mod turn;

pub use engine::{FarkleRules, GameResult, RulesEngine};
pub use turn::{PlayerScore, TurnEvent, TurnFlowState};
