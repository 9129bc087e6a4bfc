//! Dice: single dice and the six-die set a turn is played with.
//!
//! ## Key Types
//!
//! - `DieValue`: Face value, with 0 reserved for "not rolled"
//! - `Die`: Value plus selected/held flags
//! - `DiceSet`: The six dice on the table
//!
//! A die moves through three conditions during a turn: rolled and free,
//! selected (marked for scoring but still revocable), and held (scored and
//! set aside until the dice are reset).

pub mod die;
pub mod set;

pub use die::{Die, DieValue};
pub use set::{DiceSet, DieIndices, DICE_COUNT};
