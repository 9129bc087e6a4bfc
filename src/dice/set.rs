//! The six dice a turn is played with.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::die::{Die, DieValue};
use crate::core::error::FarkleError;
use crate::core::rng::GameRng;

/// Number of dice on the table.
pub const DICE_COUNT: usize = 6;

/// Indices into a `DiceSet`. Never more than six, so kept inline.
pub type DieIndices = SmallVec<[usize; DICE_COUNT]>;

/// Six dice with their selected/held flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceSet {
    dice: [Die; DICE_COUNT],
}

impl DiceSet {
    /// Six unrolled dice.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Six free dice showing the given faces (each 1-6).
    ///
    /// ```
    /// use farkle_engine::dice::DiceSet;
    ///
    /// let dice = DiceSet::with_faces([1, 2, 3, 4, 5, 6]).unwrap();
    /// assert!(!dice.any_held());
    /// ```
    pub fn with_faces(faces: [u8; DICE_COUNT]) -> Result<Self, FarkleError> {
        let mut dice = [Die::new(); DICE_COUNT];
        for (die, face) in dice.iter_mut().zip(faces) {
            *die = Die::showing(DieValue::try_from(face)?);
        }
        Ok(Self { dice })
    }

    /// All six dice in table order.
    #[must_use]
    pub fn dice(&self) -> &[Die; DICE_COUNT] {
        &self.dice
    }

    /// Look up a die by index.
    pub fn get(&self, index: usize) -> Result<&Die, FarkleError> {
        self.dice.get(index).ok_or(FarkleError::InvalidDieIndex(index))
    }

    /// Look up a die by index for mutation.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Die, FarkleError> {
        self.dice.get_mut(index).ok_or(FarkleError::InvalidDieIndex(index))
    }

    /// Roll every unheld die.
    ///
    /// When all six are held ("hot dice"), the set is reset first so the
    /// player rolls all six again.
    pub fn roll(&mut self, rng: &mut GameRng) {
        if self.all_held() {
            self.reset_all();
        }

        for die in self.dice.iter_mut().filter(|d| !d.is_held()) {
            die.roll(rng);
        }
    }

    /// Every die is held.
    #[must_use]
    pub fn all_held(&self) -> bool {
        self.dice.iter().all(Die::is_held)
    }

    /// At least one die is held.
    #[must_use]
    pub fn any_held(&self) -> bool {
        self.dice.iter().any(Die::is_held)
    }

    /// At least one unheld die is selected.
    #[must_use]
    pub fn any_selected(&self) -> bool {
        self.dice.iter().any(|d| d.is_selected() && !d.is_held())
    }

    /// Indices of dice that are not held.
    #[must_use]
    pub fn unheld_indices(&self) -> DieIndices {
        self.indices_where(|d| !d.is_held())
    }

    /// Values of dice that are not held.
    #[must_use]
    pub fn unheld_values(&self) -> SmallVec<[DieValue; DICE_COUNT]> {
        self.values_where(|d| !d.is_held())
    }

    /// Indices of selected, unheld dice.
    #[must_use]
    pub fn selected_indices(&self) -> DieIndices {
        self.indices_where(|d| d.is_selected() && !d.is_held())
    }

    /// Values of selected, unheld dice.
    #[must_use]
    pub fn selected_values(&self) -> SmallVec<[DieValue; DICE_COUNT]> {
        self.values_where(|d| d.is_selected() && !d.is_held())
    }

    /// Hold every selected die, returning the held values.
    pub fn hold_selected(&mut self) -> SmallVec<[DieValue; DICE_COUNT]> {
        let mut held = SmallVec::new();
        for die in self.dice.iter_mut().filter(|d| d.is_selected() && !d.is_held()) {
            die.hold();
            held.push(die.value());
        }
        held
    }

    /// Reset all six dice.
    pub fn reset_all(&mut self) {
        for die in &mut self.dice {
            die.reset();
        }
    }

    /// Reset only the unheld dice, leaving held dice on the table.
    pub fn reset_unheld(&mut self) {
        for die in self.dice.iter_mut().filter(|d| !d.is_held()) {
            die.reset();
        }
    }

    /// After scoring: reset everything on hot dice, otherwise clear the
    /// free dice so they are ready to be rolled.
    pub fn clear_after_scoring(&mut self) {
        if self.all_held() {
            self.reset_all();
        } else {
            self.reset_unheld();
        }
    }

    fn indices_where(&self, pred: impl Fn(&Die) -> bool) -> DieIndices {
        self.dice
            .iter()
            .enumerate()
            .filter(|(_, d)| pred(d))
            .map(|(i, _)| i)
            .collect()
    }

    fn values_where(&self, pred: impl Fn(&Die) -> bool) -> SmallVec<[DieValue; DICE_COUNT]> {
        self.dice.iter().filter(|d| pred(d)).map(Die::value).collect()
    }
}

impl std::fmt::Display for DiceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, die) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if die.is_held() {
                write!(f, "[{}]", die.value())?;
            } else if die.is_selected() {
                write!(f, "<{}>", die.value())?;
            } else {
                write!(f, " {} ", die.value())?;
            }
        }
        Ok(())
    }
}
