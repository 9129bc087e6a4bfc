//! A single six-sided die.

use serde::{Deserialize, Serialize};

use crate::core::error::FarkleError;
use crate::core::rng::GameRng;

/// Face value of a die.
///
/// `0` means the die has not been rolled since it was last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DieValue(u8);

impl DieValue {
    /// Number of faces on a die.
    pub const FACES: u8 = 6;

    /// Value of a die that has not been rolled.
    pub const UNROLLED: Self = Self(0);

    /// Create a die value. `face` must be in `0..=6`.
    #[must_use]
    pub const fn new(face: u8) -> Self {
        debug_assert!(face <= Self::FACES);
        Self(face)
    }

    /// Get the raw face (0 when unrolled).
    #[must_use]
    pub const fn face(self) -> u8 {
        self.0
    }

    /// Whether the die shows a face.
    #[must_use]
    pub const fn is_rolled(self) -> bool {
        self.0 != 0
    }
}

impl TryFrom<u8> for DieValue {
    type Error = FarkleError;

    fn try_from(face: u8) -> Result<Self, Self::Error> {
        if (1..=Self::FACES).contains(&face) {
            Ok(Self(face))
        } else {
            Err(FarkleError::InvalidFace(face))
        }
    }
}

impl std::fmt::Display for DieValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_rolled() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "-")
        }
    }
}

/// One die on the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    value: DieValue,
    selected: bool,
    held: bool,
}

impl Die {
    /// Create an unrolled die.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: DieValue::UNROLLED,
            selected: false,
            held: false,
        }
    }

    /// Create a free die showing `value`.
    #[must_use]
    pub const fn showing(value: DieValue) -> Self {
        Self {
            value,
            selected: false,
            held: false,
        }
    }

    /// Current face value.
    #[must_use]
    pub fn value(&self) -> DieValue {
        self.value
    }

    /// Marked for scoring but not yet held.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Scored and set aside.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Roll the die.
    pub fn roll(&mut self, rng: &mut GameRng) {
        self.value = rng.roll_die();
    }

    /// Mark for scoring. Held dice cannot be selected.
    pub fn select(&mut self) {
        if self.held {
            return;
        }
        self.selected = true;
    }

    /// Clear the selection mark.
    pub fn deselect(&mut self) {
        self.selected = false;
    }

    /// Set the die aside. Holding clears the selection mark.
    pub fn hold(&mut self) {
        self.held = true;
        self.selected = false;
    }

    /// Back to an unrolled, free die.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
