//! Score calculation.
//!
//! Scoring strips one combination at a time, checking the table from the
//! most valuable pattern down, and recurses on the dice left over:
//!
//! | Pattern            | Points                          | Continues |
//! |--------------------|---------------------------------|-----------|
//! | Six of a kind      | per-die value x 4               | no        |
//! | Five of a kind     | per-die value x 3               | yes       |
//! | Two triplets       | combo points                    | no        |
//! | Three pairs        | combo points                    | no        |
//! | Straight           | combo points                    | no        |
//! | Four of a kind     | per-die value x 2               | yes       |
//! | Three of a kind    | per-die value                   | yes       |
//! | Single 1s and 5s   | count x single points           | yes       |
//!
//! Per-die value is `face x multiplier`, with a 1 counted as face 10.
//! Points saturate at `u32::MAX` rather than wrapping.
//! Disabled combos are skipped. When two groups of the same size are
//! present, the higher face is taken first.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{instrument, trace};

use super::counts::FaceCounts;
use crate::core::config::{ComboKind, GameSettings};
use crate::dice::DieValue;

/// One scoring pattern found in a set of dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringPattern {
    /// Three to six dice of the same face.
    OfAKind {
        /// Face value.
        face: DieValue,
        /// Number of dice (3-6).
        count: u8,
    },
    /// A fixed-point six-dice combo.
    Combo(ComboKind),
    /// Loose 1s or 5s.
    Singles {
        /// Face value (1 or 5).
        face: DieValue,
        /// Number of dice.
        count: u8,
    },
}

/// A pattern and the points it earned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringCombo {
    /// What was matched.
    pub pattern: ScoringPattern,
    /// Points awarded.
    pub points: u32,
}

impl ScoringCombo {
    /// Number of dice consumed by this pattern.
    #[must_use]
    pub fn dice_used(&self) -> u8 {
        match self.pattern {
            ScoringPattern::OfAKind { count, .. } | ScoringPattern::Singles { count, .. } => count,
            ScoringPattern::Combo(_) => 6,
        }
    }
}

impl std::fmt::Display for ScoringCombo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pattern {
            ScoringPattern::OfAKind { face, count } => {
                write!(f, "{} x {}s ({})", count, face, self.points)
            }
            ScoringPattern::Combo(kind) => write!(f, "{} ({})", kind.display_name(), self.points),
            ScoringPattern::Singles { face, count } => {
                write!(f, "{} single {}s ({})", count, face, self.points)
            }
        }
    }
}

/// Every pattern a set of dice decomposed into, in the order found.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Matched patterns.
    pub combos: SmallVec<[ScoringCombo; 4]>,
}

impl ScoreBreakdown {
    /// Sum of all pattern points.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.combos.iter().fold(0, |total, c| total.saturating_add(c.points))
    }

    /// Dice that contributed points.
    #[must_use]
    pub fn dice_used(&self) -> u8 {
        self.combos.iter().map(ScoringCombo::dice_used).sum()
    }

    /// Nothing scored.
    #[must_use]
    pub fn is_farkle(&self) -> bool {
        self.total() == 0
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.combos.is_empty() {
            return write!(f, "Farkle (0)");
        }
        for (i, combo) in self.combos.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", combo)?;
        }
        write!(f, " = {}", self.total())
    }
}

/// Score a set of at most six dice.
///
/// ```
/// use farkle_engine::core::GameSettings;
/// use farkle_engine::dice::DieValue;
/// use farkle_engine::scoring::calculate_score;
///
/// let roll: Vec<_> = [1, 1, 1, 5, 2, 3].into_iter().map(DieValue::new).collect();
/// assert_eq!(calculate_score(&roll, &GameSettings::default()), 1050);
/// ```
#[must_use]
pub fn calculate_score(values: &[DieValue], settings: &GameSettings) -> u32 {
    score_breakdown(values, settings).total()
}

/// Whether a roll has no scoring dice at all.
#[must_use]
pub fn is_farkle(values: &[DieValue], settings: &GameSettings) -> bool {
    calculate_score(values, settings) == 0
}

/// Decompose a set of at most six dice into scoring patterns.
#[instrument(level = "trace", skip(settings))]
pub fn score_breakdown(values: &[DieValue], settings: &GameSettings) -> ScoreBreakdown {
    let mut counts = FaceCounts::from_values(values);
    let mut breakdown = ScoreBreakdown::default();
    decompose(&mut counts, settings, &mut breakdown);
    trace!(total = breakdown.total(), "Scored");
    breakdown
}

/// Per-die value for of-a-kind scoring.
fn per_die_value(face: u8, settings: &GameSettings) -> u32 {
    let face_value = if face == 1 { 10 } else { u32::from(face) };
    face_value.saturating_mul(settings.points_multiplier_of_a_kind)
}

fn push_of_a_kind(face: u8, count: u8, factor: u32, settings: &GameSettings, out: &mut ScoreBreakdown) {
    out.combos.push(ScoringCombo {
        pattern: ScoringPattern::OfAKind {
            face: DieValue::new(face),
            count,
        },
        points: per_die_value(face, settings).saturating_mul(factor),
    });
}

fn push_combo(kind: ComboKind, points: u32, out: &mut ScoreBreakdown) {
    out.combos.push(ScoringCombo {
        pattern: ScoringPattern::Combo(kind),
        points,
    });
}

fn decompose(counts: &mut FaceCounts, settings: &GameSettings, out: &mut ScoreBreakdown) {
    if counts.total() == 0 {
        return;
    }

    if let Some(face) = counts.highest_with(6) {
        push_of_a_kind(face, 6, 4, settings, out);
        return;
    }

    if let Some(face) = counts.highest_with(5) {
        push_of_a_kind(face, 5, 3, settings, out);
        counts.clear(face);
        return decompose(counts, settings, out);
    }

    if counts.is_two_triplets() {
        if let Some(points) = settings.combo_points(ComboKind::TwoTriplets) {
            push_combo(ComboKind::TwoTriplets, points, out);
            return;
        }
    }

    if counts.is_three_pairs() {
        if let Some(points) = settings.combo_points(ComboKind::ThreePairs) {
            push_combo(ComboKind::ThreePairs, points, out);
            return;
        }
    }

    if counts.is_straight() {
        if let Some(points) = settings.combo_points(ComboKind::Straight) {
            push_combo(ComboKind::Straight, points, out);
            return;
        }
    }

    if let Some(face) = counts.highest_with(4) {
        push_of_a_kind(face, 4, 2, settings, out);
        counts.clear(face);
        return decompose(counts, settings, out);
    }

    if let Some(face) = counts.highest_with(3) {
        push_of_a_kind(face, 3, 1, settings, out);
        counts.clear(face);
        return decompose(counts, settings, out);
    }

    let ones = counts.get(1);
    let fives = counts.get(5);
    if ones > 0 || fives > 0 {
        if ones > 0 {
            out.combos.push(ScoringCombo {
                pattern: ScoringPattern::Singles {
                    face: DieValue::new(1),
                    count: ones,
                },
                points: u32::from(ones).saturating_mul(settings.points_per_one),
            });
        }
        if fives > 0 {
            out.combos.push(ScoringCombo {
                pattern: ScoringPattern::Singles {
                    face: DieValue::new(5),
                    count: fives,
                },
                points: u32::from(fives).saturating_mul(settings.points_per_five),
            });
        }
        counts.clear(1);
        counts.clear(5);
        decompose(counts, settings, out);
    }
}
