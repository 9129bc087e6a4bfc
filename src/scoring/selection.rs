//! Which dice may be selected, and which must be selected together.
//!
//! A die can be picked only as part of a scoring group. Picking one die of
//! a group picks the whole group, so a selection is always a union of
//! complete groups and always scores.

use tracing::trace;

use super::counts::FaceCounts;
use crate::core::config::{ComboKind, GameSettings};
use crate::core::error::FarkleError;
use crate::dice::{DiceSet, DieIndices};

/// The scoring group die `index` belongs to, as indices into `dice`.
///
/// Groups are checked in this order, over the unheld dice only:
///
/// 1. A 1 or a 5 is a group by itself.
/// 2. Three or more dice of the same face form a group.
/// 3. Three pairs (or a pair plus four of a kind on six dice) take all
///    unheld dice.
/// 4. A straight takes all unheld dice.
///
/// Combos that are disabled in `settings` are not considered.
pub fn scoring_group(
    dice: &DiceSet,
    index: usize,
    settings: &GameSettings,
) -> Result<DieIndices, FarkleError> {
    let die = dice.get(index)?;
    if die.is_held() {
        return Err(FarkleError::DieHeld(index));
    }
    if !die.value().is_rolled() {
        return Err(FarkleError::DieNotRolled(index));
    }

    let face = die.value().face();
    if face == 1 || face == 5 {
        return Ok(DieIndices::from_slice(&[index]));
    }

    let unheld = dice.unheld_indices();
    let counts = FaceCounts::from_values(&dice.unheld_values());

    if counts.get(face) >= 3 {
        let group: DieIndices = unheld
            .into_iter()
            .filter(|&i| dice.dice()[i].value().face() == face)
            .collect();
        trace!(index, ?group, "Of-a-kind group");
        return Ok(group);
    }

    if counts.is_three_pairs() && settings.combo_enabled(ComboKind::ThreePairs) {
        return Ok(unheld);
    }

    if counts.is_straight() && settings.combo_enabled(ComboKind::Straight) {
        return Ok(unheld);
    }

    Err(FarkleError::NotScoring(index))
}

/// Whether die `index` can be selected.
#[must_use]
pub fn can_select_die(dice: &DiceSet, index: usize, settings: &GameSettings) -> bool {
    scoring_group(dice, index, settings).is_ok()
}

/// Every distinct scoring group among the unheld dice.
///
/// Groups are listed in order of their lowest die index. Used to enumerate
/// selection moves.
#[must_use]
pub fn scoring_groups(dice: &DiceSet, settings: &GameSettings) -> Vec<DieIndices> {
    let mut groups: Vec<DieIndices> = Vec::new();
    for index in dice.unheld_indices() {
        if groups.iter().any(|g| g.contains(&index)) {
            continue;
        }
        if let Ok(group) = scoring_group(dice, index, settings) {
            groups.push(group);
        }
    }
    groups
}
