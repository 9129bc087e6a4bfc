//! Face histogram shared by scoring and selection.

use crate::dice::DieValue;

/// How many dice show each face. Unrolled dice are not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCounts {
    counts: [u8; DieValue::FACES as usize + 1],
}

impl FaceCounts {
    /// Count the faces in `values`. Faces outside 1-6 are ignored.
    #[must_use]
    pub fn from_values(values: &[DieValue]) -> Self {
        let mut counts = Self::default();
        for value in values.iter().filter(|v| v.is_rolled()) {
            if let Some(count) = counts.counts.get_mut(value.face() as usize) {
                *count = count.saturating_add(1);
            }
        }
        counts
    }

    /// Dice showing `face`.
    #[must_use]
    pub fn get(&self, face: u8) -> u8 {
        self.counts.get(face as usize).copied().unwrap_or(0)
    }

    /// Remove every die showing `face`.
    pub fn clear(&mut self, face: u8) {
        if let Some(count) = self.counts.get_mut(face as usize) {
            *count = 0;
        }
    }

    /// Total dice counted.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.counts.iter().sum()
    }

    /// Number of distinct faces showing.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.faces().count()
    }

    /// `(face, count)` for every face showing, lowest face first.
    pub fn faces(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (1..=DieValue::FACES)
            .map(|face| (face, self.counts[face as usize]))
            .filter(|&(_, count)| count > 0)
    }

    /// Highest face showing exactly `count` times.
    #[must_use]
    pub fn highest_with(&self, count: u8) -> Option<u8> {
        self.faces()
            .filter(|&(_, c)| c == count)
            .map(|(face, _)| face)
            .last()
    }

    /// Every face showing has a count in `allowed`.
    #[must_use]
    pub fn all_counts_in(&self, allowed: &[u8]) -> bool {
        self.faces().all(|(_, c)| allowed.contains(&c))
    }

    /// Exactly one of each face 1-6.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        (1..=DieValue::FACES).all(|face| self.counts[face as usize] == 1)
    }

    /// Three pairs: three faces twice each, or (on six dice) a pair plus
    /// four of a kind.
    #[must_use]
    pub fn is_three_pairs(&self) -> bool {
        let distinct = self.distinct();
        (distinct == 3 && self.all_counts_in(&[2]))
            || (distinct == 2 && self.total() == 6 && self.all_counts_in(&[2, 4]))
    }

    /// Two faces three times each.
    #[must_use]
    pub fn is_two_triplets(&self) -> bool {
        self.distinct() == 2 && self.all_counts_in(&[3])
    }
}
