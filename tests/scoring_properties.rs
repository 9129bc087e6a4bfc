//! Property tests for scoring and selection.

use farkle_engine::core::{ComboKind, GameSettings};
use farkle_engine::dice::{DiceSet, DieValue};
use farkle_engine::scoring::{
    calculate_score, can_select_die, is_farkle, score_breakdown, scoring_group, scoring_groups,
};
use proptest::prelude::*;

fn faces(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=6, 1..=max_len)
}

fn values(faces: &[u8]) -> Vec<DieValue> {
    faces.iter().map(|&f| DieValue::new(f)).collect()
}

fn six_faces() -> impl Strategy<Value = [u8; 6]> {
    prop::array::uniform6(1u8..=6)
}

// =============================================================================
// Scoring
// =============================================================================

proptest! {
    #[test]
    fn score_is_multiple_of_fifty(roll in faces(6)) {
        let score = calculate_score(&values(&roll), &GameSettings::default());
        prop_assert_eq!(score % 50, 0);
    }

    #[test]
    fn farkle_means_zero(roll in faces(6)) {
        let settings = GameSettings::default();
        let values = values(&roll);
        prop_assert_eq!(is_farkle(&values, &settings), calculate_score(&values, &settings) == 0);
    }

    #[test]
    fn order_does_not_matter(roll in faces(6).prop_shuffle()) {
        let settings = GameSettings::default();
        let mut sorted = roll.clone();
        sorted.sort_unstable();
        prop_assert_eq!(
            calculate_score(&values(&roll), &settings),
            calculate_score(&values(&sorted), &settings)
        );
    }

    #[test]
    fn breakdown_matches_score(roll in faces(6)) {
        let settings = GameSettings::default();
        let values = values(&roll);
        let breakdown = score_breakdown(&values, &settings);

        prop_assert_eq!(breakdown.total(), calculate_score(&values, &settings));
        prop_assert!(usize::from(breakdown.dice_used()) <= values.len());
    }

    #[test]
    fn any_one_or_five_scores(mut roll in faces(5), special in prop::sample::select(vec![1u8, 5])) {
        roll.push(special);
        prop_assert!(calculate_score(&values(&roll), &GameSettings::default()) > 0);
    }

    #[test]
    fn multiplier_scales_of_a_kind(face in 2u8..=6, count in 3usize..=6) {
        let roll = vec![face; count];
        let base = calculate_score(&values(&roll), &GameSettings::default());
        let doubled = calculate_score(
            &values(&roll),
            &GameSettings::default().with_multiplier(200),
        );
        prop_assert_eq!(doubled, base * 2);
    }
}

// =============================================================================
// Selection
// =============================================================================

proptest! {
    #[test]
    fn every_group_scores_on_its_own(faces in six_faces()) {
        let settings = GameSettings::default();
        let dice = DiceSet::with_faces(faces).unwrap();

        for group in scoring_groups(&dice, &settings) {
            let group_values: Vec<_> = group.iter().map(|&i| dice.dice()[i].value()).collect();
            prop_assert!(calculate_score(&group_values, &settings) > 0, "group {:?}", group);
        }
    }

    #[test]
    fn selectable_iff_in_a_group(faces in six_faces()) {
        let settings = GameSettings::default();
        let dice = DiceSet::with_faces(faces).unwrap();
        let groups = scoring_groups(&dice, &settings);

        for index in 0..6 {
            let in_group = groups.iter().any(|g| g.contains(&index));
            prop_assert_eq!(can_select_die(&dice, index, &settings), in_group);
        }
    }

    #[test]
    fn group_contains_its_die(faces in six_faces(), index in 0usize..6) {
        let dice = DiceSet::with_faces(faces).unwrap();
        if let Ok(group) = scoring_group(&dice, index, &GameSettings::default()) {
            prop_assert!(group.contains(&index));
        }
    }

    #[test]
    fn farkle_has_no_groups(faces in six_faces()) {
        let settings = GameSettings::default();
        let dice = DiceSet::with_faces(faces).unwrap();
        let farkle = is_farkle(&dice.unheld_values(), &settings);

        prop_assert_eq!(farkle, scoring_groups(&dice, &settings).is_empty());
    }

    #[test]
    fn disabling_combos_never_adds_groups(faces in six_faces()) {
        let all = GameSettings::default();
        let plain = GameSettings::default()
            .without_combo(ComboKind::Straight)
            .without_combo(ComboKind::ThreePairs)
            .without_combo(ComboKind::TwoTriplets);
        let dice = DiceSet::with_faces(faces).unwrap();

        for index in 0..6 {
            if can_select_die(&dice, index, &plain) {
                prop_assert!(can_select_die(&dice, index, &all));
            }
        }
    }
}
