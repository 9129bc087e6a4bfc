//! Automated play, checkpointing, and profile tests.

use farkle_engine::core::{Action, GameSettings, GameState, PlayerId, PlayerMap};
use farkle_engine::profile::{record_game_results, ProfileRegistry};
use farkle_engine::rules::{FarkleRules, RulesEngine, TurnFlowState};
use farkle_engine::strategy::{play_game, RandomStrategy, Strategy, ThresholdStrategy};

fn short_game_rules(players: usize) -> FarkleRules {
    FarkleRules::new(GameSettings::new(players).with_target_score(2000)).unwrap()
}

// =============================================================================
// Random Play
// =============================================================================

/// Random play should only ever pick legal actions and keep the score sheet
/// consistent.
#[test]
fn test_random_play_keeps_invariants() {
    let rules = short_game_rules(3);
    let strategy = RandomStrategy;

    for seed in 0..5 {
        let mut state = rules.new_state(seed);
        rules.apply_action(&mut state, Action::NewGame).unwrap();
        let mut rng = state.rng.fork();

        for _ in 0..2_000 {
            if rules.is_terminal(&state).is_some() {
                break;
            }
            assert!(state.flow().is_resting());

            let action = strategy.choose_action(&rules, &state, &mut rng).unwrap();
            rules.apply_action(&mut state, action).unwrap();

            let public = &state.public;
            for (_, sheet) in public.scores.iter() {
                assert_eq!(sheet.score % 50, 0);
            }
            let selected: u32 = farkle_engine::calculate_score(&public.dice.selected_values(), rules.settings());
            assert_eq!(public.current_score().selected_score, selected);
            assert!(public.dice.dice().iter().all(|d| !(d.is_held() && d.is_selected())));
        }
    }
}

/// Mixed strategies at one table.
#[test]
fn test_mixed_strategies() {
    let rules = short_game_rules(2);
    let cautious = ThresholdStrategy::new(300);
    let greedy = ThresholdStrategy::new(1000).with_bottom_feed_at(200);
    let strategies: [&dyn Strategy<FarkleRules>; 2] = [&cautious, &greedy];

    let mut state = rules.new_state(17);
    let result = play_game(&rules, &mut state, &strategies, 100_000).unwrap();

    assert!(result.is_some());
    assert_eq!(state.flow(), TurnFlowState::GameOver);
}

// =============================================================================
// Checkpointing
// =============================================================================

/// A restored checkpoint plays out exactly like the original.
#[test]
fn test_snapshot_resume_is_identical() {
    let rules = short_game_rules(2);
    let strategy = ThresholdStrategy::new(400);

    let mut original = rules.new_state(5);
    play_game(&rules, &mut original, &[&strategy], 15).unwrap();
    assert_ne!(original.flow(), TurnFlowState::GameOver);

    let bytes = original.to_bytes().unwrap();
    let mut restored = GameState::from_bytes(&bytes).unwrap();
    assert_eq!(restored.public, original.public);

    play_game(&rules, &mut original, &[&strategy], 100_000).unwrap();
    play_game(&rules, &mut restored, &[&strategy], 100_000).unwrap();

    assert_eq!(restored.public, original.public);
    assert_eq!(restored.flow(), TurnFlowState::GameOver);
}

/// In-memory snapshots behave like the byte form.
#[test]
fn test_snapshot_restore() {
    let rules = short_game_rules(2);
    let mut state = rules.new_state(9);
    rules.apply_action(&mut state, Action::NewGame).unwrap();

    let snapshot = state.snapshot();
    rules.apply_action(&mut state, Action::Roll).unwrap();

    let mut rewound = GameState::restore(&snapshot);
    assert_eq!(rewound.flow(), TurnFlowState::StartTurn);
    rules.apply_action(&mut rewound, Action::Roll).unwrap();

    assert_eq!(rewound.public.dice, state.public.dice);
}

// =============================================================================
// Profiles
// =============================================================================

#[test]
fn test_profiles_accumulate_over_games() {
    let rules = short_game_rules(2);
    let strategy = ThresholdStrategy::new(350);
    let seating = PlayerMap::new(2, |p: PlayerId| format!("bot-{}", p.index()));
    let mut registry = ProfileRegistry::new();

    let games = 6;
    for seed in 0..games {
        let mut state = rules.new_state(seed);
        play_game(&rules, &mut state, &[&strategy], 100_000).unwrap();
        let entries = record_game_results(&mut registry, &seating, &state.public);

        assert_eq!(entries.iter().filter(|e| e.won).count(), 1);
    }

    let total_wins: u32 = registry.leaderboard().iter().map(|p| p.games_won).sum();
    assert_eq!(total_wins, games as u32);
    for profile in registry.leaderboard() {
        assert_eq!(profile.games_played, games as u32);
        assert!(profile.average_score() > 0.0);
    }
}
