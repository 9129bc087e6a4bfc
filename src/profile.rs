//! Player profiles and per-game results.
//!
//! A [`ProfileRegistry`] keeps lifetime statistics keyed by player id.
//! After a game, [`record_game_results`] turns the final table into one
//! [`GameResultEntry`] per seat and folds it into the matching profiles.

use derive_more::Display;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::player::PlayerMap;
use crate::core::state::PublicState;

/// Lifetime statistics for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display(
    "{player_name} || High Score: {high_score}, Games Played: {games_played}, Games Won: {games_won}, Total Score: {total_score}"
)]
pub struct PlayerProfile {
    /// Stable identifier.
    pub player_id: String,
    /// Display name.
    pub player_name: String,
    /// Best final score.
    pub high_score: u32,
    /// Games finished.
    pub games_played: u32,
    /// Games won.
    pub games_won: u32,
    /// Sum of final scores.
    pub total_score: u64,
}

impl PlayerProfile {
    /// A profile with no games played.
    pub fn new(player_id: impl Into<String>, player_name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            high_score: 0,
            games_played: 0,
            games_won: 0,
            total_score: 0,
        }
    }

    /// Mean final score, or 0 before any game.
    #[must_use]
    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / f64::from(self.games_played)
        }
    }

    /// Fraction of games won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played)
        }
    }

    fn record(&mut self, entry: &GameResultEntry) {
        self.games_played += 1;
        self.total_score += u64::from(entry.score);
        self.high_score = self.high_score.max(entry.score);
        if entry.won {
            self.games_won += 1;
        }
    }
}

/// One seat's outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GameResultEntry {
    /// Profile id of the seat.
    pub player_id: String,
    /// Final banked score.
    pub score: u32,
    /// Turns taken.
    pub turns: u32,
    /// Turns lost to a farkle.
    pub farkles: u32,
    /// Whether this seat won.
    pub won: bool,
}

/// Profiles keyed by player id.
#[derive(Clone, Debug, Default)]
pub struct ProfileRegistry {
    profiles: FxHashMap<String, PlayerProfile>,
}

impl ProfileRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a profile.
    pub fn register(&mut self, profile: PlayerProfile) {
        self.profiles.insert(profile.player_id.clone(), profile);
    }

    /// Look up a profile.
    #[must_use]
    pub fn get(&self, player_id: &str) -> Option<&PlayerProfile> {
        self.profiles.get(player_id)
    }

    /// Number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// No profiles registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles ordered by wins, then average score, then id.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<&PlayerProfile> {
        let mut rows: Vec<_> = self.profiles.values().collect();
        rows.sort_by(|a, b| {
            b.games_won
                .cmp(&a.games_won)
                .then_with(|| b.average_score().total_cmp(&a.average_score()))
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        rows
    }

    fn entry(&mut self, player_id: &str) -> &mut PlayerProfile {
        self.profiles
            .entry(player_id.to_string())
            .or_insert_with(|| PlayerProfile::new(player_id, player_id))
    }
}

/// Build one result entry per seat from a finished table and fold them into
/// `registry`.
///
/// `seating` maps each seat to a profile id. Unknown ids get a fresh profile
/// named after the id.
pub fn record_game_results(
    registry: &mut ProfileRegistry,
    seating: &PlayerMap<String>,
    state: &PublicState,
) -> Vec<GameResultEntry> {
    let entries: Vec<GameResultEntry> = state
        .scores
        .iter()
        .map(|(player, sheet)| GameResultEntry {
            player_id: seating[player].clone(),
            score: sheet.score,
            turns: sheet.turns,
            farkles: sheet.farkles,
            won: state.winner == Some(player),
        })
        .collect();

    for entry in &entries {
        registry.entry(&entry.player_id).record(entry);
    }
    debug!(seats = entries.len(), winner = ?state.winner, "Recorded game results");

    entries
}
