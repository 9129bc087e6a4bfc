//! Game configuration.
//!
//! `GameSettings` holds everything a table can vary: win and break-in
//! thresholds, the of-a-kind multiplier, single-die points, the fixed-point
//! combos, and the number of players.
//!
//! Settings are built with `with_*` methods or loaded from TOML:
//!
//! ```toml
//! target_score = 5000
//! break_in_score = 350
//!
//! [[combos]]
//! kind = "two_triplets"
//! points = 2000
//! enabled = false
//! ```
//!
//! Keys that are left out keep their defaults. A `combos` list replaces the
//! default combo list entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info, instrument};

use super::error::ConfigError;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 1;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 8;

/// Cap on the multiplier, single-die points, and combo points.
pub const MAX_POINTS: u32 = 1_000_000;

/// Fixed-point combinations that use all six dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ComboKind {
    /// One of each face, 1 through 6.
    #[serde(rename = "straight_1to6")]
    #[strum(serialize = "straight_1to6")]
    Straight,
    /// Three pairs, or a pair plus four of a kind.
    #[serde(rename = "three_pairs")]
    #[strum(serialize = "three_pairs")]
    ThreePairs,
    /// Two different three-of-a-kinds.
    #[serde(rename = "two_triplets")]
    #[strum(serialize = "two_triplets")]
    TwoTriplets,
}

impl ComboKind {
    /// Human-readable name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            ComboKind::Straight => "Straight (1-6)",
            ComboKind::ThreePairs => "Three Pairs",
            ComboKind::TwoTriplets => "Two Triplets",
        }
    }

    /// Short rules text.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            ComboKind::Straight => "All faces 1-6 once",
            ComboKind::ThreePairs => "Three pairs across six dice",
            ComboKind::TwoTriplets => "Two sets of three-of-a-kind",
        }
    }

    /// Points awarded under the standard table.
    #[must_use]
    pub fn default_points(self) -> u32 {
        match self {
            ComboKind::Straight | ComboKind::ThreePairs => 1500,
            ComboKind::TwoTriplets => 2500,
        }
    }
}

/// Scoring rule for one combo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboRule {
    /// Which combo this rule scores.
    pub kind: ComboKind,

    /// Points awarded.
    pub points: u32,

    /// Disabled combos are ignored by scoring and selection.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ComboRule {
    /// Create an enabled rule.
    #[must_use]
    pub fn new(kind: ComboKind, points: u32) -> Self {
        Self {
            kind,
            points,
            enabled: true,
        }
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Banked score that triggers the final round.
    pub target_score: u32,

    /// Points a player must reach in one turn before banking is allowed.
    pub break_in_score: u32,

    /// Number of players (1-8).
    pub player_count: usize,

    /// Multiplier for 3-6 of a kind. A 1 counts as face value 10.
    pub points_multiplier_of_a_kind: u32,

    /// Points for a single 1 outside any combo.
    pub points_per_one: u32,

    /// Points for a single 5 outside any combo.
    pub points_per_five: u32,

    /// Fixed-point combo rules.
    pub combos: Vec<ComboRule>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            target_score: 10_000,
            break_in_score: 500,
            player_count: 2,
            points_multiplier_of_a_kind: 100,
            points_per_one: 100,
            points_per_five: 50,
            combos: ComboKind::iter()
                .map(|kind| ComboRule::new(kind, kind.default_points()))
                .collect(),
        }
    }
}

impl GameSettings {
    /// Standard settings for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Set the target score.
    #[must_use]
    pub fn with_target_score(mut self, score: u32) -> Self {
        self.target_score = score;
        self
    }

    /// Set the break-in threshold.
    #[must_use]
    pub fn with_break_in_score(mut self, score: u32) -> Self {
        self.break_in_score = score;
        self
    }

    /// Set the number of players.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the of-a-kind multiplier.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.points_multiplier_of_a_kind = multiplier;
        self
    }

    /// Replace (or add) the rule for a combo.
    #[must_use]
    pub fn with_combo(mut self, rule: ComboRule) -> Self {
        match self.combos.iter_mut().find(|c| c.kind == rule.kind) {
            Some(existing) => *existing = rule,
            None => self.combos.push(rule),
        }
        self
    }

    /// Disable a combo.
    #[must_use]
    pub fn without_combo(mut self, kind: ComboKind) -> Self {
        if let Some(rule) = self.combos.iter_mut().find(|c| c.kind == kind) {
            rule.enabled = false;
        }
        self
    }

    /// Get the rule for a combo, enabled or not.
    #[must_use]
    pub fn combo(&self, kind: ComboKind) -> Option<&ComboRule> {
        self.combos.iter().find(|c| c.kind == kind)
    }

    /// Points for a combo, or `None` if it is missing or disabled.
    #[must_use]
    pub fn combo_points(&self, kind: ComboKind) -> Option<u32> {
        self.combo(kind).filter(|c| c.enabled).map(|c| c.points)
    }

    /// Whether a combo scores at this table.
    #[must_use]
    pub fn combo_enabled(&self, kind: ComboKind) -> bool {
        self.combo_points(kind).is_some()
    }

    /// Check the settings describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::new(format!(
                "player_count must be {}-{}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, self.player_count
            )));
        }
        if self.target_score == 0 {
            return Err(ConfigError::new("target_score must be positive"));
        }
        if self.break_in_score > self.target_score {
            return Err(ConfigError::new(format!(
                "break_in_score {} exceeds target_score {}",
                self.break_in_score, self.target_score
            )));
        }
        if self.points_multiplier_of_a_kind == 0 {
            return Err(ConfigError::new("points_multiplier_of_a_kind must be positive"));
        }
        let points = [
            ("points_multiplier_of_a_kind", self.points_multiplier_of_a_kind),
            ("points_per_one", self.points_per_one),
            ("points_per_five", self.points_per_five),
        ];
        for (name, value) in points {
            if value > MAX_POINTS {
                return Err(ConfigError::new(format!(
                    "{} must be at most {}, got {}",
                    name, MAX_POINTS, value
                )));
            }
        }
        for (i, rule) in self.combos.iter().enumerate() {
            if self.combos[..i].iter().any(|c| c.kind == rule.kind) {
                return Err(ConfigError::new(format!("duplicate combo rule {}", rule.kind)));
            }
            if rule.points > MAX_POINTS {
                return Err(ConfigError::new(format!(
                    "{} points must be at most {}, got {}",
                    rule.kind, MAX_POINTS, rule.points
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from TOML text.
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        debug!(
            target_score = settings.target_score,
            break_in = settings.break_in_score,
            players = settings.player_count,
            "Settings parsed"
        );
        Ok(settings)
    }

    /// Load and validate settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;
        let settings = Self::from_toml_str(&text)?;
        info!("Settings loaded");
        Ok(settings)
    }
}
