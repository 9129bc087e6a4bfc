//! Farkle scoring rules.
//!
//! - `calculator`: Decompose a set of dice into scoring patterns
//! - `selection`: Which dice may be selected, and in what groups
//! - `counts`: Face histogram used by both

pub mod calculator;
pub mod counts;
pub mod selection;

pub use calculator::{calculate_score, is_farkle, score_breakdown, ScoreBreakdown, ScoringCombo, ScoringPattern};
pub use counts::FaceCounts;
pub use selection::{can_select_die, scoring_group, scoring_groups};
