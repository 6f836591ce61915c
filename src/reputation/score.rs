//! Score Records, Tier Bands, and Scoring Parameters
//!
//! A member's behavioral score is bounded to `0..=1000` and classified into
//! one of five tier bands by inclusive lower-bound thresholds, checked from
//! the highest band down. The stored tier is always the classification of
//! the stored score; `Tier::None` appears only on the default record of a
//! member who has never been synthesized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard ceiling on any behavioral score.
pub const MAX_SCORE: u64 = 1000;

/// Inclusive lower bounds of the tier bands, highest first.
pub const DIAMOND_MIN: u64 = 950;
pub const PLATINUM_MIN: u64 = 900;
pub const GOLD_MIN: u64 = 700;
pub const SILVER_MIN: u64 = 400;

/// Reputation tier bands, ordered Bronze up to Diamond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    /// A member with no score record yet. Never produced by classification.
    #[default]
    None,
}

impl Tier {
    /// Classify a score into its band. Thresholds are inclusive lower
    /// bounds evaluated highest-first: exactly 950 is Diamond, exactly 399
    /// is Bronze.
    pub fn for_score(score: u64) -> Tier {
        if score >= DIAMOND_MIN {
            Tier::Diamond
        } else if score >= PLATINUM_MIN {
            Tier::Platinum
        } else if score >= GOLD_MIN {
            Tier::Gold
        } else if score >= SILVER_MIN {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    /// Threshold of the band directly above `score`, or `None` at or above
    /// the Diamond floor.
    pub fn next_threshold(score: u64) -> Option<u64> {
        if score >= DIAMOND_MIN {
            None
        } else if score >= PLATINUM_MIN {
            Some(DIAMOND_MIN)
        } else if score >= GOLD_MIN {
            Some(PLATINUM_MIN)
        } else if score >= SILVER_MIN {
            Some(GOLD_MIN)
        } else {
            Some(SILVER_MIN)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::None => "None",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The last synthesized score for a member, created lazily on first
/// synthesis. Invariants: `score <= MAX_SCORE`, `lifetime_peak >= score`
/// after any synthesis, and `tier == Tier::for_score(score)` whenever a
/// record has been written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u64,
    pub last_updated: u64,
    pub tier: Tier,
    /// Highest score ever reached, retained after the current score falls.
    pub lifetime_peak: u64,
}

/// Tunable weights and windows of the scoring pipeline. Defaults are the
/// canonical Agora parameters; deployments override them via environment
/// configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Points contributed per recorded vote.
    pub vote_weight: u64,
    /// Points contributed per created proposal.
    pub proposal_weight: u64,
    /// Streak length at which the bonus multiplier kicks in.
    pub streak_bonus_threshold: u64,
    /// Fixed-point percentage applied to the base score once the streak
    /// threshold is met (150 means +50%).
    pub streak_bonus_multiplier: u64,
    /// Blocks between two consecutive events for the streak to continue.
    pub consistency_window: u64,
    /// Blocks per decay period.
    pub decay_interval: u64,
    /// Points shed per elapsed decay period.
    pub decay_rate: u64,
    /// Ceiling applied after weighting and bonus.
    pub max_score: u64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            vote_weight: 10,
            proposal_weight: 50,
            streak_bonus_threshold: 5,
            streak_bonus_multiplier: 150,
            consistency_window: 144,
            decay_interval: 1000,
            decay_rate: 5,
            max_score: MAX_SCORE,
        }
    }
}
