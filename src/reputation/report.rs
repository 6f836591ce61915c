//! Dashboard Report Composition
//!
//! Read-only projection of a member's participation counters and score
//! record into a single payload, plus comparative standing against the
//! community-wide averages. Nothing here mutates state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::reputation::score::{ScoreRecord, ScoringParams, Tier};
use crate::reputation::stats::ParticipationStats;

/// Comparative standing against the community average interaction count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    #[serde(rename = "above average")]
    AboveAverage,
    #[serde(rename = "average or below")]
    AverageOrBelow,
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Standing::AboveAverage => f.write_str("above average"),
            Standing::AverageOrBelow => f.write_str("average or below"),
        }
    }
}

/// Everything a dashboard needs to render one member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    pub user: String,
    pub score: u64,
    pub tier: Tier,
    pub last_updated: u64,
    pub lifetime_peak: u64,
    pub total_votes: u64,
    pub proposals_created: u64,
    /// Blocks remaining until the next decay period elapses.
    pub blocks_until_decay: u64,
    /// Points short of the next tier band; 0 at or above the Diamond floor.
    pub points_to_next_tier: u64,
    pub standing: Standing,
}

/// Community-wide aggregate counters, a single process-wide instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    /// One increment per recorded activity event.
    pub total_interactions: u64,
    /// One increment per member, on their first recorded event.
    pub active_users: u64,
}

pub(crate) fn build_report(
    user: &str,
    stats: &ParticipationStats,
    record: &ScoreRecord,
    totals: AggregateTotals,
    now: u64,
    params: &ScoringParams,
) -> ComprehensiveReport {
    let since_update = now.saturating_sub(record.last_updated);
    let blocks_until_decay = params.decay_interval - (since_update % params.decay_interval);

    let points_to_next_tier = match Tier::next_threshold(record.score) {
        Some(threshold) => threshold - record.score,
        None => 0,
    };

    // A community with no active members has no meaningful average.
    let standing = if totals.active_users > 0
        && stats.unique_interactions > totals.total_interactions / totals.active_users
    {
        Standing::AboveAverage
    } else {
        Standing::AverageOrBelow
    };

    ComprehensiveReport {
        user: user.to_string(),
        score: record.score,
        tier: record.tier,
        last_updated: record.last_updated,
        lifetime_peak: record.lifetime_peak,
        total_votes: stats.total_votes,
        proposals_created: stats.proposals_created,
        blocks_until_decay,
        points_to_next_tier,
        standing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_for(
        stats: ParticipationStats,
        record: ScoreRecord,
        totals: AggregateTotals,
        now: u64,
    ) -> ComprehensiveReport {
        build_report(
            "member_1",
            &stats,
            &record,
            totals,
            now,
            &ScoringParams::default(),
        )
    }

    #[test]
    fn decay_countdown_wraps_per_interval() {
        let record = ScoreRecord {
            last_updated: 100,
            ..Default::default()
        };
        let report = report_for(
            ParticipationStats::default(),
            record.clone(),
            AggregateTotals::default(),
            100,
        );
        assert_eq!(report.blocks_until_decay, 1000);

        let report = report_for(
            ParticipationStats::default(),
            record.clone(),
            AggregateTotals::default(),
            399,
        );
        assert_eq!(report.blocks_until_decay, 701);

        let report = report_for(
            ParticipationStats::default(),
            record,
            AggregateTotals::default(),
            1099,
        );
        assert_eq!(report.blocks_until_decay, 1);
    }

    #[test]
    fn points_to_next_tier_is_zero_at_the_top() {
        let mut record = ScoreRecord {
            score: 300,
            tier: Tier::Bronze,
            ..Default::default()
        };
        let report = report_for(
            ParticipationStats::default(),
            record.clone(),
            AggregateTotals::default(),
            0,
        );
        assert_eq!(report.points_to_next_tier, 100);

        record.score = 960;
        record.tier = Tier::Diamond;
        let report = report_for(
            ParticipationStats::default(),
            record,
            AggregateTotals::default(),
            0,
        );
        assert_eq!(report.points_to_next_tier, 0);
    }

    #[test]
    fn standing_guards_division_by_zero() {
        let stats = ParticipationStats {
            unique_interactions: 10,
            ..Default::default()
        };
        let report = report_for(
            stats,
            ScoreRecord::default(),
            AggregateTotals::default(),
            0,
        );
        assert_eq!(report.standing, Standing::AverageOrBelow);
    }

    #[test]
    fn standing_compares_against_community_average() {
        let stats = ParticipationStats {
            unique_interactions: 8,
            ..Default::default()
        };
        let totals = AggregateTotals {
            total_interactions: 20,
            active_users: 4,
        };
        let report = report_for(stats, ScoreRecord::default(), totals, 0);
        assert_eq!(report.standing, Standing::AboveAverage);

        let stats = ParticipationStats {
            unique_interactions: 5,
            ..Default::default()
        };
        let report = report_for(stats, ScoreRecord::default(), totals, 0);
        assert_eq!(report.standing, Standing::AverageOrBelow);
    }

    #[test]
    fn standing_labels_round_trip_as_plain_strings() {
        let above = serde_json::to_string(&Standing::AboveAverage).unwrap();
        assert_eq!(above, "\"above average\"");
        let parsed: Standing = serde_json::from_str(&above).unwrap();
        assert_eq!(parsed, Standing::AboveAverage);
    }
}
