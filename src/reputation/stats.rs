//! Raw Participation Counters
//!
//! One row per community member, created lazily on their first recorded
//! event. These counters are the ground truth of the system: score records
//! can always be re-derived from them, but not the other way around.

use serde::{Deserialize, Serialize};

/// Cumulative participation counters for a single member.
///
/// `last_active_block` is the host ledger's monotone height marker of the
/// most recent recorded event; the consistency streak compares against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationStats {
    pub total_votes: u64,
    pub proposals_created: u64,
    pub last_active_block: u64,
    pub consistency_streak: u64,
    /// Counts every recorded event, same cadence as the global interaction
    /// total. The name is inherited from the source system; it performs no
    /// deduplication of interaction kinds.
    pub unique_interactions: u64,
}

impl ParticipationStats {
    /// True until the member's first event of any kind has been recorded.
    /// The global active-user counter increments on this zero-to-nonzero
    /// transition, exactly once per member.
    pub fn is_unseen(&self) -> bool {
        self.total_votes == 0 && self.proposals_created == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_all_zero() {
        let stats = ParticipationStats::default();
        assert_eq!(stats.total_votes, 0);
        assert_eq!(stats.proposals_created, 0);
        assert_eq!(stats.last_active_block, 0);
        assert_eq!(stats.consistency_streak, 0);
        assert_eq!(stats.unique_interactions, 0);
        assert!(stats.is_unseen());
    }

    #[test]
    fn any_activity_marks_member_as_seen() {
        let voted = ParticipationStats {
            total_votes: 1,
            ..Default::default()
        };
        assert!(!voted.is_unseen());

        let proposed = ParticipationStats {
            proposals_created: 1,
            ..Default::default()
        };
        assert!(!proposed.is_unseen());
    }
}
