//! Integration tests for the Agora reputation engine
//!
//! These tests verify end-to-end behavior of the engine: activity
//! recording, streak handling, score synthesis, tier progression, peak
//! retention, report composition, and the pause gate.

use std::sync::Arc;

use agora_reputation::{
    AdminGate, EngineError, ReputationEngine, ScoringParams, Standing, Tier,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_engine() -> (Arc<ReputationEngine>, Arc<AdminGate>) {
    let gate = Arc::new(AdminGate::new("governor"));
    let engine = Arc::new(ReputationEngine::new(
        gate.clone(),
        ScoringParams::default(),
    ));
    (engine, gate)
}

/// Record `count` votes spaced `gap` blocks apart, starting at `start`.
/// Returns the height of the last vote.
async fn cast_votes(engine: &ReputationEngine, user: &str, start: u64, count: u64, gap: u64) -> u64 {
    let mut height = start;
    for i in 0..count {
        height = start + i * gap;
        engine.record_vote(user, height).await.unwrap();
    }
    height
}

// ============================================================================
// Scoring Pipeline
// ============================================================================

mod scoring {
    use super::*;

    #[tokio::test]
    async fn steady_voter_climbs_through_the_tiers() {
        let (engine, _) = create_engine();

        // 20 consistent votes: base 200, streak bonus -> 300, Bronze.
        let height = cast_votes(&engine, "alice", 100, 20, 10).await;
        let update = engine.update_score("alice", height + 1).await.unwrap();
        assert_eq!(update.new_score, 300);
        assert_eq!(update.tier, Tier::Bronze);

        // 10 more votes: base 300, bonus -> 450, Silver.
        let height = cast_votes(&engine, "alice", height + 10, 10, 10).await;
        let update = engine.update_score("alice", height + 1).await.unwrap();
        assert_eq!(update.new_score, 450);
        assert_eq!(update.tier, Tier::Silver);

        // 6 proposals on top: base 600, bonus -> 900, Platinum.
        for i in 0..6u64 {
            engine
                .record_proposal("alice", height + 2 + i)
                .await
                .unwrap();
        }
        let update = engine.update_score("alice", height + 10).await.unwrap();
        assert_eq!(update.new_score, 900);
        assert_eq!(update.tier, Tier::Platinum);
    }

    #[tokio::test]
    async fn heavy_participation_caps_at_diamond() {
        let (engine, _) = create_engine();

        // 50 votes and 10 proposals, streak intact:
        // base = 500 + 500 = 1000, bonus -> 1500, capped at 1000.
        let height = cast_votes(&engine, "whale", 100, 50, 10).await;
        for i in 0..10u64 {
            engine.record_proposal("whale", height + 1 + i).await.unwrap();
        }
        let update = engine.update_score("whale", height + 20).await.unwrap();
        assert_eq!(update.new_score, 1000);
        assert_eq!(update.tier, Tier::Diamond);

        let record = engine.get_score("whale").await;
        assert_eq!(record.lifetime_peak, 1000);
    }

    #[tokio::test]
    async fn peak_survives_a_streak_collapse() {
        let (engine, _) = create_engine();

        let height = cast_votes(&engine, "bob", 100, 30, 10).await;
        let high = engine.update_score("bob", height + 1).await.unwrap();
        // base 300, bonus -> 450
        assert_eq!(high.new_score, 450);

        // One lonely vote far in the future resets the streak; the bonus
        // disappears and the score recomputes lower.
        engine.record_vote("bob", height + 100_000).await.unwrap();
        let low = engine
            .update_score("bob", height + 100_001)
            .await
            .unwrap();
        assert_eq!(low.new_score, 310);

        let record = engine.get_score("bob").await;
        assert_eq!(record.score, 310);
        assert_eq!(record.tier, Tier::Bronze);
        assert_eq!(record.lifetime_peak, 450);
    }

    #[tokio::test]
    async fn decay_accrues_in_reports_without_touching_the_score() {
        let (engine, _) = create_engine();

        let height = cast_votes(&engine, "carol", 100, 10, 10).await;
        let first = engine.update_score("carol", height + 1).await.unwrap();
        assert_eq!(first.decay_applied, 0);

        // 3000 blocks of inactivity: three decay periods accrue.
        let later = engine
            .update_score("carol", height + 1 + 3000)
            .await
            .unwrap();
        assert_eq!(later.decay_applied, 15);
        assert_eq!(later.new_score, first.new_score);
    }
}

// ============================================================================
// Community Aggregates & Reports
// ============================================================================

mod community {
    use super::*;

    #[tokio::test]
    async fn aggregates_track_a_mixed_crowd() {
        let (engine, _) = create_engine();

        cast_votes(&engine, "alice", 100, 5, 10).await;
        engine.record_proposal("bob", 100).await.unwrap();
        engine.record_vote("bob", 110).await.unwrap();
        engine.record_vote("carol", 100).await.unwrap();

        let totals = engine.totals().await;
        assert_eq!(totals.active_users, 3);
        assert_eq!(totals.total_interactions, 8);
    }

    #[tokio::test]
    async fn report_for_an_unseen_member_is_all_defaults() {
        let (engine, _) = create_engine();

        let report = engine.comprehensive_report("ghost", 500).await;
        assert_eq!(report.score, 0);
        assert_eq!(report.tier, Tier::None);
        assert_eq!(report.total_votes, 0);
        assert_eq!(report.proposals_created, 0);
        assert_eq!(report.points_to_next_tier, 400);
        assert_eq!(report.standing, Standing::AverageOrBelow);
    }

    #[tokio::test]
    async fn report_separates_the_busy_from_the_quiet() {
        let (engine, _) = create_engine();

        cast_votes(&engine, "busy", 100, 9, 10).await;
        engine.record_vote("quiet", 100).await.unwrap();

        // Average is 5 interactions per active member.
        let busy = engine.comprehensive_report("busy", 200).await;
        assert_eq!(busy.standing, Standing::AboveAverage);

        let quiet = engine.comprehensive_report("quiet", 200).await;
        assert_eq!(quiet.standing, Standing::AverageOrBelow);
    }

    #[tokio::test]
    async fn report_counts_down_to_the_next_decay_period() {
        let (engine, _) = create_engine();

        engine.record_vote("alice", 100).await.unwrap();
        engine.update_score("alice", 100).await.unwrap();

        let report = engine.comprehensive_report("alice", 350).await;
        assert_eq!(report.blocks_until_decay, 750);

        let report = engine.comprehensive_report("alice", 1100).await;
        assert_eq!(report.blocks_until_decay, 1000);
    }
}

// ============================================================================
// Pause Gate
// ============================================================================

mod pause_gate {
    use super::*;

    #[tokio::test]
    async fn pause_freezes_every_mutating_operation() {
        let (engine, gate) = create_engine();

        cast_votes(&engine, "alice", 100, 3, 10).await;
        let before = engine.totals().await;

        gate.set_paused("governor", true).unwrap();

        assert_eq!(
            engine.record_vote("alice", 200).await,
            Err(EngineError::Paused)
        );
        assert_eq!(
            engine.record_proposal("alice", 200).await,
            Err(EngineError::Paused)
        );
        assert!(engine.update_score("alice", 200).await.is_err());

        // Reads are unaffected and nothing moved.
        assert_eq!(engine.totals().await, before);
        let stats = engine.get_participation("alice").await;
        assert_eq!(stats.total_votes, 3);
        assert_eq!(engine.get_score("alice").await.tier, Tier::None);
    }

    #[tokio::test]
    async fn operations_resume_after_unpause() {
        let (engine, gate) = create_engine();

        gate.set_paused("governor", true).unwrap();
        assert!(engine.record_vote("alice", 100).await.is_err());

        gate.set_paused("governor", false).unwrap();
        engine.record_vote("alice", 100).await.unwrap();
        let update = engine.update_score("alice", 101).await.unwrap();
        assert_eq!(update.new_score, 10);
        assert_eq!(update.tier, Tier::Bronze);
    }

    #[tokio::test]
    async fn only_the_owner_touches_the_switch() {
        let (engine, gate) = create_engine();

        let err = gate.set_paused("mallory", true).unwrap_err();
        assert!(matches!(err, EngineError::Unauthorized(_)));

        // The failed attempt left the gate open.
        engine.record_vote("alice", 100).await.unwrap();
    }
}
