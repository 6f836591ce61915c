//! Reputation Engine - Recorder and Score Synthesizer
//!
//! Single-writer core of the system. One lock guards both stores and the
//! community aggregates, so every public operation is applied as one
//! indivisible unit: no operation can observe a partially-applied effect
//! of another, and aggregate increments cannot be lost.
//!
//! Activity recording mutates only the participation counters; synthesis
//! mutates only the score records. Both are rejected up front while the
//! admin gate reports paused, and every accepted operation runs to
//! completion.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::admin::AdminGate;
use crate::database::DatabasePool;
use crate::error::EngineError;
use crate::reputation::decay::decay_amount;
use crate::reputation::report::{build_report, AggregateTotals, ComprehensiveReport};
use crate::reputation::score::{ScoreRecord, ScoringParams, Tier};
use crate::reputation::stats::ParticipationStats;

/// Result of one synthesis pass, returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub user: String,
    pub new_score: u64,
    /// Accrued decay, reported for observability. The synthesized score is
    /// fully re-derived from cumulative activity totals and the decay
    /// amount is not subtracted from it; this mirrors the source system's
    /// behavior and is pinned by a test rather than silently corrected.
    pub decay_applied: u64,
    pub tier: Tier,
}

/// Both stores plus the community aggregates, guarded as one unit.
#[derive(Default)]
struct LedgerState {
    stats: HashMap<String, ParticipationStats>,
    scores: HashMap<String, ScoreRecord>,
    totals: AggregateTotals,
}

pub struct ReputationEngine {
    gate: Arc<AdminGate>,
    params: ScoringParams,
    db: Option<Arc<DatabasePool>>,
    state: RwLock<LedgerState>,
}

impl ReputationEngine {
    pub fn new(gate: Arc<AdminGate>, params: ScoringParams) -> Self {
        Self {
            gate,
            params,
            db: None,
            state: RwLock::new(LedgerState::default()),
        }
    }

    pub fn with_database(mut self, db: Arc<DatabasePool>) -> Self {
        self.db = Some(db);
        self
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Reload the community aggregates from the database after a restart.
    /// Per-member rows are pulled lazily on first access instead.
    pub async fn hydrate(&self) {
        if let Some(ref db) = self.db {
            match db.totals().await {
                Ok(Some(totals)) => {
                    let mut state = self.state.write().await;
                    state.totals = totals;
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "failed to load aggregate totals"),
            }
        }
    }

    /// Record one vote for `user` at ledger height `now`.
    pub async fn record_vote(&self, user: &str, now: u64) -> Result<(), EngineError> {
        self.gate.ensure_active()?;

        let mut state = self.state.write().await;
        let mut stats = self.stats_entry(&mut state, user).await;

        let is_consistent =
            now.saturating_sub(stats.last_active_block) < self.params.consistency_window;

        // Zero-to-nonzero activity transition; must be checked before the
        // counters below are bumped.
        if stats.is_unseen() {
            state.totals.active_users += 1;
        }

        // A gap resets the streak to 1, not 0: the vote happening right
        // now is itself a streak of length one.
        stats.consistency_streak = if is_consistent {
            stats.consistency_streak + 1
        } else {
            1
        };
        stats.total_votes += 1;
        stats.unique_interactions += 1;
        stats.last_active_block = now;
        state.totals.total_interactions += 1;

        debug!(
            user = %user,
            block = now,
            streak = stats.consistency_streak,
            total_votes = stats.total_votes,
            "recorded vote"
        );

        state.stats.insert(user.to_string(), stats.clone());
        self.persist_stats(user, &stats, state.totals).await;
        Ok(())
    }

    /// Record one created proposal for `user` at ledger height `now`.
    /// Proposals never touch the consistency streak.
    pub async fn record_proposal(&self, user: &str, now: u64) -> Result<(), EngineError> {
        self.gate.ensure_active()?;

        let mut state = self.state.write().await;
        let mut stats = self.stats_entry(&mut state, user).await;

        if stats.is_unseen() {
            state.totals.active_users += 1;
        }

        stats.proposals_created += 1;
        stats.unique_interactions += 1;
        stats.last_active_block = now;
        state.totals.total_interactions += 1;

        debug!(
            user = %user,
            block = now,
            proposals = stats.proposals_created,
            "recorded proposal"
        );

        state.stats.insert(user.to_string(), stats.clone());
        self.persist_stats(user, &stats, state.totals).await;
        Ok(())
    }

    /// Synthesize a fresh score record for `user` at ledger height `now`.
    ///
    /// The score is re-derived in full from the cumulative participation
    /// counters on every call, so synthesis is idempotent for a fixed
    /// `now` and unchanged counters. Callers decide when to close the
    /// books; nothing here runs automatically per event.
    pub async fn update_score(&self, user: &str, now: u64) -> Result<ScoreUpdate, EngineError> {
        self.gate.ensure_active()?;

        let mut state = self.state.write().await;
        let stats = self.stats_entry(&mut state, user).await;
        let prior = self.record_entry(&mut state, user).await;

        let decay_applied = decay_amount(prior.last_updated, prior.score, now, &self.params);

        let base = stats.total_votes * self.params.vote_weight
            + stats.proposals_created * self.params.proposal_weight;
        let multiplier = if stats.consistency_streak >= self.params.streak_bonus_threshold {
            self.params.streak_bonus_multiplier
        } else {
            100
        };
        let adjusted = base * multiplier / 100;
        let new_score = adjusted.min(self.params.max_score);

        let record = ScoreRecord {
            score: new_score,
            last_updated: now,
            tier: Tier::for_score(new_score),
            lifetime_peak: prior.lifetime_peak.max(new_score),
        };

        debug!(
            user = %user,
            block = now,
            score = record.score,
            tier = %record.tier,
            peak = record.lifetime_peak,
            decay = decay_applied,
            "synthesized score"
        );

        state.scores.insert(user.to_string(), record.clone());
        self.persist_record(user, &record).await;

        Ok(ScoreUpdate {
            user: user.to_string(),
            new_score: record.score,
            decay_applied,
            tier: record.tier,
        })
    }

    /// Current score record for `user`; the all-zero `Tier::None` default
    /// when the member has never been synthesized. Never fails.
    pub async fn get_score(&self, user: &str) -> ScoreRecord {
        {
            let state = self.state.read().await;
            if let Some(record) = state.scores.get(user) {
                return record.clone();
            }
        }
        if let Some(ref db) = self.db {
            if let Ok(Some(record)) = db.scores().get(user).await {
                let mut state = self.state.write().await;
                return state
                    .scores
                    .entry(user.to_string())
                    .or_insert(record)
                    .clone();
            }
        }
        ScoreRecord::default()
    }

    /// Current participation counters for `user`; all-zero when unseen.
    pub async fn get_participation(&self, user: &str) -> ParticipationStats {
        {
            let state = self.state.read().await;
            if let Some(stats) = state.stats.get(user) {
                return stats.clone();
            }
        }
        if let Some(ref db) = self.db {
            if let Ok(Some(stats)) = db.participation().get(user).await {
                let mut state = self.state.write().await;
                return state.stats.entry(user.to_string()).or_insert(stats).clone();
            }
        }
        ParticipationStats::default()
    }

    /// Community-wide aggregate counters.
    pub async fn totals(&self) -> AggregateTotals {
        self.state.read().await.totals
    }

    /// Compose the full dashboard payload for `user` at ledger height
    /// `now`. Read-only; never fails.
    pub async fn comprehensive_report(&self, user: &str, now: u64) -> ComprehensiveReport {
        let mut state = self.state.write().await;
        let stats = self.stats_entry(&mut state, user).await;
        let record = self.record_entry(&mut state, user).await;
        build_report(user, &stats, &record, state.totals, now, &self.params)
    }

    // Store access: in-memory rows are authoritative; a miss falls back to
    // the database once and then to the zero default.

    async fn stats_entry(&self, state: &mut LedgerState, user: &str) -> ParticipationStats {
        if let Some(stats) = state.stats.get(user) {
            return stats.clone();
        }
        if let Some(ref db) = self.db {
            if let Ok(Some(stats)) = db.participation().get(user).await {
                state.stats.insert(user.to_string(), stats.clone());
                return stats;
            }
        }
        ParticipationStats::default()
    }

    async fn record_entry(&self, state: &mut LedgerState, user: &str) -> ScoreRecord {
        if let Some(record) = state.scores.get(user) {
            return record.clone();
        }
        if let Some(ref db) = self.db {
            if let Ok(Some(record)) = db.scores().get(user).await {
                state.scores.insert(user.to_string(), record.clone());
                return record;
            }
        }
        ScoreRecord::default()
    }

    // Write-through persistence. The in-memory commit has already
    // happened; a database failure is logged and does not surface as a
    // third error kind.

    async fn persist_stats(&self, user: &str, stats: &ParticipationStats, totals: AggregateTotals) {
        if let Some(ref db) = self.db {
            if let Err(e) = db.participation().upsert(user, stats).await {
                warn!(user = %user, error = %e, "failed to persist participation stats");
            }
            if let Err(e) = db.save_totals(totals).await {
                warn!(error = %e, "failed to persist aggregate totals");
            }
        }
    }

    async fn persist_record(&self, user: &str, record: &ScoreRecord) {
        if let Some(ref db) = self.db {
            if let Err(e) = db.scores().upsert(user, record).await {
                warn!(user = %user, error = %e, "failed to persist score record");
            }
        }
    }
}
