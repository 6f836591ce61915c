//! Reputation API Endpoints
//!
//! Activity recording, on-demand score synthesis, and read-only score and
//! dashboard queries. The ledger height for each call comes from the
//! shared clock; the engine itself only ever sees explicit heights.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::engine_error_response;
use crate::clock::LedgerClock;
use crate::reputation::{
    AggregateTotals, ComprehensiveReport, ReputationEngine, ScoreUpdate, Tier,
};

/// API state for reputation endpoints
#[derive(Clone)]
pub struct ReputationApiState {
    pub engine: Arc<ReputationEngine>,
    pub clock: Arc<LedgerClock>,
}

// Response types

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub user: String,
    pub score: u64,
    pub last_updated: u64,
    pub tier: Tier,
    pub lifetime_peak: u64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_interactions: u64,
    pub active_users: u64,
}

// Endpoints

/// POST /activity/{user_id}/vote - record one vote
pub async fn record_vote(
    State(state): State<ReputationApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<AckResponse>, (StatusCode, String)> {
    let now = state.clock.height();
    state
        .engine
        .record_vote(&user_id, now)
        .await
        .map_err(engine_error_response)?;
    Ok(Json(AckResponse { ok: true }))
}

/// POST /activity/{user_id}/proposal - record one created proposal
pub async fn record_proposal(
    State(state): State<ReputationApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<AckResponse>, (StatusCode, String)> {
    let now = state.clock.height();
    state
        .engine
        .record_proposal(&user_id, now)
        .await
        .map_err(engine_error_response)?;
    Ok(Json(AckResponse { ok: true }))
}

/// POST /scores/{user_id}/synthesize - close the books for one member
pub async fn synthesize_score(
    State(state): State<ReputationApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<ScoreUpdate>, (StatusCode, String)> {
    let now = state.clock.height();
    let update = state
        .engine
        .update_score(&user_id, now)
        .await
        .map_err(engine_error_response)?;
    Ok(Json(update))
}

/// GET /scores/{user_id} - current score record (never fails)
pub async fn get_score(
    State(state): State<ReputationApiState>,
    Path(user_id): Path<String>,
) -> Json<ScoreResponse> {
    let record = state.engine.get_score(&user_id).await;
    Json(ScoreResponse {
        user: user_id,
        score: record.score,
        last_updated: record.last_updated,
        tier: record.tier,
        lifetime_peak: record.lifetime_peak,
    })
}

/// GET /reports/{user_id} - full dashboard payload (never fails)
pub async fn get_report(
    State(state): State<ReputationApiState>,
    Path(user_id): Path<String>,
) -> Json<ComprehensiveReport> {
    let now = state.clock.height();
    Json(state.engine.comprehensive_report(&user_id, now).await)
}

/// GET /stats - community-wide aggregate counters
pub async fn get_stats(State(state): State<ReputationApiState>) -> Json<StatsResponse> {
    let AggregateTotals {
        total_interactions,
        active_users,
    } = state.engine.totals().await;
    Json(StatsResponse {
        total_interactions,
        active_users,
    })
}

/// Create the reputation API router
pub fn create_reputation_router(state: ReputationApiState) -> Router {
    Router::new()
        .route("/activity/{user_id}/vote", post(record_vote))
        .route("/activity/{user_id}/proposal", post(record_proposal))
        .route("/scores/{user_id}/synthesize", post(synthesize_score))
        .route("/scores/{user_id}", get(get_score))
        .route("/reports/{user_id}", get(get_report))
        .route("/stats", get(get_stats))
        .with_state(state)
}
