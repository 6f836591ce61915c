//! Admin API Endpoints
//!
//! Pause switch inspection and owner-gated toggling. The gate performs its
//! own authorization check; this layer only translates the outcome.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::admin::AdminGate;
use crate::api::engine_error_response;

/// API state for admin endpoints
#[derive(Clone)]
pub struct AdminApiState {
    pub gate: Arc<AdminGate>,
}

#[derive(Debug, Serialize)]
pub struct PauseStateResponse {
    pub paused: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetPausedRequest {
    /// Identity of the caller; must match the configured owner.
    pub caller: String,
    pub paused: bool,
}

/// GET /paused - current pause state
pub async fn get_paused(State(state): State<AdminApiState>) -> Json<PauseStateResponse> {
    Json(PauseStateResponse {
        paused: state.gate.is_paused(),
    })
}

/// PUT /paused - toggle the pause switch (owner only)
pub async fn set_paused(
    State(state): State<AdminApiState>,
    Json(payload): Json<SetPausedRequest>,
) -> Result<Json<PauseStateResponse>, (StatusCode, String)> {
    let paused = state
        .gate
        .set_paused(&payload.caller, payload.paused)
        .map_err(engine_error_response)?;
    Ok(Json(PauseStateResponse { paused }))
}

/// Create the admin API router
pub fn create_admin_router(state: AdminApiState) -> Router {
    Router::new()
        .route("/paused", get(get_paused).put(set_paused))
        .with_state(state)
}
