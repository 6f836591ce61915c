//! HTTP API endpoints for the reputation engine
//!
//! Provides REST APIs for:
//! - Activity recording (votes, proposals)
//! - On-demand score synthesis
//! - Score, report, and aggregate queries
//! - Pause switch administration

use axum::http::StatusCode;

use crate::error::EngineError;

pub mod admin;
pub mod reputation;

pub use admin::{AdminApiState, create_admin_router};
pub use reputation::{ReputationApiState, create_reputation_router};

/// Translate the two core failure kinds to HTTP: a paused engine is a
/// conflict with current server state; a non-owner admin call is forbidden.
pub(crate) fn engine_error_response(err: EngineError) -> (StatusCode, String) {
    let status = match err {
        EngineError::Paused => StatusCode::CONFLICT,
        EngineError::Unauthorized(_) => StatusCode::FORBIDDEN,
    };
    (status, err.to_string())
}
