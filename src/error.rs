//! Engine Error Taxonomy
//!
//! Exactly two failure kinds exist in the core: mutating calls rejected
//! while the engine is paused, and non-owner attempts to toggle the pause
//! switch. Lookups never fail (missing rows materialize defaults) and all
//! scoring arithmetic is capped, so nothing else can go wrong here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A state-mutating operation was invoked while the engine is paused.
    #[error("engine is paused; mutating operations are rejected")]
    Paused,

    /// A caller other than the configured owner tried an admin action.
    #[error("caller `{0}` is not the configured owner")]
    Unauthorized(String),
}
