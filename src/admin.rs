//! Admin Gate - Owner-Controlled Pause Switch
//!
//! A single designated owner identity may halt all state-mutating
//! operations. The engine consumes only the boolean pause state as a
//! precondition; toggling is restricted to the owner and fails with an
//! authorization error for anyone else.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use crate::error::EngineError;

pub struct AdminGate {
    owner: String,
    paused: AtomicBool,
}

impl AdminGate {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            paused: AtomicBool::new(false),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Precondition check used by every mutating engine operation.
    pub fn ensure_active(&self) -> Result<(), EngineError> {
        if self.is_paused() {
            Err(EngineError::Paused)
        } else {
            Ok(())
        }
    }

    /// Toggle the pause switch. Only the configured owner may do this;
    /// returns the new state on success.
    pub fn set_paused(&self, caller: &str, paused: bool) -> Result<bool, EngineError> {
        if caller != self.owner {
            return Err(EngineError::Unauthorized(caller.to_string()));
        }
        self.paused.store(paused, Ordering::SeqCst);
        info!(caller = %caller, paused = paused, "pause switch toggled");
        Ok(paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_starts_unpaused() {
        let gate = AdminGate::new("governor");
        assert!(!gate.is_paused());
        assert!(gate.ensure_active().is_ok());
    }

    #[test]
    fn owner_can_toggle_pause() {
        let gate = AdminGate::new("governor");
        assert_eq!(gate.set_paused("governor", true), Ok(true));
        assert!(gate.is_paused());
        assert_eq!(gate.ensure_active(), Err(EngineError::Paused));
        assert_eq!(gate.set_paused("governor", false), Ok(false));
        assert!(!gate.is_paused());
    }

    #[test]
    fn non_owner_is_rejected_without_effect() {
        let gate = AdminGate::new("governor");
        let err = gate.set_paused("intruder", true).unwrap_err();
        assert_eq!(err, EngineError::Unauthorized("intruder".to_string()));
        assert!(!gate.is_paused());
    }
}
