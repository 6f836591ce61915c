//! Decay Calculator
//!
//! Pure time-based decay: whole elapsed decay periods times the decay rate,
//! floored so it can never exceed the score it would apply to. Same inputs
//! always produce the same output; no side effects, no failure modes.
//!
//! Note that synthesis currently reports the decay amount without
//! subtracting it from the re-derived score; see the engine module.

use crate::reputation::score::ScoringParams;

/// Amount of decay accrued between `last_updated` and `now` against
/// `current_score`. `now` earlier than `last_updated` clamps to zero
/// elapsed time rather than wrapping.
pub fn decay_amount(last_updated: u64, current_score: u64, now: u64, params: &ScoringParams) -> u64 {
    let elapsed = now.saturating_sub(last_updated);
    let periods = elapsed / params.decay_interval;
    let raw = periods * params.decay_rate;
    raw.min(current_score)
}
