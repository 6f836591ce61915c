//! Reputation Scoring Core
//!
//! Converts raw participation events (votes, proposals) into a bounded,
//! decaying, tiered behavioral score.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────┐     ┌──────────────────┐     ┌────────────────┐
//! │ ParticipationStats │────►│ ReputationEngine │◄────│ ScoreRecord    │
//! │ (raw counters)     │     │ (record + synth) │     │ (derived)      │
//! └────────────────────┘     └──────────────────┘     └────────────────┘
//!                                     │
//!                         ┌───────────┴───────────┐
//!                         ▼                       ▼
//!                 ┌──────────────┐       ┌─────────────────┐
//!                 │ decay / tier │       │ report builder  │
//!                 │ (pure fns)   │       │ (read-only)     │
//!                 └──────────────┘       └─────────────────┘
//! ```
//!
//! ## Score model
//!
//! - Base score = votes * 10 + proposals * 50, re-derived in full on every
//!   synthesis from the cumulative counters.
//! - A consistency streak of 5 or more applies a 150% multiplier.
//! - The result is capped at 1000 and classified into five tier bands.
//! - Decay accrues per 1000-block period and is reported alongside the
//!   score; the lifetime peak never decreases.

mod decay;
mod engine;
mod report;
mod score;
mod stats;

pub use decay::decay_amount;
pub use engine::{ReputationEngine, ScoreUpdate};
pub use report::{AggregateTotals, ComprehensiveReport, Standing};
pub use score::{ScoreRecord, ScoringParams, Tier, MAX_SCORE};
pub use stats::ParticipationStats;
