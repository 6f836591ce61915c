//! Agora Reputation Engine
//!
//! Converts raw participation events (votes, proposals) from members of a
//! governance community into a bounded, decaying, tiered behavioral score.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs         - Crate root with re-exports
//! ├── main.rs        - Server entrypoint
//! ├── config.rs      - Configuration management
//! ├── admin.rs       - Owner-controlled pause switch
//! ├── clock.rs       - Ledger block-height clock
//! ├── error.rs       - The two tagged core failures
//! ├── reputation/    - Scoring core
//! │   ├── stats.rs   - Raw participation counters
//! │   ├── score.rs   - Score records, tier bands, parameters
//! │   ├── decay.rs   - Pure decay calculator
//! │   ├── engine.rs  - Recorder + score synthesizer
//! │   └── report.rs  - Dashboard report composition
//! ├── api/           - HTTP API endpoints
//! │   ├── reputation.rs - Activity, synthesis, score & report queries
//! │   └── admin.rs   - Pause switch endpoints
//! └── database/      - Optional PostgreSQL durability
//! ```

pub mod admin;
pub mod api;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod reputation;

// Re-export main types for convenience
pub use admin::AdminGate;
pub use clock::LedgerClock;
pub use config::EngineConfig;
pub use database::DatabasePool;
pub use error::EngineError;
pub use reputation::{
    AggregateTotals, ComprehensiveReport, ParticipationStats, ReputationEngine, ScoreRecord,
    ScoreUpdate, ScoringParams, Standing, Tier, MAX_SCORE,
};

// Re-export API types
pub use api::{
    create_admin_router, create_reputation_router, AdminApiState, ReputationApiState,
};
