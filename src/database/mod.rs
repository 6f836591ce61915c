//! PostgreSQL Database Module
//!
//! Write-through durability for participation stats, score records, and
//! the community aggregate totals. The in-memory stores stay authoritative.

pub mod participation;
pub mod pool;
pub mod scores;

pub use participation::ParticipationRepository;
pub use pool::DatabasePool;
pub use scores::ScoreRepository;
