//! Ledger Block Clock
//!
//! The core takes explicit block heights so tests can drive time
//! deterministically; the HTTP layer derives "now" from this clock, which
//! maps wall-clock time onto a monotone height counted from a configured
//! genesis instant.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct LedgerClock {
    genesis: DateTime<Utc>,
    block_seconds: u64,
}

impl LedgerClock {
    /// `block_seconds` must be nonzero; config validation enforces this
    /// before a clock is ever constructed.
    pub fn new(genesis: DateTime<Utc>, block_seconds: u64) -> Self {
        Self {
            genesis,
            block_seconds,
        }
    }

    /// Current ledger height.
    pub fn height(&self) -> u64 {
        self.height_at(Utc::now())
    }

    /// Height at an arbitrary instant; instants before genesis clamp to 0.
    pub fn height_at(&self, at: DateTime<Utc>) -> u64 {
        let elapsed = (at - self.genesis).num_seconds();
        if elapsed <= 0 {
            0
        } else {
            elapsed as u64 / self.block_seconds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn genesis() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn height_advances_one_block_per_interval() {
        let clock = LedgerClock::new(genesis(), 600);
        assert_eq!(clock.height_at(genesis()), 0);
        assert_eq!(
            clock.height_at(genesis() + chrono::Duration::seconds(599)),
            0
        );
        assert_eq!(
            clock.height_at(genesis() + chrono::Duration::seconds(600)),
            1
        );
        assert_eq!(clock.height_at(genesis() + chrono::Duration::hours(24)), 144);
    }

    #[test]
    fn instants_before_genesis_clamp_to_zero() {
        let clock = LedgerClock::new(genesis(), 600);
        assert_eq!(
            clock.height_at(genesis() - chrono::Duration::hours(1)),
            0
        );
    }
}
