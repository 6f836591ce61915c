//! Configuration Management
//!
//! Environment-driven configuration with validation. Every deployment knob
//! carries a sensible default; `AGORA_*` variables override them and
//! `validate()` rejects inconsistent combinations before the server starts.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::env;

use crate::clock::LedgerClock;
use crate::reputation::ScoringParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
    pub chain: ChainConfig,
    pub database: DatabaseConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Enable per-request span logging
    pub log_requests: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// The single identity allowed to toggle the pause switch
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Unix timestamp of the ledger genesis block
    pub genesis_unix: i64,
    /// Seconds per ledger block
    pub block_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub postgres_url: String,
    /// Enable PostgreSQL durability (if false, state is in-memory only)
    pub postgres_enabled: bool,
}

/// Scoring pipeline knobs; mirrors [`ScoringParams`] one to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub vote_weight: u64,
    pub proposal_weight: u64,
    pub streak_bonus_threshold: u64,
    pub streak_bonus_multiplier: u64,
    pub consistency_window: u64,
    pub decay_interval: u64,
    pub decay_rate: u64,
    pub max_score: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let params = ScoringParams::default();
        Self {
            vote_weight: params.vote_weight,
            proposal_weight: params.proposal_weight,
            streak_bonus_threshold: params.streak_bonus_threshold,
            streak_bonus_multiplier: params.streak_bonus_multiplier,
            consistency_window: params.consistency_window,
            decay_interval: params.decay_interval,
            decay_rate: params.decay_rate,
            max_score: params.max_score,
        }
    }
}

impl ScoringConfig {
    pub fn to_params(&self) -> ScoringParams {
        ScoringParams {
            vote_weight: self.vote_weight,
            proposal_weight: self.proposal_weight,
            streak_bonus_threshold: self.streak_bonus_threshold,
            streak_bonus_multiplier: self.streak_bonus_multiplier,
            consistency_window: self.consistency_window,
            decay_interval: self.decay_interval,
            decay_rate: self.decay_rate,
            max_score: self.max_score,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8870,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                log_requests: false,
            },
            admin: AdminConfig {
                owner: "governor".to_string(),
            },
            chain: ChainConfig {
                // 2024-01-01T00:00:00Z, ten-minute blocks (144 per day,
                // matching the consistency window).
                genesis_unix: 1_704_067_200,
                block_seconds: 600,
            },
            database: DatabaseConfig {
                postgres_url: "postgresql://localhost:5432/agora_reputation".to_string(),
                postgres_enabled: false,
            },
            scoring: ScoringConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `AGORA_*` environment variables on top of
    /// the defaults, then validate.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("AGORA_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("AGORA_PORT") {
            config.server.port = port.parse().context("Invalid AGORA_PORT value")?;
        }

        if let Ok(level) = env::var("AGORA_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(log_requests) = env::var("AGORA_LOG_REQUESTS") {
            config.logging.log_requests = log_requests
                .parse()
                .context("Invalid AGORA_LOG_REQUESTS value")?;
        }

        if let Ok(owner) = env::var("AGORA_OWNER") {
            config.admin.owner = owner;
        }

        if let Ok(genesis) = env::var("AGORA_GENESIS_UNIX") {
            config.chain.genesis_unix =
                genesis.parse().context("Invalid AGORA_GENESIS_UNIX value")?;
        }
        if let Ok(seconds) = env::var("AGORA_BLOCK_SECONDS") {
            config.chain.block_seconds = seconds
                .parse()
                .context("Invalid AGORA_BLOCK_SECONDS value")?;
        }

        if let Ok(url) = env::var("AGORA_POSTGRES_URL") {
            config.database.postgres_url = url;
        }
        if let Ok(enabled) = env::var("AGORA_POSTGRES_ENABLED") {
            config.database.postgres_enabled = enabled
                .parse()
                .context("Invalid AGORA_POSTGRES_ENABLED value")?;
        }

        if let Ok(weight) = env::var("AGORA_VOTE_WEIGHT") {
            config.scoring.vote_weight =
                weight.parse().context("Invalid AGORA_VOTE_WEIGHT value")?;
        }
        if let Ok(weight) = env::var("AGORA_PROPOSAL_WEIGHT") {
            config.scoring.proposal_weight = weight
                .parse()
                .context("Invalid AGORA_PROPOSAL_WEIGHT value")?;
        }
        if let Ok(threshold) = env::var("AGORA_STREAK_BONUS_THRESHOLD") {
            config.scoring.streak_bonus_threshold = threshold
                .parse()
                .context("Invalid AGORA_STREAK_BONUS_THRESHOLD value")?;
        }
        if let Ok(multiplier) = env::var("AGORA_STREAK_BONUS_MULTIPLIER") {
            config.scoring.streak_bonus_multiplier = multiplier
                .parse()
                .context("Invalid AGORA_STREAK_BONUS_MULTIPLIER value")?;
        }
        if let Ok(window) = env::var("AGORA_CONSISTENCY_WINDOW") {
            config.scoring.consistency_window = window
                .parse()
                .context("Invalid AGORA_CONSISTENCY_WINDOW value")?;
        }
        if let Ok(interval) = env::var("AGORA_DECAY_INTERVAL") {
            config.scoring.decay_interval = interval
                .parse()
                .context("Invalid AGORA_DECAY_INTERVAL value")?;
        }
        if let Ok(rate) = env::var("AGORA_DECAY_RATE") {
            config.scoring.decay_rate = rate.parse().context("Invalid AGORA_DECAY_RATE value")?;
        }
        if let Ok(max) = env::var("AGORA_MAX_SCORE") {
            config.scoring.max_score = max.parse().context("Invalid AGORA_MAX_SCORE value")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(anyhow::anyhow!("Server host cannot be empty"));
        }
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port must be non-zero"));
        }
        if self.admin.owner.is_empty() {
            return Err(anyhow::anyhow!("Admin owner identity cannot be empty"));
        }
        if self.chain.block_seconds == 0 {
            return Err(anyhow::anyhow!("Block time must be non-zero"));
        }
        if self.scoring.decay_interval == 0 {
            return Err(anyhow::anyhow!("Decay interval must be non-zero"));
        }
        if self.scoring.consistency_window == 0 {
            return Err(anyhow::anyhow!("Consistency window must be non-zero"));
        }
        if self.scoring.max_score == 0 {
            return Err(anyhow::anyhow!("Maximum score must be non-zero"));
        }
        if self.scoring.streak_bonus_multiplier < 100 {
            return Err(anyhow::anyhow!(
                "Streak bonus multiplier below 100 would penalize consistency"
            ));
        }
        if self.database.postgres_enabled && self.database.postgres_url.is_empty() {
            return Err(anyhow::anyhow!(
                "PostgreSQL is enabled but no connection string is configured"
            ));
        }
        Ok(())
    }

    pub fn genesis(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.chain.genesis_unix, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    pub fn to_clock(&self) -> LedgerClock {
        LedgerClock::new(self.genesis(), self.chain.block_seconds)
    }
}
