//! Database Connection Pool using sqlx
//!
//! Optional write-through durability for the in-memory stores. The
//! aggregate totals live in a single-row table so a restart can rehydrate
//! the community-wide counters.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::info;

use crate::database::participation::ParticipationRepository;
use crate::database::scores::ScoreRepository;
use crate::reputation::AggregateTotals;

pub struct DatabasePool {
    pool: PgPool,
    participation: ParticipationRepository,
    scores: ScoreRepository,
}

impl DatabasePool {
    pub async fn new(connection_string: &str) -> Result<Self, String> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await
            .map_err(|e| format!("Failed to connect to PostgreSQL: {}", e))?;

        info!("Connected to PostgreSQL");

        let participation = ParticipationRepository::new(pool.clone());
        let scores = ScoreRepository::new(pool.clone());

        Ok(Self {
            pool,
            participation,
            scores,
        })
    }

    /// Create the schema and all tables if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), String> {
        info!("Initializing agora schema...");

        sqlx::query("CREATE SCHEMA IF NOT EXISTS agora")
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to create agora schema: {}", e))?;

        self.participation.init_schema().await?;
        self.scores.init_schema().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS agora.totals (
                id SMALLINT PRIMARY KEY DEFAULT 1 CHECK (id = 1),
                total_interactions BIGINT NOT NULL DEFAULT 0,
                active_users BIGINT NOT NULL DEFAULT 0
            )
        "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create totals table: {}", e))?;

        info!("Agora schema initialized");
        Ok(())
    }

    pub fn participation(&self) -> &ParticipationRepository {
        &self.participation
    }

    pub fn scores(&self) -> &ScoreRepository {
        &self.scores
    }

    /// Community-wide aggregates; `None` before the first event persists.
    pub async fn totals(&self) -> Result<Option<AggregateTotals>, String> {
        let row = sqlx::query("SELECT total_interactions, active_users FROM agora.totals WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to get aggregate totals: {}", e))?;

        Ok(row.map(|row| {
            let total_interactions: i64 = row.get("total_interactions");
            let active_users: i64 = row.get("active_users");
            AggregateTotals {
                total_interactions: total_interactions as u64,
                active_users: active_users as u64,
            }
        }))
    }

    pub async fn save_totals(&self, totals: AggregateTotals) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO agora.totals (id, total_interactions, active_users)
            VALUES (1, $1, $2)
            ON CONFLICT (id) DO UPDATE SET
                total_interactions = EXCLUDED.total_interactions,
                active_users = EXCLUDED.active_users
        "#,
        )
        .bind(totals.total_interactions as i64)
        .bind(totals.active_users as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save aggregate totals: {}", e))?;

        Ok(())
    }
}
