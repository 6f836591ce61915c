//! Participation Repository - durable raw activity counters
//!
//! One row per member. A missing row is not an error; the engine
//! materializes the all-zero default, so `get` returns `Ok(None)` and the
//! caller decides.

use chrono::Utc;
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::reputation::ParticipationStats;

pub struct ParticipationRepository {
    pool: PgPool,
}

impl ParticipationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<(), String> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS agora.participation (
                user_id VARCHAR(255) PRIMARY KEY,
                total_votes BIGINT NOT NULL DEFAULT 0,
                proposals_created BIGINT NOT NULL DEFAULT 0,
                last_active_block BIGINT NOT NULL DEFAULT 0,
                consistency_streak BIGINT NOT NULL DEFAULT 0,
                unique_interactions BIGINT NOT NULL DEFAULT 0,
                updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
        "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create participation table: {}", e))?;

        Ok(())
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<ParticipationStats>, String> {
        let row = sqlx::query(
            r#"
            SELECT total_votes, proposals_created, last_active_block,
                   consistency_streak, unique_interactions
            FROM agora.participation
            WHERE user_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to get participation stats: {}", e))?;

        Ok(row.map(|row| {
            let total_votes: i64 = row.get("total_votes");
            let proposals_created: i64 = row.get("proposals_created");
            let last_active_block: i64 = row.get("last_active_block");
            let consistency_streak: i64 = row.get("consistency_streak");
            let unique_interactions: i64 = row.get("unique_interactions");

            ParticipationStats {
                total_votes: total_votes as u64,
                proposals_created: proposals_created as u64,
                last_active_block: last_active_block as u64,
                consistency_streak: consistency_streak as u64,
                unique_interactions: unique_interactions as u64,
            }
        }))
    }

    pub async fn upsert(&self, user_id: &str, stats: &ParticipationStats) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO agora.participation
                (user_id, total_votes, proposals_created, last_active_block,
                 consistency_streak, unique_interactions, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                total_votes = EXCLUDED.total_votes,
                proposals_created = EXCLUDED.proposals_created,
                last_active_block = EXCLUDED.last_active_block,
                consistency_streak = EXCLUDED.consistency_streak,
                unique_interactions = EXCLUDED.unique_interactions,
                updated_at = EXCLUDED.updated_at
        "#,
        )
        .bind(user_id)
        .bind(stats.total_votes as i64)
        .bind(stats.proposals_created as i64)
        .bind(stats.last_active_block as i64)
        .bind(stats.consistency_streak as i64)
        .bind(stats.unique_interactions as i64)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to upsert participation stats: {}", e))?;

        Ok(())
    }
}
