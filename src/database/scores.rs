//! Score Repository - durable synthesized score records

use chrono::Utc;
use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::error;

use crate::reputation::{ScoreRecord, Tier};

pub struct ScoreRepository {
    pool: PgPool,
}

impl ScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<(), String> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS agora.scores (
                user_id VARCHAR(255) PRIMARY KEY,
                score BIGINT NOT NULL DEFAULT 0,
                last_updated BIGINT NOT NULL DEFAULT 0,
                tier VARCHAR(16) NOT NULL DEFAULT 'None',
                lifetime_peak BIGINT NOT NULL DEFAULT 0,
                updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )
        "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create scores table: {}", e))?;

        Ok(())
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<ScoreRecord>, String> {
        let row = sqlx::query(
            r#"
            SELECT score, last_updated, tier, lifetime_peak
            FROM agora.scores
            WHERE user_id = $1
        "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| format!("Failed to get score record: {}", e))?;

        Ok(row.map(|row| {
            let score: i64 = row.get("score");
            let last_updated: i64 = row.get("last_updated");
            let lifetime_peak: i64 = row.get("lifetime_peak");
            let tier_str: String = row.get("tier");
            let tier = match tier_str.as_str() {
                "Bronze" => Tier::Bronze,
                "Silver" => Tier::Silver,
                "Gold" => Tier::Gold,
                "Platinum" => Tier::Platinum,
                "Diamond" => Tier::Diamond,
                "None" => Tier::None,
                other => {
                    error!(tier = %other, "unknown tier in database, reclassifying");
                    Tier::for_score(score as u64)
                }
            };

            ScoreRecord {
                score: score as u64,
                last_updated: last_updated as u64,
                tier,
                lifetime_peak: lifetime_peak as u64,
            }
        }))
    }

    pub async fn upsert(&self, user_id: &str, record: &ScoreRecord) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO agora.scores
                (user_id, score, last_updated, tier, lifetime_peak, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                score = EXCLUDED.score,
                last_updated = EXCLUDED.last_updated,
                tier = EXCLUDED.tier,
                lifetime_peak = EXCLUDED.lifetime_peak,
                updated_at = EXCLUDED.updated_at
        "#,
        )
        .bind(user_id)
        .bind(record.score as i64)
        .bind(record.last_updated as i64)
        .bind(record.tier.as_str())
        .bind(record.lifetime_peak as i64)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to upsert score record: {}", e))?;

        Ok(())
    }
}
