//! PostgreSQL Store Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserStatsId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{ChallengeCompletion, UserStats};
use crate::domain::repository::ProgressStore;
use crate::domain::value_objects::{ChallengeKey, UserId};
use crate::error::{ProgressError, ProgressResult};

/// PostgreSQL-backed progress store
///
/// `user_stats.user_id` is unique, so create-if-absent is a single upsert
/// and concurrent session starts cannot produce duplicate rows.
#[derive(Clone)]
pub struct PgProgressStore {
    pool: PgPool,
}

impl PgProgressStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProgressStore for PgProgressStore {
    async fn fetch_user_stats(&self, user_id: &UserId) -> ProgressResult<Option<UserStats>> {
        let row = sqlx::query_as::<_, UserStatsRow>(
            r#"
            SELECT
                user_stats_id,
                user_id,
                streak,
                coins,
                created_at,
                updated_at
            FROM user_stats
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserStatsRow::into_user_stats).transpose()
    }

    async fn create_user_stats(&self, user_id: &UserId) -> ProgressResult<bool> {
        let stats = UserStats::new(user_id.clone());

        let created = sqlx::query(
            r#"
            INSERT INTO user_stats (
                user_stats_id,
                user_id,
                streak,
                coins,
                created_at,
                updated_at
            ) VALUES ($1, $2, 0, 0, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(stats.id.as_uuid())
        .bind(user_id.as_str())
        .bind(stats.created_at)
        .bind(stats.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected()
            == 1;

        if created {
            tracing::info!(user_id = %user_id, "User stats created");
        }

        Ok(created)
    }

    async fn fetch_completed_challenges(
        &self,
        user_id: &UserId,
        since: DateTime<Utc>,
    ) -> ProgressResult<Vec<ChallengeKey>> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"
            SELECT challenge_id
            FROM completed_challenges
            WHERE user_id = $1 AND completed_at >= $2
            ORDER BY completed_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let keys = rows
            .into_iter()
            .filter_map(|raw| match ChallengeKey::new(&raw) {
                Ok(key) => Some(key),
                Err(_) => {
                    tracing::warn!(user_id = %user_id, challenge_id = %raw, "Skipping malformed challenge id");
                    None
                }
            })
            .collect();

        Ok(keys)
    }

    async fn record_completed_challenge(
        &self,
        completion: &ChallengeCompletion,
    ) -> ProgressResult<()> {
        let reward = to_db_int(completion.reward, "reward")?;

        let mut tx = self.pool.begin().await?;

        // Serializes completions of one user, so the first-of-day check
        // below sees every committed completion.
        let locked = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_stats_id
            FROM user_stats
            WHERE user_id = $1
            FOR UPDATE
            "#,
        )
        .bind(completion.user_id.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Err(ProgressError::Internal(format!(
                "no stats record for {}",
                completion.user_id
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO completed_challenges (
                completed_challenge_id,
                user_id,
                challenge_id,
                completed_on,
                completed_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(completion.id.as_uuid())
        .bind(completion.user_id.as_str())
        .bind(completion.challenge_key.as_str())
        .bind(completion.day)
        .bind(completion.completed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &completion.challenge_key))?;

        let streak = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE user_stats
            SET coins = coins + $2,
                streak = streak + CASE
                    WHEN EXISTS (
                        SELECT 1
                        FROM completed_challenges
                        WHERE user_id = $1
                          AND completed_on = $3
                          AND completed_challenge_id <> $4
                    ) THEN 0
                    ELSE 1
                END,
                updated_at = $5
            WHERE user_id = $1
            RETURNING streak
            "#,
        )
        .bind(completion.user_id.as_str())
        .bind(reward)
        .bind(completion.day)
        .bind(completion.id.as_uuid())
        .bind(completion.completed_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %completion.user_id,
            challenge_id = %completion.challenge_key,
            reward = completion.reward,
            streak,
            "Challenge completion recorded"
        );

        Ok(())
    }
}

fn to_db_int(value: u32, what: &str) -> ProgressResult<i32> {
    i32::try_from(value).map_err(|_| ProgressError::Internal(format!("{what} out of range: {value}")))
}

fn map_insert_error(err: sqlx::Error, key: &ChallengeKey) -> ProgressError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            ProgressError::AlreadyRecorded(key.clone())
        }
        _ => ProgressError::Database(err),
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserStatsRow {
    user_stats_id: Uuid,
    user_id: String,
    streak: i32,
    coins: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserStatsRow {
    fn into_user_stats(self) -> ProgressResult<UserStats> {
        let streak = u32::try_from(self.streak)
            .map_err(|_| ProgressError::Internal(format!("negative streak: {}", self.streak)))?;
        let coins = u32::try_from(self.coins)
            .map_err(|_| ProgressError::Internal(format!("negative coins: {}", self.coins)))?;

        Ok(UserStats {
            id: UserStatsId::from_uuid(self.user_stats_id),
            user_id: UserId::new(&self.user_id)?,
            streak,
            coins,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
