//! Challenge repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Challenge, ChallengeStatus},
};

/// Submission counts for a challenge
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct ChallengeCounts {
    pub submission_count: i64,
    pub submitter_count: i64,
}

/// Repository for challenge database operations
pub struct ChallengeRepository;

impl ChallengeRepository {
    /// Create a new open challenge
    pub async fn create(
        pool: &PgPool,
        room_id: &Uuid,
        title: &str,
        description: &str,
        weight: i32,
    ) -> AppResult<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            INSERT INTO challenges (room_id, title, description, weight)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(title)
        .bind(description)
        .bind(weight)
        .fetch_one(pool)
        .await?;

        Ok(challenge)
    }

    /// Find challenge by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Challenge>> {
        let challenge = sqlx::query_as::<_, Challenge>(r#"SELECT * FROM challenges WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(challenge)
    }

    /// List challenges in a room, newest first
    pub async fn list_by_room(
        pool: &PgPool,
        room_id: &Uuid,
        status: Option<ChallengeStatus>,
    ) -> AppResult<Vec<Challenge>> {
        let challenges = sqlx::query_as::<_, Challenge>(
            r#"
            SELECT * FROM challenges
            WHERE room_id = $1
                AND ($2::challenge_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(room_id)
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(challenges)
    }

    /// Update title and description
    pub async fn update_details(
        pool: &PgPool,
        id: &Uuid,
        title: &str,
        description: &str,
    ) -> AppResult<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            UPDATE challenges
            SET title = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_one(pool)
        .await?;

        Ok(challenge)
    }

    /// Open or close a challenge
    pub async fn update_status(
        pool: &PgPool,
        id: &Uuid,
        status: ChallengeStatus,
    ) -> AppResult<Challenge> {
        let challenge = sqlx::query_as::<_, Challenge>(
            r#"
            UPDATE challenges
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(challenge)
    }

    /// Submission totals for a challenge
    pub async fn counts(pool: &PgPool, id: &Uuid) -> AppResult<ChallengeCounts> {
        let counts = sqlx::query_as::<_, ChallengeCounts>(
            r#"
            SELECT
                COUNT(*) AS submission_count,
                COUNT(DISTINCT author) AS submitter_count
            FROM workproofs
            WHERE challenge_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }
}
