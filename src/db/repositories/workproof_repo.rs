//! Workproof repository

use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Verification, Workproof},
};

/// Repository for workproof database operations
pub struct WorkproofRepository;

impl WorkproofRepository {
    /// Create a new workproof with no votes
    pub async fn create(
        pool: &PgPool,
        author: &str,
        room_id: &Uuid,
        challenge_id: &Uuid,
        description: &str,
        image_urls: &[String],
        weight: i32,
    ) -> AppResult<Workproof> {
        let workproof = sqlx::query_as::<_, Workproof>(
            r#"
            INSERT INTO workproofs (author, room_id, challenge_id, description, image_urls, weight)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(author)
        .bind(room_id)
        .bind(challenge_id)
        .bind(description)
        .bind(image_urls)
        .bind(weight)
        .fetch_one(pool)
        .await?;

        Ok(workproof)
    }

    /// Find workproof by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Workproof>> {
        let workproof = sqlx::query_as::<_, Workproof>(r#"SELECT * FROM workproofs WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(workproof)
    }

    /// All workproofs for a challenge, newest first
    pub async fn list_by_challenge(pool: &PgPool, challenge_id: &Uuid) -> AppResult<Vec<Workproof>> {
        let workproofs = sqlx::query_as::<_, Workproof>(
            r#"
            SELECT * FROM workproofs
            WHERE challenge_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(challenge_id)
        .fetch_all(pool)
        .await?;

        Ok(workproofs)
    }

    /// All workproofs written by an account, newest first
    pub async fn list_by_author(pool: &PgPool, author: &str) -> AppResult<Vec<Workproof>> {
        let workproofs = sqlx::query_as::<_, Workproof>(
            r#"
            SELECT * FROM workproofs
            WHERE author = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author)
        .fetch_all(pool)
        .await?;

        Ok(workproofs)
    }

    /// All workproofs in a room
    pub async fn list_by_room(pool: &PgPool, room_id: &Uuid) -> AppResult<Vec<Workproof>> {
        let workproofs = sqlx::query_as::<_, Workproof>(
            r#"
            SELECT * FROM workproofs
            WHERE room_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(room_id)
        .fetch_all(pool)
        .await?;

        Ok(workproofs)
    }

    /// Merge one vote into the verifications map.
    ///
    /// Runs as a single statement so concurrent verifiers never overwrite each
    /// other. Returns `None` when the workproof does not exist or `verifier`
    /// has already voted on it.
    pub async fn add_verification(
        pool: &PgPool,
        id: &Uuid,
        verifier: &str,
        verification: &Verification,
    ) -> AppResult<Option<Workproof>> {
        let workproof = sqlx::query_as::<_, Workproof>(
            r#"
            UPDATE workproofs
            SET verifications = verifications || jsonb_build_object($2::text, $3::jsonb)
            WHERE id = $1 AND verifications -> $2::text IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(verifier)
        .bind(Json(verification))
        .fetch_optional(pool)
        .await?;

        Ok(workproof)
    }
}
