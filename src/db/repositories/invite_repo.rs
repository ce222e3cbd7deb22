//! Invite repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Invite};

/// Repository for invite database operations
pub struct InviteRepository;

impl InviteRepository {
    /// Create a new invite
    pub async fn create(pool: &PgPool, room_id: &Uuid, created_by: &str) -> AppResult<Invite> {
        let invite = sqlx::query_as::<_, Invite>(
            r#"
            INSERT INTO invites (room_id, created_by)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(created_by)
        .fetch_one(pool)
        .await?;

        Ok(invite)
    }
}
