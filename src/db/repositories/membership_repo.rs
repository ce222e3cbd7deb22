//! Membership repository

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{error::AppResult, models::Membership};

/// Member row joined with its profile name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberWithProfile {
    pub account: String,
    pub roles: Vec<String>,
    pub name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Repository for membership database operations
pub struct MembershipRepository;

impl MembershipRepository {
    /// Look up the membership for (account, room)
    pub async fn find(pool: &PgPool, account: &str, room_id: &Uuid) -> AppResult<Option<Membership>> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"SELECT * FROM memberships WHERE account = $1 AND room_id = $2"#,
        )
        .bind(account)
        .bind(room_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Insert or replace the roles of a membership
    pub async fn upsert(
        pool: &PgPool,
        account: &str,
        room_id: &Uuid,
        roles: &[String],
    ) -> AppResult<Membership> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (account, room_id, roles)
            VALUES ($1, $2, $3)
            ON CONFLICT (account, room_id) DO UPDATE SET roles = EXCLUDED.roles
            RETURNING *
            "#,
        )
        .bind(account)
        .bind(room_id)
        .bind(roles)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Insert a membership inside an open transaction
    pub async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        account: &str,
        room_id: &Uuid,
        roles: &[String],
    ) -> AppResult<Membership> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (account, room_id, roles)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(account)
        .bind(room_id)
        .bind(roles)
        .fetch_one(&mut **tx)
        .await?;

        Ok(membership)
    }

    /// Members of a room with profile names, newest first
    pub async fn list_by_room(pool: &PgPool, room_id: &Uuid) -> AppResult<Vec<MemberWithProfile>> {
        let members = sqlx::query_as::<_, MemberWithProfile>(
            r#"
            SELECT m.account, m.roles, u.name, m.created_at
            FROM memberships m
            LEFT JOIN users u ON u.account = m.account
            WHERE m.room_id = $1
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(room_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }
}
