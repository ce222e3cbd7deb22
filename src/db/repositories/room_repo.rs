//! Room repository

use sqlx::{PgPool, Postgres, Transaction, types::Json};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Kpi, Room},
};

/// Repository for room database operations
pub struct RoomRepository;

impl RoomRepository {
    /// Create a room inside an open transaction
    pub async fn create_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Room> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&mut **tx)
        .await?;

        Ok(room)
    }

    /// Find room by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(r#"SELECT * FROM rooms WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(room)
    }

    /// Check that a room exists
    pub async fn exists(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM rooms WHERE id = $1)"#)
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(exists)
    }

    /// Merge the set fields of `patch` into one KPI slot.
    ///
    /// Null fields are stripped from the patch so they leave the stored
    /// values alone; other slots are untouched.
    pub async fn merge_kpi(pool: &PgPool, id: &Uuid, slot: &str, patch: &Kpi) -> AppResult<Room> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET kpis = kpis || jsonb_build_object(
                $2::text,
                COALESCE(kpis -> $2::text, '{}'::jsonb) || jsonb_strip_nulls($3::jsonb)
            )
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(slot)
        .bind(Json(patch))
        .fetch_one(pool)
        .await?;

        Ok(room)
    }
}
