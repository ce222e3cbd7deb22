//! Membership/role gate
//!
//! Every privileged write goes through `require_member` or `require_admin`
//! before touching the database.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::MembershipRepository,
    error::{AppError, AppResult},
    models::{Membership, membership},
};

/// Membership lookups and authorization checks
pub struct MembershipService;

impl MembershipService {
    pub async fn find(pool: &PgPool, account: &str, room_id: &Uuid) -> AppResult<Option<Membership>> {
        MembershipRepository::find(pool, account, room_id).await
    }

    /// True when `account` holds the admin role in the room
    pub async fn is_admin(pool: &PgPool, account: &str, room_id: &Uuid) -> AppResult<bool> {
        let found = Self::find(pool, account, room_id).await?;
        Ok(membership::is_admin(found.as_ref()))
    }

    pub async fn require_member(pool: &PgPool, account: &str, room_id: &Uuid) -> AppResult<Membership> {
        Self::find(pool, account, room_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Room membership required".to_string()))
    }

    pub async fn require_admin(pool: &PgPool, account: &str, room_id: &Uuid) -> AppResult<Membership> {
        match Self::find(pool, account, room_id).await? {
            Some(m) if m.is_admin() => Ok(m),
            _ => Err(AppError::Forbidden("Room admin role required".to_string())),
        }
    }
}
