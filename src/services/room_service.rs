//! Room service: rooms, KPI widgets, members and invites

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    constants::roles,
    db::repositories::{
        InviteRepository, MemberWithProfile, MembershipRepository, RoomRepository, UserRepository,
    },
    error::{AppError, AppResult},
    models::{Invite, Kpi, Membership, Room, kpi_slot, membership::{self, normalize_roles}},
    services::MembershipService,
    utils::{normalize_account, sanitize_string},
};

/// What the viewer may do in a room
#[derive(Debug, Clone, Default)]
pub struct MembershipView {
    pub is_member: bool,
    pub is_admin: bool,
    pub roles: Vec<String>,
}

impl From<Option<&Membership>> for MembershipView {
    fn from(found: Option<&Membership>) -> Self {
        Self {
            is_member: membership::is_member(found),
            is_admin: membership::is_admin(found),
            roles: found.map(|m| m.roles.clone()).unwrap_or_default(),
        }
    }
}

/// Room service for business logic
pub struct RoomService;

impl RoomService {
    /// Create a room; the creator becomes its first admin
    pub async fn create_room(
        pool: &PgPool,
        creator: &str,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<(Room, Membership)> {
        let name = sanitize_string(name);
        if name.is_empty() {
            return Err(AppError::Validation("Room name is required".to_string()));
        }
        let description = description.map(sanitize_string).filter(|d| !d.is_empty());

        let mut tx = pool.begin().await?;
        let room = RoomRepository::create_in_tx(&mut tx, &name, description.as_deref()).await?;
        let membership = MembershipRepository::create_in_tx(
            &mut tx,
            creator,
            &room.id,
            &normalize_roles([roles::ADMIN]),
        )
        .await?;
        tx.commit().await?;

        info!(room_id = %room.id, creator = %creator, "Room created");
        Ok((room, membership))
    }

    pub async fn get_room(pool: &PgPool, room_id: &Uuid) -> AppResult<Room> {
        RoomRepository::find_by_id(pool, room_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))
    }

    /// Merge the supplied fields into one KPI widget
    pub async fn update_kpi(
        pool: &PgPool,
        actor: &str,
        room_id: &Uuid,
        slot: u8,
        patch: Kpi,
    ) -> AppResult<Room> {
        let slot = kpi_slot(slot)
            .ok_or_else(|| AppError::Validation(format!("Unknown KPI slot: {}", slot)))?;
        Self::ensure_exists(pool, room_id).await?;
        MembershipService::require_admin(pool, actor, room_id).await?;

        let patch = Kpi {
            name: patch.name.map(|s| sanitize_string(&s)),
            indicator: patch.indicator.map(|s| sanitize_string(&s)),
            change: patch.change.map(|s| sanitize_string(&s)),
            change_type: patch.change_type,
        };

        let room = RoomRepository::merge_kpi(pool, room_id, &slot, &patch).await?;
        info!(room_id = %room_id, slot = %slot, actor = %actor, "KPI updated");
        Ok(room)
    }

    pub async fn list_members(pool: &PgPool, room_id: &Uuid) -> AppResult<Vec<MemberWithProfile>> {
        Self::ensure_exists(pool, room_id).await?;
        MembershipRepository::list_by_room(pool, room_id).await
    }

    /// Membership of the viewer; anonymous viewers are strangers
    pub async fn get_membership(
        pool: &PgPool,
        viewer: Option<&str>,
        room_id: &Uuid,
    ) -> AppResult<MembershipView> {
        Self::ensure_exists(pool, room_id).await?;
        let Some(viewer) = viewer else {
            return Ok(MembershipView::default());
        };

        let membership = MembershipService::find(pool, viewer, room_id).await?;
        Ok(MembershipView::from(membership.as_ref()))
    }

    /// Add an account to the room or replace its roles
    pub async fn grant_membership(
        pool: &PgPool,
        actor: &str,
        room_id: &Uuid,
        account: &str,
        requested_roles: &[String],
    ) -> AppResult<Membership> {
        let account = normalize_account(account).map_err(|e| AppError::Validation(e.to_string()))?;
        Self::ensure_exists(pool, room_id).await?;
        MembershipService::require_admin(pool, actor, room_id).await?;

        let roles = normalize_roles(requested_roles);
        if account == actor && !roles.iter().any(|r| r == roles::ADMIN) {
            return Err(AppError::Validation(
                "Admins cannot remove their own admin role".to_string(),
            ));
        }

        UserRepository::ensure(pool, &account).await?;
        let membership = MembershipRepository::upsert(pool, &account, room_id, &roles).await?;

        info!(room_id = %room_id, account = %account, roles = ?membership.roles, "Membership granted");
        Ok(membership)
    }

    /// Create an invite and its join link
    pub async fn create_invite(
        pool: &PgPool,
        public_url: &str,
        actor: &str,
        room_id: &Uuid,
    ) -> AppResult<(Invite, String)> {
        Self::ensure_exists(pool, room_id).await?;
        MembershipService::require_admin(pool, actor, room_id).await?;

        let invite = InviteRepository::create(pool, room_id, actor).await?;
        let link = invite.link(public_url);

        info!(room_id = %room_id, invite_id = %invite.id, "Invite created");
        Ok((invite, link))
    }

    pub(crate) async fn ensure_exists(pool: &PgPool, room_id: &Uuid) -> AppResult<()> {
        if RoomRepository::exists(pool, room_id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("Room not found".to_string()))
        }
    }
}
