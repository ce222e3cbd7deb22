//! Challenge service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{ChallengeCounts, ChallengeRepository, WorkproofRepository},
    error::{AppError, AppResult},
    models::{Challenge, ChallengeStatus, has_work_to_verify},
    services::{MembershipService, RoomService},
    utils::validation::required_text,
};

/// A challenge with the aggregates shown on its detail page
#[derive(Debug, Clone)]
pub struct ChallengeDetail {
    pub challenge: Challenge,
    pub counts: ChallengeCounts,
    pub has_work_to_verify: bool,
}

/// Challenge service for business logic
pub struct ChallengeService;

impl ChallengeService {
    pub async fn create_challenge(
        pool: &PgPool,
        actor: &str,
        room_id: &Uuid,
        title: &str,
        description: &str,
        weight: i32,
    ) -> AppResult<Challenge> {
        let title = required_text("Title", title).map_err(AppError::Validation)?;
        let description = required_text("Description", description).map_err(AppError::Validation)?;
        if weight < 0 {
            return Err(AppError::Validation("Weight cannot be negative".to_string()));
        }

        RoomService::ensure_exists(pool, room_id).await?;
        MembershipService::require_admin(pool, actor, room_id).await?;

        let challenge =
            ChallengeRepository::create(pool, room_id, &title, &description, weight).await?;

        info!(challenge_id = %challenge.id, room_id = %room_id, weight, "Challenge created");
        Ok(challenge)
    }

    pub async fn update_challenge(
        pool: &PgPool,
        actor: &str,
        challenge_id: &Uuid,
        title: &str,
        description: &str,
    ) -> AppResult<Challenge> {
        let title = required_text("Title", title).map_err(AppError::Validation)?;
        let description = required_text("Description", description).map_err(AppError::Validation)?;

        let challenge = Self::find(pool, challenge_id).await?;
        MembershipService::require_admin(pool, actor, &challenge.room_id).await?;

        ChallengeRepository::update_details(pool, challenge_id, &title, &description).await
    }

    /// Open or close a challenge. Closed challenges take no new submissions.
    pub async fn set_challenge_status(
        pool: &PgPool,
        actor: &str,
        challenge_id: &Uuid,
        status: ChallengeStatus,
    ) -> AppResult<Challenge> {
        let challenge = Self::find(pool, challenge_id).await?;
        MembershipService::require_admin(pool, actor, &challenge.room_id).await?;

        let updated = ChallengeRepository::update_status(pool, challenge_id, status).await?;
        info!(challenge_id = %challenge_id, status = %status, "Challenge status changed");
        Ok(updated)
    }

    /// Challenge detail. `has_work_to_verify` is only computed for room admins.
    pub async fn get_challenge(
        pool: &PgPool,
        viewer: Option<&str>,
        challenge_id: &Uuid,
    ) -> AppResult<ChallengeDetail> {
        let challenge = Self::find(pool, challenge_id).await?;

        let viewer_is_admin = async {
            match viewer {
                Some(viewer) => MembershipService::is_admin(pool, viewer, &challenge.room_id).await,
                None => Ok(false),
            }
        };
        let (counts, viewer_is_admin) =
            futures::try_join!(ChallengeRepository::counts(pool, challenge_id), viewer_is_admin)?;

        let has_work = match viewer {
            Some(viewer) if viewer_is_admin => {
                let workproofs = WorkproofRepository::list_by_challenge(pool, challenge_id).await?;
                has_work_to_verify(&workproofs, viewer)
            }
            _ => false,
        };

        Ok(ChallengeDetail {
            challenge,
            counts,
            has_work_to_verify: has_work,
        })
    }

    /// Challenges of a room, newest first
    pub async fn list_challenges(
        pool: &PgPool,
        room_id: &Uuid,
        status: Option<ChallengeStatus>,
    ) -> AppResult<Vec<Challenge>> {
        RoomService::ensure_exists(pool, room_id).await?;
        ChallengeRepository::list_by_room(pool, room_id, status).await
    }

    pub(crate) async fn find(pool: &PgPool, challenge_id: &Uuid) -> AppResult<Challenge> {
        ChallengeRepository::find_by_id(pool, challenge_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Challenge not found".to_string()))
    }
}
