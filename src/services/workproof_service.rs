//! Workproof service: submissions and peer verification

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    db::repositories::WorkproofRepository,
    error::{AppError, AppResult},
    models::{Verification, VerificationStatus, Workproof},
    services::{ChallengeService, MembershipService, export},
    utils::{now_utc, sanitize_string, validation::required_text},
};

/// A rendered CSV export
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

/// Workproof service for business logic
pub struct WorkproofService;

impl WorkproofService {
    /// Submit proof of work against an open challenge
    pub async fn submit_workproof(
        pool: &PgPool,
        author: &str,
        challenge_id: &Uuid,
        description: &str,
        image_url: Option<&str>,
    ) -> AppResult<Workproof> {
        let description = required_text("Description", description).map_err(AppError::Validation)?;
        let image_urls: Vec<String> = image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .into_iter()
            .collect();

        let challenge = ChallengeService::find(pool, challenge_id).await?;
        MembershipService::require_member(pool, author, &challenge.room_id).await?;
        if !challenge.is_open() {
            return Err(AppError::Conflict("Challenge is closed".to_string()));
        }

        let workproof = WorkproofRepository::create(
            pool,
            author,
            &challenge.room_id,
            challenge_id,
            &description,
            &image_urls,
            challenge.weight,
        )
        .await?;

        info!(
            workproof_id = %workproof.id,
            challenge_id = %challenge_id,
            author = %author,
            "Workproof submitted"
        );
        Ok(workproof)
    }

    /// Workproofs of a challenge, newest first, optionally filtered by derived status
    pub async fn list_workproofs(
        pool: &PgPool,
        challenge_id: &Uuid,
        status: Option<VerificationStatus>,
    ) -> AppResult<Vec<Workproof>> {
        ChallengeService::find(pool, challenge_id).await?;
        let workproofs = WorkproofRepository::list_by_challenge(pool, challenge_id).await?;

        Ok(match status {
            Some(status) => workproofs.into_iter().filter(|w| w.status() == status).collect(),
            None => workproofs,
        })
    }

    pub async fn get_workproof(pool: &PgPool, id: &Uuid) -> AppResult<Workproof> {
        WorkproofRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workproof not found".to_string()))
    }

    /// Record a room member's vote on someone else's workproof
    pub async fn verify_workproof(
        pool: &PgPool,
        verifier: &str,
        id: &Uuid,
        accepted: bool,
        reason: Option<&str>,
    ) -> AppResult<Workproof> {
        let workproof = Self::get_workproof(pool, id).await?;
        MembershipService::require_member(pool, verifier, &workproof.room_id).await?;

        let vote = build_vote(&workproof, verifier, accepted, reason)?;

        // The statement refuses to overwrite an existing key, so a concurrent
        // second vote from the same verifier comes back empty
        let updated = WorkproofRepository::add_verification(pool, id, verifier, &vote)
            .await?
            .ok_or_else(|| AppError::AlreadyExists("Already voted on this workproof".to_string()))?;

        if accepted {
            info!(workproof_id = %id, verifier = %verifier, status = %updated.status(), "Workproof accepted");
        } else {
            warn!(workproof_id = %id, verifier = %verifier, status = %updated.status(), "Workproof rejected");
        }
        Ok(updated)
    }

    /// CSV of every workproof in a challenge, for room admins
    pub async fn export_csv(pool: &PgPool, actor: &str, challenge_id: &Uuid) -> AppResult<CsvExport> {
        let challenge = ChallengeService::find(pool, challenge_id).await?;
        MembershipService::require_admin(pool, actor, &challenge.room_id).await?;

        let workproofs = WorkproofRepository::list_by_challenge(pool, challenge_id).await?;
        info!(challenge_id = %challenge_id, rows = workproofs.len(), "Exporting workproofs");

        Ok(CsvExport {
            filename: export::csv_filename(challenge_id),
            body: export::workproofs_to_csv(&workproofs),
        })
    }
}

/// Check a vote against the workproof it targets and build the stored record
fn build_vote(
    workproof: &Workproof,
    verifier: &str,
    accepted: bool,
    reason: Option<&str>,
) -> AppResult<Verification> {
    if workproof.is_authored_by(verifier) {
        return Err(AppError::Validation(
            "Authors cannot verify their own workproof".to_string(),
        ));
    }
    if workproof.verifications.0.contains_key(verifier) {
        return Err(AppError::AlreadyExists(
            "Already voted on this workproof".to_string(),
        ));
    }

    let reason = reason.map(sanitize_string).filter(|r| !r.is_empty());

    Ok(Verification {
        accepted,
        reason,
        created_at: Some(now_utc()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    use crate::models::Verifications;

    fn workproof(author: &str, verifications: Verifications) -> Workproof {
        Workproof {
            id: Uuid::new_v4(),
            author: author.to_string(),
            room_id: Uuid::new_v4(),
            challenge_id: Uuid::new_v4(),
            description: "proof".into(),
            image_urls: vec![],
            weight: 3,
            verifications: Json(verifications),
            created_at: now_utc(),
        }
    }

    #[test]
    fn test_author_cannot_vote_on_own_work() {
        let w = workproof("alice", Verifications::new());
        assert!(matches!(
            build_vote(&w, "alice", true, None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejection_reason_is_optional() {
        let w = workproof("alice", Verifications::new());
        let vote = build_vote(&w, "bob", false, None).unwrap();
        assert!(!vote.accepted);
        assert_eq!(vote.reason, None);

        let vote = build_vote(&w, "bob", false, Some("   ")).unwrap();
        assert_eq!(vote.reason, None);

        let vote = build_vote(&w, "bob", false, Some(" off topic ")).unwrap();
        assert!(!vote.accepted);
        assert_eq!(vote.reason.as_deref(), Some("off topic"));
        assert!(vote.created_at.is_some());
    }

    #[test]
    fn test_acceptance_keeps_optional_note() {
        let w = workproof("alice", Verifications::new());
        let vote = build_vote(&w, "bob", true, None).unwrap();
        assert!(vote.accepted);
        assert_eq!(vote.reason, None);

        let vote = build_vote(&w, "bob", true, Some("great")).unwrap();
        assert_eq!(vote.reason.as_deref(), Some("great"));
    }

    #[test]
    fn test_second_vote_is_a_conflict() {
        let mut votes = Verifications::new();
        votes.insert("bob".into(), Verification::accept());
        let w = workproof("alice", votes);
        assert!(matches!(
            build_vote(&w, "bob", false, Some("changed my mind")),
            Err(AppError::AlreadyExists(_))
        ));
        assert!(build_vote(&w, "carol", true, None).is_ok());
    }
}
