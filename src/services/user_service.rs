//! Profiles, rewards and leaderboards

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{UserRepository, WorkproofRepository},
    error::{AppError, AppResult},
    models::{User, VerificationStatus, Workproof},
    services::RoomService,
    utils::{format_xp, sanitize_string},
};

/// Reward summary for one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewards {
    pub submission_count: i64,
    pub verified_xp: i64,
    pub verified_xp_display: String,
}

impl Rewards {
    /// XP is the summed weight of verified workproofs only
    pub fn from_workproofs(workproofs: &[Workproof]) -> Self {
        let verified_xp = workproofs
            .iter()
            .filter(|w| w.status() == VerificationStatus::Verified)
            .map(|w| i64::from(w.weight))
            .sum();

        Self {
            submission_count: workproofs.len() as i64,
            verified_xp,
            verified_xp_display: format_xp(verified_xp),
        }
    }
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub account: String,
    pub name: Option<String>,
    pub submission_count: i64,
    pub verified_xp: i64,
}

/// Aggregate workproofs per author: XP desc, then submissions desc, then account
pub fn leaderboard(workproofs: &[Workproof]) -> Vec<LeaderboardEntry> {
    let mut by_author: HashMap<&str, LeaderboardEntry> = HashMap::new();

    for w in workproofs {
        let entry = by_author
            .entry(w.author.as_str())
            .or_insert_with(|| LeaderboardEntry {
                account: w.author.clone(),
                name: None,
                submission_count: 0,
                verified_xp: 0,
            });
        entry.submission_count += 1;
        if w.status() == VerificationStatus::Verified {
            entry.verified_xp += i64::from(w.weight);
        }
    }

    let mut entries: Vec<LeaderboardEntry> = by_author.into_values().collect();
    entries.sort_by(|a, b| {
        b.verified_xp
            .cmp(&a.verified_xp)
            .then(b.submission_count.cmp(&a.submission_count))
            .then_with(|| a.account.cmp(&b.account))
    });
    entries
}

/// User service for business logic
pub struct UserService;

impl UserService {
    pub async fn get_profile(pool: &PgPool, account: &str) -> AppResult<User> {
        UserRepository::find_by_account(pool, account)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Update the signed-in account's own profile. Unset fields are kept.
    pub async fn update_profile(
        pool: &PgPool,
        account: &str,
        name: Option<&str>,
        discord_handle: Option<&str>,
    ) -> AppResult<User> {
        let name = name.map(sanitize_string);
        let discord_handle = discord_handle.map(sanitize_string);

        let user =
            UserRepository::update_profile(pool, account, name.as_deref(), discord_handle.as_deref())
                .await?;

        info!(account = %account, "Profile updated");
        Ok(user)
    }

    pub async fn get_rewards(pool: &PgPool, account: &str) -> AppResult<Rewards> {
        let workproofs = WorkproofRepository::list_by_author(pool, account).await?;
        Ok(Rewards::from_workproofs(&workproofs))
    }

    /// Leaderboard of a room with profile names filled in
    pub async fn room_leaderboard(pool: &PgPool, room_id: &Uuid) -> AppResult<Vec<LeaderboardEntry>> {
        RoomService::ensure_exists(pool, room_id).await?;

        let workproofs = WorkproofRepository::list_by_room(pool, room_id).await?;
        let mut entries = leaderboard(&workproofs);

        let accounts: Vec<String> = entries.iter().map(|e| e.account.clone()).collect();
        let names: HashMap<String, Option<String>> =
            UserRepository::names_for(pool, &accounts).await?.into_iter().collect();
        for entry in &mut entries {
            entry.name = names.get(&entry.account).cloned().flatten();
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    use crate::models::{Verification, Verifications};
    use crate::utils::now_utc;

    fn workproof(author: &str, weight: i32, votes: &[(&str, Verification)]) -> Workproof {
        let verifications: Verifications = votes
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Workproof {
            id: Uuid::new_v4(),
            author: author.to_string(),
            room_id: Uuid::nil(),
            challenge_id: Uuid::nil(),
            description: "work".into(),
            image_urls: vec![],
            weight,
            verifications: Json(verifications),
            created_at: now_utc(),
        }
    }

    #[test]
    fn test_rewards_count_only_verified_weight() {
        let proofs = vec![
            workproof("a", 600, &[("admin", Verification::accept())]),
            workproof("a", 700, &[("admin", Verification::accept())]),
            workproof("a", 50, &[]),
            workproof(
                "a",
                900,
                &[("x", Verification::accept()), ("y", Verification::reject("no"))],
            ),
        ];
        let rewards = Rewards::from_workproofs(&proofs);
        assert_eq!(rewards.submission_count, 4);
        assert_eq!(rewards.verified_xp, 1300);
        assert_eq!(rewards.verified_xp_display, "1.3k");
    }

    #[test]
    fn test_rewards_for_no_work() {
        let rewards = Rewards::from_workproofs(&[]);
        assert_eq!(rewards.submission_count, 0);
        assert_eq!(rewards.verified_xp_display, "0");
    }

    #[test]
    fn test_leaderboard_ordering() {
        let ok = || Verification::accept();
        let proofs = vec![
            workproof("carol", 10, &[("z", ok())]),
            workproof("bob", 10, &[("z", ok())]),
            workproof("bob", 5, &[]),
            workproof("alice", 10, &[("z", ok())]),
            workproof("dave", 30, &[("z", ok())]),
        ];
        let board = leaderboard(&proofs);
        let order: Vec<&str> = board.iter().map(|e| e.account.as_str()).collect();
        assert_eq!(order, vec!["dave", "bob", "alice", "carol"]);
        assert_eq!(board[1].submission_count, 2);
        assert_eq!(board[1].verified_xp, 10);
    }
}
