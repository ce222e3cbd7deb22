//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::User,
    services::user_service::{LeaderboardEntry, Rewards},
};

/// Public profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub account: String,
    pub name: Option<String>,
    pub display_name: String,
    pub discord_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name(),
            account: user.account,
            name: user.name,
            discord_handle: user.discord_handle,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Reward summary
#[derive(Debug, Serialize)]
pub struct RewardsResponse {
    pub account: String,
    pub submission_count: i64,
    pub verified_xp: i64,
    pub verified_xp_display: String,
}

impl RewardsResponse {
    pub fn new(account: String, rewards: Rewards) -> Self {
        Self {
            account,
            submission_count: rewards.submission_count,
            verified_xp: rewards.verified_xp,
            verified_xp_display: rewards.verified_xp_display,
        }
    }
}

/// Leaderboard row
#[derive(Debug, Serialize)]
pub struct LeaderboardEntryResponse {
    pub rank: usize,
    pub account: String,
    pub name: Option<String>,
    pub submission_count: i64,
    pub verified_xp: i64,
}

/// Room leaderboard
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntryResponse>,
}

impl From<Vec<LeaderboardEntry>> for LeaderboardResponse {
    fn from(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| LeaderboardEntryResponse {
                    rank: i + 1,
                    account: e.account,
                    name: e.name,
                    submission_count: e.submission_count,
                    verified_xp: e.verified_xp,
                })
                .collect(),
        }
    }
}
