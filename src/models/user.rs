//! User profile model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User database model, keyed by wallet account
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub account: String,
    pub name: Option<String>,
    pub discord_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name to show next to an avatar
    pub fn display_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => short_account(&self.account),
        }
    }
}

/// Shorten an account for display: first six and last four characters
pub fn short_account(account: &str) -> String {
    if account.len() <= 12 || !account.is_ascii() {
        return account.to_string();
    }
    format!("{}…{}", &account[..6], &account[account.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_account() {
        let mut user = User {
            account: "ab".repeat(32),
            name: None,
            discord_handle: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(user.display_name(), "ababab…abab");

        user.name = Some("Ada".into());
        assert_eq!(user.display_name(), "Ada");

        user.name = Some("   ".into());
        assert_eq!(user.display_name(), "ababab…abab");
    }

    #[test]
    fn test_short_account_leaves_short_values() {
        assert_eq!(short_account("0xA"), "0xA");
    }
}
