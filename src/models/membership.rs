//! Membership model and role gate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::roles;

/// Membership database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Membership {
    pub account: String,
    pub room_id: Uuid,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(roles::ADMIN)
    }
}

/// A looked-up membership record counts as membership.
/// No record is the default stranger state, not an error.
pub fn is_member(membership: Option<&Membership>) -> bool {
    membership.is_some()
}

pub fn is_admin(membership: Option<&Membership>) -> bool {
    membership.is_some_and(Membership::is_admin)
}

/// Normalize a requested role list: trimmed, lowercase, deduplicated,
/// always containing `member`.
pub fn normalize_roles<I, S>(requested: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = vec![roles::MEMBER.to_string()];
    for role in requested {
        let role = role.as_ref().trim().to_lowercase();
        if !role.is_empty() && !out.contains(&role) {
            out.push(role);
        }
    }
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn membership(account: &str, roles: &[&str]) -> Membership {
        Membership {
            account: account.to_string(),
            room_id: Uuid::new_v4(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_plain_member_is_not_admin() {
        let m = membership("0xA", &["member"]);
        assert!(is_member(Some(&m)));
        assert!(!is_admin(Some(&m)));
    }

    #[test]
    fn test_admin_role() {
        let m = membership("0xA", &["member", "admin"]);
        assert!(is_member(Some(&m)));
        assert!(is_admin(Some(&m)));
    }

    #[test]
    fn test_stranger_has_no_rights() {
        assert!(!is_member(None));
        assert!(!is_admin(None));
    }

    #[test]
    fn test_admin_role_alone_still_counts() {
        let m = membership("0xA", &["admin"]);
        assert!(m.is_admin());
        assert!(!m.has_role("member"));
    }

    #[test]
    fn test_normalize_roles() {
        assert_eq!(normalize_roles(Vec::<String>::new()), vec!["member"]);
        assert_eq!(
            normalize_roles([" Admin ", "admin", "member", ""]),
            vec!["admin", "member"]
        );
    }
}
