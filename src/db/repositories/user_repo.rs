//! User repository

use sqlx::PgPool;

use crate::{error::AppResult, models::User};

/// Repository for user profile database operations
pub struct UserRepository;

impl UserRepository {
    /// Create the profile row on first sign-in; existing rows are left alone
    pub async fn ensure(pool: &PgPool, account: &str) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (account)
            VALUES ($1)
            ON CONFLICT (account) DO UPDATE SET account = EXCLUDED.account
            RETURNING *
            "#,
        )
        .bind(account)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by account
    pub async fn find_by_account(pool: &PgPool, account: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE account = $1"#)
            .bind(account)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Profile names for a batch of accounts
    pub async fn names_for(pool: &PgPool, accounts: &[String]) -> AppResult<Vec<(String, Option<String>)>> {
        let rows = sqlx::query_as::<_, (String, Option<String>)>(
            r#"SELECT account, name FROM users WHERE account = ANY($1)"#,
        )
        .bind(accounts)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Update profile fields; `None` keeps the stored value
    pub async fn update_profile(
        pool: &PgPool,
        account: &str,
        name: Option<&str>,
        discord_handle: Option<&str>,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (account, name, discord_handle)
            VALUES ($1, $2, $3)
            ON CONFLICT (account) DO UPDATE SET
                name = COALESCE($2, users.name),
                discord_handle = COALESCE($3, users.discord_handle),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(account)
        .bind(name)
        .bind(discord_handle)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
