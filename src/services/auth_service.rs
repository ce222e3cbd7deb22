//! Authentication service
//!
//! Sign-in is a wallet challenge: the server hands out a one-time nonce, the
//! wallet signs a fixed message embedding it, and a valid signature is
//! exchanged for a JWT session plus a refresh token.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    constants::{AUTH_NONCE_LENGTH, SIGN_IN_DOMAIN},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::{generate_secure_token, hash_string, verify_wallet_signature},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Wallet account
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// A freshly issued sign-in challenge
#[derive(Debug, Clone)]
pub struct SignInChallenge {
    pub nonce: String,
    pub message: String,
    pub expires_in: u64,
}

/// Tokens handed out after a successful sign-in or refresh
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Issue a one-time nonce for `account` and the message its wallet must sign
    pub async fn issue_nonce(
        mut redis: ConnectionManager,
        config: &Config,
        account: &str,
    ) -> AppResult<SignInChallenge> {
        let nonce = generate_secure_token(AUTH_NONCE_LENGTH);
        let ttl = config.auth.nonce_ttl_secs;

        // A new request replaces any outstanding nonce for the account
        redis
            .set_ex::<_, _, ()>(nonce_key(account), &nonce, ttl)
            .await?;

        debug!(account = %account, ttl_secs = ttl, "Issued sign-in nonce");

        Ok(SignInChallenge {
            message: sign_in_message(account, &nonce),
            nonce,
            expires_in: ttl,
        })
    }

    /// Check a signed challenge and open a session
    pub async fn verify_signature(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        account: &str,
        signature: &str,
    ) -> AppResult<(User, SessionTokens)> {
        let nonce: Option<String> = redis.get(nonce_key(account)).await?;
        let nonce = nonce.ok_or(AppError::NonceExpired)?;

        // A bad signature leaves the nonce in place for the wallet's own attempt
        let message = sign_in_message(account, &nonce);
        if let Err(e) = verify_wallet_signature(account, message.as_bytes(), signature) {
            warn!(account = %account, error = %e, "Wallet signature rejected");
            return Err(AppError::InvalidSignature);
        }

        // One use only: of two concurrent sign-ins with the same nonce, one wins
        let consumed: Option<String> = redis.get_del(nonce_key(account)).await?;
        if consumed.as_deref() != Some(nonce.as_str()) {
            return Err(AppError::NonceExpired);
        }

        let user = UserRepository::ensure(pool, account).await?;
        let tokens = Self::open_session(&mut redis, config, account).await?;

        info!(account = %account, "Wallet signed in");
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a new session, rotating the refresh token
    pub async fn refresh_token(
        pool: &PgPool,
        mut redis: ConnectionManager,
        config: &Config,
        refresh_token: &str,
    ) -> AppResult<(User, SessionTokens)> {
        let token_hash = hash_string(refresh_token);
        let account: Option<String> = redis.get_del(refresh_key(&token_hash)).await?;
        let account = account.ok_or(AppError::InvalidToken)?;

        redis
            .srem::<_, _, ()>(sessions_key(&account), &token_hash)
            .await?;

        let user = UserRepository::find_by_account(pool, &account)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let tokens = Self::open_session(&mut redis, config, &account).await?;
        Ok((user, tokens))
    }

    /// Revoke one refresh token, or every session of the account
    pub async fn logout(
        mut redis: ConnectionManager,
        account: &str,
        refresh_token: Option<&str>,
        all_sessions: bool,
    ) -> AppResult<()> {
        if all_sessions {
            let hashes: Vec<String> = redis.smembers(sessions_key(account)).await?;
            for hash in &hashes {
                redis.del::<_, ()>(refresh_key(hash)).await?;
            }
            redis.del::<_, ()>(sessions_key(account)).await?;
            info!(account = %account, sessions = hashes.len(), "Revoked all sessions");
            return Ok(());
        }

        if let Some(token) = refresh_token {
            let hash = hash_string(token);
            // Only the owner may revoke a token
            let owner: Option<String> = redis.get(refresh_key(&hash)).await?;
            if owner.as_deref() == Some(account) {
                redis.del::<_, ()>(refresh_key(&hash)).await?;
                redis.srem::<_, _, ()>(sessions_key(account), &hash).await?;
            }
        }

        Ok(())
    }

    /// Get the profile of the signed-in account
    pub async fn get_user(pool: &PgPool, account: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_account(pool, account).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Generate access token
    pub fn generate_access_token(account: &str, config: &Config) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(config.jwt.expiry_hours);
        let expires_in = config.jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: account.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }

    async fn open_session(
        redis: &mut ConnectionManager,
        config: &Config,
        account: &str,
    ) -> AppResult<SessionTokens> {
        let (access_token, expires_in) = Self::generate_access_token(account, config)?;
        let refresh_token = generate_secure_token(48);

        // Only the hash is stored, mapped back to its account
        let token_hash = hash_string(&refresh_token);
        let expiry = (config.jwt.refresh_token_expiry_days * 24 * 60 * 60) as u64;
        redis
            .set_ex::<_, _, ()>(refresh_key(&token_hash), account, expiry)
            .await?;
        redis
            .sadd::<_, _, ()>(sessions_key(account), &token_hash)
            .await?;
        redis
            .expire::<_, ()>(sessions_key(account), expiry as i64)
            .await?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
            expires_in,
        })
    }
}

/// The exact text a wallet signs to prove control of `account`
pub fn sign_in_message(account: &str, nonce: &str) -> String {
    format!(
        "Sign in to {}\n\nAccount: {}\nNonce: {}",
        SIGN_IN_DOMAIN, account, nonce
    )
}

fn nonce_key(account: &str) -> String {
    format!("auth_nonce:{}", account)
}

fn refresh_key(token_hash: &str) -> String {
    format!("refresh_token:{}", token_hash)
}

fn sessions_key(account: &str) -> String {
    format!("sessions:{}", account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AuthConfig, DatabaseConfig, JwtConfig, LogFormat, RedisConfig, ServerConfig,
        StorageConfig,
    };

    fn config(expiry_hours: i64) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                rust_log: "info".into(),
                log_format: LogFormat::Pretty,
                public_url: "http://localhost:3000".into(),
                api_url: "http://localhost:8080".into(),
            },
            database: DatabaseConfig {
                url: "postgres://unused".into(),
                max_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://unused".into(),
            },
            jwt: JwtConfig {
                secret: "test-secret".into(),
                expiry_hours,
                refresh_token_expiry_days: 7,
            },
            auth: AuthConfig { nonce_ttl_secs: 300 },
            storage: StorageConfig {
                uploads_path: "/tmp".into(),
                max_upload_bytes: 1024,
            },
        }
    }

    #[test]
    fn test_sign_in_message_format() {
        assert_eq!(
            sign_in_message("ab12", "xyz"),
            "Sign in to Guildboard\n\nAccount: ab12\nNonce: xyz"
        );
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = config(1);
        let account = "cd".repeat(32);
        let (token, expires_in) = AuthService::generate_access_token(&account, &config).unwrap();
        assert_eq!(expires_in, 3600);

        let claims = AuthService::verify_token(&token, &config.jwt.secret).unwrap();
        assert_eq!(claims.sub, account);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_with_wrong_secret_is_invalid() {
        let config = config(1);
        let (token, _) = AuthService::generate_access_token("acct", &config).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, "other-secret"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_is_reported() {
        let config = config(-2);
        let (token, _) = AuthService::generate_access_token("acct", &config).unwrap();
        assert!(matches!(
            AuthService::verify_token(&token, &config.jwt.secret),
            Err(AppError::TokenExpired)
        ));
    }
}
