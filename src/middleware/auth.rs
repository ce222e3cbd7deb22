//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::AppError, services::AuthService, state::AppState};

/// Wallet account extracted from a verified JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub account: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl OptionalAuth {
    pub fn account(&self) -> Option<&str> {
        self.0.as_ref().map(|u| u.account.as_str())
    }
}

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Identity carried by the request's bearer token, if it is valid
fn caller(headers: &HeaderMap, secret: &str) -> Option<AuthenticatedUser> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)?;

    match AuthService::verify_token(token, secret) {
        Ok(claims) => Some(AuthenticatedUser {
            account: claims.sub,
        }),
        Err(e) => {
            debug!(error = ?e, "Ignoring unusable bearer token");
            None
        }
    }
}

/// Optional authentication middleware (doesn't fail on a missing or bad token)
///
/// Routes that need a caller ask for `AuthenticatedUser`, which fails with
/// 401 when nothing was attached. Public routes, including refresh, keep
/// working for a client still sending an expired access token.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(user) = caller(request.headers(), &state.config().jwt.secret) {
        debug!(path = %request.uri().path(), account = %user.account, "Caller authenticated");
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    use crate::services::auth_service::Claims;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer  "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }

    fn token(secret: &str, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "ab".repeat(32),
            exp: now + exp_offset_secs,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_valid_token_identifies_caller() {
        let headers = headers(&format!("Bearer {}", token("s3cret", 600)));
        let user = caller(&headers, "s3cret").unwrap();
        assert_eq!(user.account, "ab".repeat(32));
    }

    #[test]
    fn test_unusable_tokens_leave_request_anonymous() {
        let expired = headers(&format!("Bearer {}", token("s3cret", -7200)));
        assert!(caller(&expired, "s3cret").is_none());

        let forged = headers(&format!("Bearer {}", token("other", 600)));
        assert!(caller(&forged, "s3cret").is_none());

        assert!(caller(&headers("Bearer not-a-jwt"), "s3cret").is_none());
        assert!(caller(&HeaderMap::new(), "s3cret").is_none());
    }
}
