//! Rate limiting middleware
//!
//! Fixed-window counters in Redis, keyed by client IP and path bucket.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;
use tracing::warn;

use crate::{
    constants::{API_BASE_PATH, rate_limits},
    error::AppError,
    state::AppState,
};

/// Path bucket with its own request budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Auth,
    Uploads,
    General,
}

impl Bucket {
    /// Classify a request path
    pub fn for_path(path: &str) -> Self {
        let rest = path.strip_prefix(API_BASE_PATH).unwrap_or(path);
        if rest.starts_with("/auth") {
            Self::Auth
        } else if rest.starts_with("/uploads") {
            Self::Uploads
        } else {
            Self::General
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Uploads => "uploads",
            Self::General => "general",
        }
    }

    /// (max requests, window seconds)
    pub fn limit(&self) -> (i64, i64) {
        match self {
            Self::Auth => (rate_limits::AUTH_MAX_REQUESTS, rate_limits::AUTH_WINDOW_SECS),
            Self::Uploads => (rate_limits::UPLOAD_MAX_REQUESTS, rate_limits::UPLOAD_WINDOW_SECS),
            Self::General => (rate_limits::GENERAL_MAX_REQUESTS, rate_limits::GENERAL_WINDOW_SECS),
        }
    }
}

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let bucket = Bucket::for_path(request.uri().path());
    let (limit, window) = bucket.limit();
    let key = format!("rate_limit:{}:{}", addr.ip(), bucket.name());
    let mut redis = state.redis();

    // Fail open when Redis is unavailable
    let count: i64 = match redis.incr(&key, 1).await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Rate limiter unavailable");
            return Ok(next.run(request).await);
        }
    };

    if count == 1 {
        let _: Result<(), _> = redis.expire(&key, window).await;
    }

    if count > limit {
        warn!(ip = %addr.ip(), bucket = bucket.name(), count, "Rate limit exceeded");
        return Err(AppError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_classification() {
        assert_eq!(Bucket::for_path("/api/v1/auth/nonce"), Bucket::Auth);
        assert_eq!(Bucket::for_path("/api/v1/uploads"), Bucket::Uploads);
        assert_eq!(Bucket::for_path("/api/v1/uploads/abc.png"), Bucket::Uploads);
        assert_eq!(Bucket::for_path("/api/v1/rooms"), Bucket::General);
        assert_eq!(Bucket::for_path("/health"), Bucket::General);
    }

    #[test]
    fn test_auth_budget_is_tighter() {
        assert!(Bucket::Auth.limit().0 < Bucket::General.limit().0);
    }
}
