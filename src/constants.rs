//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default public origin of the dashboard, used when building invite links
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Default public origin of this API, used when building upload URLs
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Default refresh token expiry in days
pub const DEFAULT_REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Default lifetime of a sign-in nonce in seconds
pub const DEFAULT_AUTH_NONCE_TTL_SECS: u64 = 300;

/// Length of the random sign-in nonce
pub const AUTH_NONCE_LENGTH: usize = 32;

/// Product name embedded in the message a wallet signs
pub const SIGN_IN_DOMAIN: &str = "Guildboard";

/// Length of a hex-encoded Ed25519 public key
pub const ACCOUNT_HEX_LENGTH: usize = 64;

// =============================================================================
// STORAGE DEFAULTS
// =============================================================================

/// Default upload directory
pub const DEFAULT_UPLOADS_PATH: &str = "/data/uploads";

/// Default maximum upload size (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image content types and the extension they are stored under
pub const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

// =============================================================================
// ROOM SETTINGS
// =============================================================================

/// Membership role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const MEMBER: &str = "member";
}

/// Challenge statuses
pub mod challenge_status {
    pub const OPEN: &str = "open";
    pub const CLOSED: &str = "closed";
}

/// Number of KPI widgets shown for a room
pub const KPI_SLOTS: u8 = 3;

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Upload endpoint - max requests
    pub const UPLOAD_MAX_REQUESTS: i64 = 10;
    /// Upload endpoint - window in seconds
    pub const UPLOAD_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 120;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}
