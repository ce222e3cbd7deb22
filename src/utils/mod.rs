//! Utility functions

pub mod crypto;
pub mod format;
pub mod time;
pub mod validation;

pub use crypto::{generate_secure_token, hash_string, verify_wallet_signature};
pub use format::format_xp;
pub use time::{format_timestamp, now_utc};
pub use validation::{normalize_account, sanitize_string};
