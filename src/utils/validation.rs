//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::ACCOUNT_HEX_LENGTH;

static BLOB_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{64}\.(png|jpg|gif|webp)$").expect("valid blob name regex")
});

static DISCORD_HANDLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.]{2,32}(#[0-9]{4})?$").expect("valid discord handle regex")
});

/// Normalize and validate a wallet account (hex Ed25519 public key)
pub fn normalize_account(account: &str) -> Result<String, &'static str> {
    let account = account.trim();
    let account = account
        .strip_prefix("0x")
        .or_else(|| account.strip_prefix("0X"))
        .unwrap_or(account)
        .to_ascii_lowercase();

    if account.len() != ACCOUNT_HEX_LENGTH {
        return Err("Account must be a 32-byte hex-encoded public key");
    }
    if !account.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Account must be hex encoded");
    }
    Ok(account)
}

/// `validator` adapter for account fields on request DTOs
pub fn validate_account(account: &str) -> Result<(), validator::ValidationError> {
    normalize_account(account)
        .map(|_| ())
        .map_err(|msg| validator::ValidationError::new("account").with_message(msg.into()))
}

/// `validator` adapter for the discord handle field
pub fn validate_discord_handle(handle: &str) -> Result<(), validator::ValidationError> {
    if handle.is_empty() || DISCORD_HANDLE.is_match(handle) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("discord_handle")
            .with_message("Invalid Discord handle".into()))
    }
}

/// Check a stored blob name before touching the filesystem
pub fn validate_blob_name(name: &str) -> Result<(), &'static str> {
    if BLOB_NAME.is_match(name) {
        Ok(())
    } else {
        Err("Invalid blob name")
    }
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitize and require a non-empty value
pub fn required_text(field: &str, input: &str) -> Result<String, String> {
    let sanitized = sanitize_string(input);
    if sanitized.is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29";

    #[test]
    fn test_normalize_account() {
        assert_eq!(normalize_account(KEY).unwrap(), KEY);
        assert_eq!(normalize_account(&KEY.to_uppercase()).unwrap(), KEY);
        assert_eq!(normalize_account(&format!(" 0x{} ", KEY)).unwrap(), KEY);
        assert!(normalize_account("0xA").is_err());
        assert!(normalize_account(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_validate_blob_name() {
        assert!(validate_blob_name(&format!("{}.png", KEY)).is_ok());
        assert!(validate_blob_name(&format!("{}.exe", KEY)).is_err());
        assert!(validate_blob_name("../secret.png").is_err());
    }

    #[test]
    fn test_validate_discord_handle() {
        assert!(validate_discord_handle("ada.lovelace").is_ok());
        assert!(validate_discord_handle("ada#1234").is_ok());
        assert!(validate_discord_handle("").is_ok());
        assert!(validate_discord_handle("a b").is_err());
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("Description", "  shipped it \n").unwrap(), "shipped it");
        assert_eq!(
            required_text("Description", " \u{7} ").unwrap_err(),
            "Description is required"
        );
    }
}
