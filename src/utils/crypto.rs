//! Cryptographic utilities

use ed25519_dalek::{Signature, VerifyingKey};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a cryptographically secure random token
pub fn generate_secure_token(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hash a string using SHA-256
pub fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Reasons a wallet signature can fail to verify
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Invalid hex encoding")]
    InvalidHex,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Expected 64-byte signature, got {0}")]
    InvalidLength(usize),

    #[error("Signature does not match")]
    Mismatch,
}

/// Verify a hex Ed25519 signature over `message` by the hex public key `account`
pub fn verify_wallet_signature(
    account: &str,
    message: &[u8],
    signature_hex: &str,
) -> Result<(), SignatureError> {
    let key_bytes: [u8; 32] = hex::decode(account)
        .map_err(|_| SignatureError::InvalidHex)?
        .try_into()
        .map_err(|_| SignatureError::InvalidPublicKey)?;
    let verifying_key =
        VerifyingKey::from_bytes(&key_bytes).map_err(|_| SignatureError::InvalidPublicKey)?;

    let signature_hex = signature_hex.trim().trim_start_matches("0x");
    let sig_bytes = hex::decode(signature_hex).map_err(|_| SignatureError::InvalidHex)?;
    let sig_array: [u8; 64] = sig_bytes
        .as_slice()
        .try_into()
        .map_err(|_| SignatureError::InvalidLength(sig_bytes.len()))?;
    let signature = Signature::from_bytes(&sig_array);

    verifying_key
        .verify_strict(message, &signature)
        .map_err(|_| SignatureError::Mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn keypair(seed: u8) -> (SigningKey, String) {
        let signing = SigningKey::from_bytes(&[seed; 32]);
        let account = hex::encode(signing.verifying_key().as_bytes());
        (signing, account)
    }

    #[test]
    fn test_generate_secure_token() {
        let token1 = generate_secure_token(32);
        let token2 = generate_secure_token(32);

        assert_eq!(token1.len(), 32);
        assert_eq!(token2.len(), 32);
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_hash_string() {
        assert_eq!(hash_string("test"), hash_string("test"));
        assert_ne!(hash_string("test"), hash_string("different"));
    }

    #[test]
    fn test_valid_signature() {
        let (signing, account) = keypair(7);
        let signature = signing.sign(b"hello guild");
        let sig_hex = hex::encode(signature.to_bytes());

        assert_eq!(verify_wallet_signature(&account, b"hello guild", &sig_hex), Ok(()));
        assert_eq!(
            verify_wallet_signature(&account, b"hello guild", &format!("0x{}", sig_hex)),
            Ok(())
        );
    }

    #[test]
    fn test_signature_from_other_key_fails() {
        let (signing, _) = keypair(7);
        let (_, other_account) = keypair(9);
        let sig_hex = hex::encode(signing.sign(b"msg").to_bytes());

        assert_eq!(
            verify_wallet_signature(&other_account, b"msg", &sig_hex),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_tampered_message_fails() {
        let (signing, account) = keypair(3);
        let sig_hex = hex::encode(signing.sign(b"nonce-1").to_bytes());

        assert_eq!(
            verify_wallet_signature(&account, b"nonce-2", &sig_hex),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn test_malformed_inputs() {
        let (_, account) = keypair(1);
        assert_eq!(
            verify_wallet_signature(&account, b"m", "not-hex"),
            Err(SignatureError::InvalidHex)
        );
        assert_eq!(
            verify_wallet_signature(&account, b"m", "abcd"),
            Err(SignatureError::InvalidLength(2))
        );
        assert_eq!(
            verify_wallet_signature("abcd", b"m", &"00".repeat(64)),
            Err(SignatureError::InvalidPublicKey)
        );
    }
}
