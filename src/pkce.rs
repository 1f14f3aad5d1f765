use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::TryRngCore as _;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::error::Error;

/// Unreserved characters allowed in a code verifier (RFC 7636 Section 4.1).
pub const UNRESERVED_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

pub const MIN_VERIFIER_LENGTH: usize = 43;
pub const MAX_VERIFIER_LENGTH: usize = 128;
pub const DEFAULT_VERIFIER_LENGTH: usize = 64;

/// Largest multiple of the charset size that fits in a byte. Bytes at or
/// above it are rejected so every character is equally likely.
const ACCEPT_BELOW: u8 = (256 / UNRESERVED_CHARSET.len() * UNRESERVED_CHARSET.len()) as u8;

/// Generate a code verifier of `length` characters from the unreserved set,
/// using the operating system's secure random source.
pub fn generate_verifier(length: usize) -> Result<String, Error> {
    if !(MIN_VERIFIER_LENGTH..=MAX_VERIFIER_LENGTH).contains(&length) {
        return Err(Error::InvalidVerifierLength { length });
    }

    let mut verifier = String::with_capacity(length);
    let mut buf = [0u8; MAX_VERIFIER_LENGTH];

    while verifier.len() < length {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| Error::SecureRandomUnavailable(e.to_string()))?;

        for &byte in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if verifier.len() == length {
                break;
            }
            let idx = byte as usize % UNRESERVED_CHARSET.len();
            verifier.push(UNRESERVED_CHARSET[idx] as char);
        }
    }

    Ok(verifier)
}

/// Derive the S256 code challenge: SHA-256 of the verifier's UTF-8 bytes,
/// base64url-encoded without padding.
pub fn derive_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}
