//! Truncated SHA-256 fingerprint of the session key.
//!
//! Logged at startup so operators can tell which key a node is using without
//! exposing the key material.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 of the key's signing half, hex encoded.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use contact_book::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let key = Key::generate();
/// let fp = key_fingerprint(&key);
///
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let signing_bytes = key.signing();
    let mut hasher = Sha256::new();
    hasher.update(signing_bytes);
    let result = hasher.finalize();
    hex::encode(&result[..FINGERPRINT_BYTES])
}
