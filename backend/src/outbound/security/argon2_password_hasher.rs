//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are PHC strings, so the parameters and salt travel with each hash
//! and verification keeps working after the cost settings change.

use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::domain::HashedPassword;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SALT_LEN: usize = 16;

/// Argon2id hasher with configurable cost parameters.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Build a hasher from explicit Argon2 cost parameters.
    #[must_use]
    pub fn new(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

fn random_salt() -> Result<SaltString, PasswordHashError> {
    let mut salt_bytes = [0_u8; SALT_LEN];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|err| PasswordHashError::hashing(format!("salt generation: {err}")))?;
    SaltString::encode_b64(&salt_bytes)
        .map_err(|err| PasswordHashError::hashing(format!("salt encoding: {err}")))
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<HashedPassword, PasswordHashError> {
        let salt = random_salt()?;
        let phc = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .to_string();
        HashedPassword::new(phc).map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, hash: &HashedPassword, plaintext: &str) -> bool {
        PasswordHash::new(hash.as_str()).is_ok_and(|parsed| {
            self.argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
    }
}
