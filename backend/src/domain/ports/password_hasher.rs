//! Driven port for one-way password hashing.

use crate::domain::HashedPassword;

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password hash.
    pub enum PasswordHashError {
        /// The hashing backend rejected the input or parameters.
        Hashing { message } => "password hashing failed: {message}",
    }
}

/// Salted one-way hashing and verification of plaintext passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    fn hash(&self, plaintext: &str) -> Result<HashedPassword, PasswordHashError>;

    /// Check `plaintext` against a stored hash.
    ///
    /// Malformed hashes verify as `false`.
    fn verify(&self, hash: &HashedPassword, plaintext: &str) -> bool;
}
