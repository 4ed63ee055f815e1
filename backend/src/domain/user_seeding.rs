//! Startup seeding of the administrator account.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::{NewUser, UserId, Username};

/// Result of an admin seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The user did not exist and was inserted.
    Created(UserId),
    /// A user with the username already existed; nothing changed.
    AlreadyPresent(UserId),
}

/// Errors raised while seeding the admin user.
#[derive(Debug, Error)]
pub enum UserSeedingError {
    /// Password hashing failed.
    #[error("admin password hashing failed: {0}")]
    Hashing(#[from] PasswordHashError),
    /// The user store rejected the lookup or insert.
    #[error("admin user persistence failed: {0}")]
    Persistence(#[from] UserPersistenceError),
}

/// Ensures a single seed user exists.
pub struct UserSeeder<R> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R> UserSeeder<R>
where
    R: UserRepository,
{
    /// Create a seeder over a user repository and a password hasher.
    pub fn new(users: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Insert `username` with `password` unless it is already present.
    ///
    /// The existing user's password is never changed.
    ///
    /// # Errors
    ///
    /// Returns [`UserSeedingError`] when hashing or persistence fails.
    pub async fn ensure_user(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<SeedOutcome, UserSeedingError> {
        if let Some(existing) = self.users.find_by_username(username).await? {
            info!(username = %username, "seed user already present");
            return Ok(SeedOutcome::AlreadyPresent(existing.id()));
        }

        let password_hash = self.hasher.hash(password)?;
        let new_user = NewUser {
            username: username.clone(),
            password_hash,
        };
        match self.users.insert(&new_user).await {
            Ok(user) => {
                info!(username = %username, user_id = %user.id(), "seed user created");
                Ok(SeedOutcome::Created(user.id()))
            }
            // Another process inserted the user between lookup and insert.
            Err(UserPersistenceError::DuplicateUsername { .. }) => {
                let existing = self.users.find_by_username(username).await?.ok_or_else(|| {
                    UserPersistenceError::query("seed user vanished after duplicate insert")
                })?;
                Ok(SeedOutcome::AlreadyPresent(existing.id()))
            }
            Err(other) => Err(other.into()),
        }
    }
}
