//! Authentication and identity resolution over the user store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    IdentityQuery, LoginService, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, LoginCredentials, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid username or password";

fn map_user_error(error: UserPersistenceError) -> Error {
    warn!(error = %error, "user repository failure");
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::internal(format!("duplicate username during read: {username}"))
        }
    }
}

/// Service implementing [`LoginService`] and [`IdentityQuery`].
///
/// Unknown usernames and wrong passwords produce the same error so callers
/// cannot tell which part was wrong.
#[derive(Clone)]
pub struct CredentialsService<R> {
    users: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R> CredentialsService<R> {
    /// Create a service over a user repository and a password hasher.
    pub fn new(users: Arc<R>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Run the password check on the blocking pool; hashing must not stall
    /// the request worker.
    async fn verify_off_worker(
        &self,
        user: &User,
        credentials: &LoginCredentials,
    ) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let hash = user.password_hash().clone();
        let password = Zeroizing::new(credentials.password().to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&hash, password.as_str()))
            .await
            .map_err(|error| {
                warn!(error = %error, "password verification task failed");
                Error::internal("password verification failed")
            })
    }
}

#[async_trait]
impl<R> LoginService for CredentialsService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let username = credentials.username();
        let Some(user) = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
        else {
            info!(username = %username, "login rejected: unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if self.verify_off_worker(&user, credentials).await? {
            info!(username = %username, user_id = %user.id(), "login accepted");
            Ok(user.id())
        } else {
            info!(username = %username, "login rejected: wrong password");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[async_trait]
impl<R> IdentityQuery for CredentialsService<R>
where
    R: UserRepository,
{
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}
