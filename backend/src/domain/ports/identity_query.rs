//! Driving port that resolves a session identity back to a stored user.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Resolve the identifier held in a session.
///
/// Callers invoke this on every gated request; results are never cached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityQuery: Send + Sync {
    /// Return the user, or `None` when the identifier no longer resolves.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
