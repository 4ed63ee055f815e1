//! Login gate for protected pages.
//!
//! Handlers that take an [`AuthenticatedUser`] only run for a live session
//! whose user still exists. Anything else clears the stale identity, queues
//! the "please log in" notice and redirects to the login page.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use super::flash::{FlashMessage, notices};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{Error, User, UserId};

/// The user behind the current request's session.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// Resolved user.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.0
    }

    /// Identifier of the resolved user.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.0.id()
    }
}

/// Resolve the session identity, re-checking expiry and the user store.
///
/// The store is consulted on every call so a deleted user loses access on
/// their next request.
pub async fn require_user(session: &SessionContext, state: &HttpState) -> Result<User, Error> {
    let Some(identity) = session.identity() else {
        return reject(session);
    };

    if !identity.is_live_at(state.clock.utc()) {
        debug!(user_id = %identity.user_id, "session expired");
        return reject(session);
    }

    match state.identity.find_user(identity.user_id).await? {
        Some(user) => Ok(user),
        None => {
            warn!(user_id = %identity.user_id, "session refers to a missing user");
            reject(session)
        }
    }
}

fn reject(session: &SessionContext) -> Result<User, Error> {
    session.clear_identity();
    session.push_flash(FlashMessage::info(notices::LOGIN_REQUIRED))?;
    Err(Error::unauthorized("login required"))
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let user = require_user(&session, &state).await?;
            Ok(Self(user))
        })
    }
}
