//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use super::session::SessionContext;
use super::state::{HttpState, HttpStatePorts};
use crate::domain::ports::{
    MockContactsCommand, MockContactsQuery, MockIdentityQuery, MockLoginService,
};
use crate::domain::{Error, HashedPassword, User, UserId, Username};

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Clock whose current instant tests can move forward.
#[derive(Debug, Clone)]
pub struct MutableClock(Arc<Mutex<DateTime<Utc>>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock() += delta;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

/// Stored user returned by identity doubles.
pub fn admin_user() -> User {
    User::new(
        UserId::new(1),
        Username::new("admin").expect("valid username"),
        HashedPassword::new("$argon2id$v=19$stub").expect("valid hash"),
    )
}

/// Identity double that resolves every session to [`admin_user`].
pub fn resolving_identity() -> MockIdentityQuery {
    let mut identity = MockIdentityQuery::new();
    identity
        .expect_find_user()
        .returning(|_| Ok(Some(admin_user())));
    identity
}

/// Test-only handler that logs the session in as [`admin_user`].
pub async fn seed_login(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> Result<HttpResponse, Error> {
    let expires_at = state.clock.utc() + state.session_ttl;
    session.persist_login(admin_user().id(), expires_at)?;
    Ok(HttpResponse::Ok().finish())
}

/// Port doubles assembled into an [`HttpState`].
pub struct MockPorts {
    /// Login double; no expectations by default.
    pub login: MockLoginService,
    /// Identity double; resolves every session by default.
    pub identity: MockIdentityQuery,
    /// Contact mutation double.
    pub contacts: MockContactsCommand,
    /// Contact read double.
    pub contacts_query: MockContactsQuery,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            login: MockLoginService::new(),
            identity: resolving_identity(),
            contacts: MockContactsCommand::new(),
            contacts_query: MockContactsQuery::new(),
        }
    }
}

impl MockPorts {
    /// Build state with the default session lifetime.
    pub fn into_state(self, clock: MutableClock) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                identity: Arc::new(self.identity),
                contacts: Arc::new(self.contacts),
                contacts_query: Arc::new(self.contacts_query),
            },
            Arc::new(clock),
            TimeDelta::minutes(120),
        )
    }
}
