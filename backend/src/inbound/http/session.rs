//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers deal in domain terms: the logged-in
//! user, the absolute expiry instant, and pending flash notices.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::flash::{FLASHES_KEY, FlashMessage};
use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const EXPIRES_AT_KEY: &str = "expires_at";

/// Identity read back from the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Authenticated user.
    pub user_id: UserId,
    /// Instant after which the identity is no longer honoured.
    pub expires_at: DateTime<Utc>,
}

impl SessionIdentity {
    /// Whether the identity is still valid at `now`.
    #[must_use]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start an authenticated session.
    ///
    /// The session is renewed first so a pre-login cookie cannot be reused
    /// after authentication.
    pub fn persist_login(&self, user_id: UserId, expires_at: DateTime<Utc>) -> Result<(), Error> {
        self.0.renew();
        self.insert(USER_ID_KEY, user_id)?;
        self.insert(EXPIRES_AT_KEY, expires_at)
    }

    /// Read the stored identity.
    ///
    /// Missing or unreadable values yield `None`; a tampered cookie is treated
    /// the same as no cookie.
    pub fn identity(&self) -> Option<SessionIdentity> {
        let user_id = self.read::<UserId>(USER_ID_KEY)?;
        let Some(expires_at) = self.read::<DateTime<Utc>>(EXPIRES_AT_KEY) else {
            warn!(user_id = %user_id, "session identity without expiry");
            return None;
        };
        Some(SessionIdentity {
            user_id,
            expires_at,
        })
    }

    /// Drop the identity but keep the rest of the session (pending notices).
    pub fn clear_identity(&self) {
        self.0.remove(USER_ID_KEY);
        self.0.remove(EXPIRES_AT_KEY);
    }

    /// Remove everything and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Queue a notice for the next rendered page.
    pub fn push_flash(&self, flash: FlashMessage) -> Result<(), Error> {
        let mut pending = self.read::<Vec<FlashMessage>>(FLASHES_KEY).unwrap_or_default();
        pending.push(flash);
        self.insert(FLASHES_KEY, pending)
    }

    /// Remove and return every pending notice.
    pub fn take_flashes(&self) -> Vec<FlashMessage> {
        let pending = self.read::<Vec<FlashMessage>>(FLASHES_KEY).unwrap_or_default();
        if !pending.is_empty() {
            self.0.remove(FLASHES_KEY);
        }
        pending
    }

    fn insert<T: serde::Serialize>(&self, key: &str, value: T) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.0.get::<T>(key) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, %error, "discarding unreadable session value");
                self.0.remove(key);
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::TimeDelta;

    #[actix_web::test]
    async fn round_trips_identity() {
        let expires_at = Utc::now() + TimeDelta::minutes(5);
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(move |session: SessionContext| async move {
                        session.persist_login(UserId::new(7), expires_at)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let identity = session.identity().map(|id| id.user_id.to_string());
                        HttpResponse::Ok().body(identity.unwrap_or_default())
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(get_res).await, "7");
    }

    #[actix_web::test]
    async fn tampered_user_id_reads_as_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-number")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        HttpResponse::Ok().body(format!("{}", session.identity().is_some()))
                    }),
                ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "false");
    }

    #[actix_web::test]
    async fn flashes_are_consumed_once() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/push",
                    web::get().to(|session: SessionContext| async move {
                        session.push_flash(FlashMessage::success("saved"))?;
                        session.push_flash(FlashMessage::info("hello"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/take",
                    web::get().to(|session: SessionContext| async move {
                        let texts: Vec<String> =
                            session.take_flashes().into_iter().map(|f| f.message).collect();
                        HttpResponse::Ok().body(texts.join(","))
                    }),
                ),
        )
        .await;

        let push_res =
            test::call_service(&app, test::TestRequest::get().uri("/push").to_request()).await;
        let cookie = session_cookie(&push_res).expect("session cookie set");

        let take_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let drained = session_cookie(&take_res).expect("session cookie rewritten");
        assert_eq!(test::read_body(take_res).await, "saved,hello");

        let again = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/take")
                .cookie(drained)
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(again).await, "");
    }
}

#[cfg(test)]
mod expiry_tests {
    use super::SessionIdentity;
    use crate::domain::UserId;
    use chrono::{TimeDelta, Utc};
    use rstest::rstest;

    #[rstest]
    #[case(TimeDelta::zero(), false)]
    #[case(TimeDelta::seconds(1), false)]
    #[case(TimeDelta::seconds(-1), true)]
    fn identity_expires_at_the_boundary(#[case] offset: TimeDelta, #[case] live: bool) {
        let expires_at = Utc::now();
        let identity = SessionIdentity {
            user_id: UserId::new(1),
            expires_at,
        };
        assert_eq!(identity.is_live_at(expires_at + offset), live);
    }
}
