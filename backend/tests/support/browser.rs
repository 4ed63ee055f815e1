//! In-process browser that replays the session cookie between requests.

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Name of the cookie configured by the test app.
pub const SESSION_COOKIE: &str = "session";

/// Response summary used by assertions.
pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub trace_id: Option<String>,
    pub body: String,
}

/// Holds the current session cookie, like a browser would.
pub struct Browser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

impl<S, B> Browser<S>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    pub fn new(app: S) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> Page {
        self.send(test::TestRequest::get().uri(uri)).await
    }

    pub async fn post(&mut self, uri: &str, fields: &[(&str, &str)]) -> Page {
        self.send(test::TestRequest::post().uri(uri).set_form(fields))
            .await
    }

    /// Log in and assert the redirect to the contact list.
    pub async fn login(&mut self, username: &str, password: &str) {
        let page = self
            .post("/login", &[("username", username), ("password", password)])
            .await;
        assert_eq!(page.status, StatusCode::SEE_OTHER, "login should redirect");
        assert_eq!(page.location.as_deref(), Some("/"));
    }

    async fn send(&mut self, request: test::TestRequest) -> Page {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let response = test::call_service(&self.app, request.to_request()).await;

        if let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
        {
            self.cookie = (!cookie.value().is_empty()).then(|| cookie.into_owned());
        }

        let header_text = |name| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let status = response.status();
        let location = header_text(header::LOCATION);
        let trace_id = header_text(header::HeaderName::from_static("trace-id"));
        let body = test::read_body(response).await;

        Page {
            status,
            location,
            trace_id,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }
}

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct StepClock(Arc<Mutex<DateTime<Utc>>>);

impl StepClock {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Utc::now())))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.0.lock().expect("clock lock") += delta;
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}
