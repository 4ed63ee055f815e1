//! Login and logout handlers.
//!
//! ```text
//! GET  /login    login form
//! POST /login    username=admin&password=admin123
//! GET  /logout   end the session
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;

use super::auth::AuthenticatedUser;
use super::flash::{FlashMessage, notices};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{LoginPage, LogoutPage, redirect, render};
use crate::domain::{ApiResult, Error, ErrorCode, LoginCredentials, UserId};

/// Login form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Submitted username.
    #[serde(default)]
    pub username: String,
    /// Submitted password.
    #[serde(default)]
    pub password: String,
}

/// Render the login form.
#[get("/login")]
pub async fn login_form(session: SessionContext) -> ApiResult<HttpResponse> {
    render(
        StatusCode::OK,
        &LoginPage {
            flashes: session.take_flashes(),
        },
    )
}

/// Verify credentials and start a session.
///
/// Rejected credentials re-render the form with a notice and leave the
/// session anonymous. Blank fields count as rejected credentials.
#[post("/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    match authenticate(&state, &form).await {
        Ok(user_id) => {
            let expires_at = state.clock.utc() + state.session_ttl;
            session.persist_login(user_id, expires_at)?;
            session.push_flash(FlashMessage::success(notices::LOGGED_IN))?;
            Ok(redirect("/"))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            let mut flashes = session.take_flashes();
            flashes.push(FlashMessage::danger(notices::INVALID_CREDENTIALS));
            render(StatusCode::OK, &LoginPage { flashes })
        }
        Err(err) => Err(err),
    }
}

async fn authenticate(state: &HttpState, form: &LoginForm) -> Result<UserId, Error> {
    let credentials = LoginCredentials::try_from_parts(&form.username, &form.password)
        .map_err(|err| Error::unauthorized(err.to_string()))?;
    state.login.authenticate(&credentials).await
}

/// End the session and confirm.
#[get("/logout")]
pub async fn logout(user: AuthenticatedUser, session: SessionContext) -> ApiResult<HttpResponse> {
    session.purge();
    info!(user_id = %user.id(), "logged out");
    render(
        StatusCode::OK,
        &LogoutPage {
            flashes: Vec::new(),
        },
    )
}
