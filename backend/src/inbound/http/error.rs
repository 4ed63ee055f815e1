//! HTTP adapter mapping for domain errors.
//!
//! Domain errors become HTML: `Unauthorized` redirects to the login page,
//! `NotFound` renders the dedicated 404 page, everything else renders the
//! generic error page. Internal messages never reach the client.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, ResponseError};
use askama::Template;
use tracing::error;

use super::views::{ErrorPage, NotFoundPage};
pub use crate::domain::ApiResult;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/login";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::SEE_OTHER,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(error: &Error) -> String {
    match error.code() {
        ErrorCode::InternalError => "Internal server error".to_owned(),
        ErrorCode::ServiceUnavailable => "The service is temporarily unavailable.".to_owned(),
        _ => error.message().to_owned(),
    }
}

fn html_body<T: Template>(builder: &mut HttpResponseBuilder, template: &T) -> HttpResponse {
    match template.render() {
        Ok(body) => builder.content_type(ContentType::html()).body(body),
        Err(err) => {
            error!(error = %err, "error page failed to render");
            builder
                .content_type(ContentType::plaintext())
                .body("Internal server error")
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = self.message(), "request failed");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        match self.code() {
            ErrorCode::Unauthorized => builder
                .insert_header((header::LOCATION, LOGIN_PATH))
                .finish(),
            ErrorCode::NotFound => html_body(
                &mut builder,
                &NotFoundPage {
                    flashes: Vec::new(),
                },
            ),
            _ => html_body(
                &mut builder,
                &ErrorPage {
                    flashes: Vec::new(),
                    status: status.as_u16(),
                    message: public_message(self),
                    trace_id: self.trace_id().unwrap_or_default().to_owned(),
                },
            ),
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

/// Rejection handler for unparsable path segments such as `/update/abc`.
pub fn path_error_handler(
    err: actix_web::error::PathError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::not_found(format!("no such page: {err}")).into()
}

/// Rejection handler for malformed form bodies.
pub fn form_error_handler(
    err: actix_web::error::UrlencodedError,
    _req: &HttpRequest,
) -> actix_web::Error {
    Error::invalid_request(format!("malformed form submission: {err}")).into()
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
