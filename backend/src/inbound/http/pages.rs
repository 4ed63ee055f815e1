//! Public pages outside the login gate.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get};

use super::session::SessionContext;
use super::views::{CvPage, render};
use crate::domain::{ApiResult, Error};

/// Static CV page.
#[get("/cv")]
pub async fn cv(session: SessionContext) -> ApiResult<HttpResponse> {
    render(
        StatusCode::OK,
        &CvPage {
            flashes: session.take_flashes(),
        },
    )
}

/// Fallback for unmatched paths and methods.
pub async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("no such page"))
}
