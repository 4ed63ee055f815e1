//! Route table for the contact book.

use actix_web::web;

use super::error::{form_error_handler, path_error_handler};
use super::{contacts, health, login, pages};

/// Register every page, the probes and the extractor rejection handlers.
///
/// The caller supplies `web::Data<HttpState>`, `web::Data<HealthState>`, the
/// session middleware and `default_service(web::to(pages::not_found))`.
///
/// # Examples
/// ```ignore
/// App::new()
///     .app_data(state)
///     .configure(routes::configure)
///     .default_service(web::to(pages::not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::FormConfig::default().error_handler(form_error_handler))
        .service(contacts::index)
        .service(contacts::add)
        .service(contacts::edit_form)
        .service(contacts::update)
        .service(contacts::delete)
        .service(login::login_form)
        .service(login::login)
        .service(login::logout)
        .service(pages::cv)
        .service(health::ready)
        .service(health::live);
}
