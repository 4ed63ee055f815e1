//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use contact_book::inbound::http::state::HttpState;

/// Everything the server factory needs to build each worker's `App`.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and handler state.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        http_state: HttpState,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            http_state,
        }
    }
}
