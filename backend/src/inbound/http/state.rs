//! Shared HTTP adapter state.
//!
//! Handlers and the login gate receive this through `actix_web::web::Data`
//! so they depend only on domain ports and stay testable without I/O.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;

use crate::domain::ports::{ContactsCommand, ContactsQuery, IdentityQuery, LoginService};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Credential check used by `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Identity re-resolution used by the login gate.
    pub identity: Arc<dyn IdentityQuery>,
    /// Contact mutations.
    pub contacts: Arc<dyn ContactsCommand>,
    /// Contact reads.
    pub contacts_query: Arc<dyn ContactsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check used by `POST /login`.
    pub login: Arc<dyn LoginService>,
    /// Identity re-resolution used by the login gate.
    pub identity: Arc<dyn IdentityQuery>,
    /// Contact mutations.
    pub contacts: Arc<dyn ContactsCommand>,
    /// Contact reads.
    pub contacts_query: Arc<dyn ContactsQuery>,
    /// Source of "now" for session expiry.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Absolute lifetime granted at login.
    pub session_ttl: TimeDelta,
}

impl HttpState {
    /// Construct state from ports, a clock and the session lifetime.
    ///
    /// # Examples
    /// ```ignore
    /// let state = HttpState::new(ports, Arc::new(mockable::DefaultClock), TimeDelta::minutes(120));
    /// ```
    pub fn new(
        ports: HttpStatePorts,
        clock: Arc<dyn Clock + Send + Sync>,
        session_ttl: TimeDelta,
    ) -> Self {
        let HttpStatePorts {
            login,
            identity,
            contacts,
            contacts_query,
        } = ports;
        Self {
            login,
            identity,
            contacts,
            contacts_query,
            clock,
            session_ttl,
        }
    }
}
