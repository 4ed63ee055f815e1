//! Session-gated contact book.
//!
//! Hexagonal layout: [`domain`] holds entities, ports and services;
//! [`outbound`] implements the store and password hashing; [`inbound`] serves
//! the HTML pages; [`middleware`] tags every request with a trace id.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;
