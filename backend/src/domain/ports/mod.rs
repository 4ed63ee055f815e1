//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`ContactRepository`, `UserRepository`, `PasswordHasher`) are
//! implemented by outbound adapters. Driving ports (`LoginService`,
//! `IdentityQuery`, `ContactsCommand`, `ContactsQuery`) are implemented by
//! domain services and called from inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_repository;
mod contacts_command;
mod contacts_query;
mod identity_query;
mod login_service;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactPersistenceError, ContactRepository};
#[cfg(test)]
pub use contacts_command::MockContactsCommand;
pub use contacts_command::ContactsCommand;
#[cfg(test)]
pub use contacts_query::MockContactsQuery;
pub use contacts_query::ContactsQuery;
#[cfg(test)]
pub use identity_query::MockIdentityQuery;
pub use identity_query::IdentityQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
