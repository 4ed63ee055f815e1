//! Domain primitives, ports and services.
//!
//! Purpose: define the contact book's entities and use-cases independently of
//! HTTP and storage. Inbound adapters talk to driving ports; outbound adapters
//! implement driven ports.
//!
//! Public surface:
//! - `Contact`, `ContactDraft`, `ContactId`: the managed record.
//! - `User`, `Username`, `HashedPassword`: authentication principals.
//! - `LoginCredentials`: validated login form input.
//! - `Error`, `ErrorCode`: transport-agnostic failure taxonomy.
//! - `ContactService`, `CredentialsService`, `UserSeeder`: use-case services.

pub mod auth;
pub mod contact;
pub mod contact_service;
pub mod credentials_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_seeding;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
pub use self::contact_service::ContactService;
pub use self::credentials_service::CredentialsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{HashedPassword, NewUser, User, UserId, UserValidationError, Username};
pub use self::user_seeding::{SeedOutcome, UserSeeder, UserSeedingError};

/// Convenient handler result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use contact_book::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("contact 3 not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
