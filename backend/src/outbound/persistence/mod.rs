//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by a
//! single SQLite file through `diesel-async` and a `bb8` pool.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures map to the port
//!   error enums.
//!
//! # Example
//!
//! ```ignore
//! use contact_book::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! run_pending_migrations("db.sqlite").await?;
//! let pool = DbPool::new(PoolConfig::new("db.sqlite")).await?;
//! let repo = DieselContactRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_contact_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{CONNECTION_PRAGMAS, DbPool, PoolConfig, PoolError, SqliteAsyncConnection};
