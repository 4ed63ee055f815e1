//! HTTP inbound adapter serving the server-rendered contact book.

pub mod auth;
pub mod contacts;
pub mod error;
pub mod flash;
pub mod health;
pub mod login;
pub mod pages;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
