//! Diesel row structs. Internal to the persistence adapters.

use diesel::prelude::*;

use super::schema::{contacts, users};

/// Row read from `contacts`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ContactRow {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// Column values written on insert and on overwrite.
///
/// `treat_none_as_null` makes an update clear a previously stored email.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactChanges<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
}

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Insertable user row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}
