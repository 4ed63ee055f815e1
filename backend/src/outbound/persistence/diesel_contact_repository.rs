//! SQLite-backed `ContactRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ContactPersistenceError, ContactRepository};
use crate::domain::{Contact, ContactDraft, ContactId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ContactChanges, ContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the contact repository port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactPersistenceError {
    map_basic_pool_error(error, ContactPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ContactPersistenceError {
    map_basic_diesel_error(
        error,
        ContactPersistenceError::query,
        ContactPersistenceError::connection,
    )
}

fn changes_from(draft: &ContactDraft) -> ContactChanges<'_> {
    ContactChanges {
        name: draft.name(),
        phone: draft.phone(),
        email: draft.email(),
    }
}

fn row_to_contact(row: ContactRow) -> Contact {
    Contact::new(ContactId::new(row.id), row.name, row.phone, row.email)
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(contacts::table)
            .values(changes_from(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_contact)
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<Contact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .order(contacts::id.asc())
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_contact).collect())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        contacts::table
            .find(id.get())
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_contact))
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(contacts::table.find(id.get()))
            .set(changes_from(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(row_to_contact))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: ContactId) -> Result<bool, ContactPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(contacts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}
