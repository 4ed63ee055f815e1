//! Contact use-case service.
//!
//! Implements the contact driving ports on top of a [`ContactRepository`],
//! turning absent rows into `NotFound` and store failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{
    ContactPersistenceError, ContactRepository, ContactsCommand, ContactsQuery,
};
use crate::domain::{Contact, ContactDraft, ContactId, Error};

fn map_repository_error(error: ContactPersistenceError) -> Error {
    warn!(error = %error, "contact repository failure");
    match error {
        ContactPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("contact store unavailable: {message}"))
        }
        ContactPersistenceError::Query { message } => {
            Error::internal(format!("contact store error: {message}"))
        }
    }
}

fn contact_not_found(id: ContactId) -> Error {
    Error::not_found(format!("contact {id} not found"))
}

/// Contact service implementing [`ContactsCommand`] and [`ContactsQuery`].
#[derive(Clone)]
pub struct ContactService<R> {
    repository: Arc<R>,
}

impl<R> ContactService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ContactsCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn add(&self, draft: ContactDraft) -> Result<Contact, Error> {
        self.repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact, Error> {
        self.repository
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| contact_not_found(id))
    }

    async fn delete(&self, id: ContactId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(contact_not_found(id))
        }
    }
}

#[async_trait]
impl<R> ContactsQuery for ContactService<R>
where
    R: ContactRepository,
{
    async fn list(&self) -> Result<Vec<Contact>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: ContactId) -> Result<Contact, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| contact_not_found(id))
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
