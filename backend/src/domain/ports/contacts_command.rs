//! Driving port for contact mutations.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId, Error};

/// Contact create/update/delete use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Create a contact from a validated draft.
    async fn add(&self, draft: ContactDraft) -> Result<Contact, Error>;

    /// Overwrite an existing contact. Fails with `NotFound` when absent.
    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<Contact, Error>;

    /// Delete a contact. Fails with `NotFound` when absent.
    async fn delete(&self, id: ContactId) -> Result<(), Error>;
}
