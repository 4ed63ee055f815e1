//! Port for contact persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDraft, ContactId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactPersistenceError {
        /// Repository connection could not be established.
        Connection { message } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "contact repository query failed: {message}",
    }
}

/// Port for reading and writing contact records.
///
/// Each mutation commits on its own. Absent rows are reported through
/// `Option`/`bool` rather than errors so services decide how to surface them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a new contact and return it with its assigned identifier.
    async fn insert(&self, draft: &ContactDraft) -> Result<Contact, ContactPersistenceError>;

    /// All contacts in ascending identifier order.
    async fn list(&self) -> Result<Vec<Contact>, ContactPersistenceError>;

    /// Fetch a contact by identifier.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ContactPersistenceError>;

    /// Overwrite every field of an existing contact.
    ///
    /// Returns `None` when no contact has the identifier.
    async fn update(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactPersistenceError>;

    /// Remove a contact. Returns `false` when nothing was deleted.
    async fn delete(&self, id: ContactId) -> Result<bool, ContactPersistenceError>;
}
