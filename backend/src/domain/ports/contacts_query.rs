//! Driving port for contact reads.

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, Error};

/// Contact read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Every contact in insertion order.
    async fn list(&self) -> Result<Vec<Contact>, Error>;

    /// A single contact. Fails with `NotFound` when absent.
    async fn get(&self, id: ContactId) -> Result<Contact, Error>;
}
