//! Contact entity and the drafts used to create or overwrite one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised when a new contact lacks required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// Name was missing or blank.
    #[error("contact name must not be blank")]
    MissingName,
    /// Phone was missing or blank.
    #[error("contact phone must not be blank")]
    MissingPhone,
}

/// Store-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i32);

impl ContactId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field values for a contact that has not been written yet.
///
/// Two constructors exist. [`ContactDraft::try_new`] enforces the presence
/// rules for new contacts. [`ContactDraft::overwrite`] accepts anything and
/// backs the edit form, which stores what it is given.
///
/// In both cases an empty email becomes `None`. Stored values are not
/// trimmed.
///
/// # Examples
/// ```
/// use contact_book::domain::{ContactDraft, ContactValidationError};
///
/// let draft = ContactDraft::try_new("Ada", "555-0100", "").unwrap();
/// assert_eq!(draft.email(), None);
///
/// let err = ContactDraft::try_new("Ada", "   ", "").unwrap_err();
/// assert_eq!(err, ContactValidationError::MissingPhone);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    name: String,
    phone: String,
    email: Option<String>,
}

impl ContactDraft {
    /// Validate the fields of a new contact.
    pub fn try_new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ContactValidationError> {
        let name = name.into();
        let phone = phone.into();
        if name.trim().is_empty() {
            return Err(ContactValidationError::MissingName);
        }
        if phone.trim().is_empty() {
            return Err(ContactValidationError::MissingPhone);
        }
        Ok(Self::overwrite(name, phone, email))
    }

    /// Build a draft without presence checks.
    #[must_use]
    pub fn overwrite(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let email = email.into();
        Self {
            name: name.into(),
            phone: phone.into(),
            email: (!email.is_empty()).then_some(email),
        }
    }

    /// Contact name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Optional email address.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    name: String,
    phone: String,
    email: Option<String>,
}

impl Contact {
    /// Assemble a contact from stored columns.
    #[must_use]
    pub fn new(id: ContactId, name: String, phone: String, email: Option<String>) -> Self {
        Self {
            id,
            name,
            phone,
            email,
        }
    }

    /// Store identifier.
    #[must_use]
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Contact name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Optional email address.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
