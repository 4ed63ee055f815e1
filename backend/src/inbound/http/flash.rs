//! One-shot notices carried in the session until the next rendered page.

use serde::{Deserialize, Serialize};

/// Session key holding pending notices.
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// Completed action.
    Success,
    /// Rejected input or failed action.
    Danger,
    /// Neutral guidance such as a login prompt.
    Info,
}

impl FlashLevel {
    /// CSS class suffix used by the templates.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

/// A single pending notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Category.
    pub level: FlashLevel,
    /// Text shown to the user.
    pub message: String,
}

impl FlashMessage {
    /// Build a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Build a danger notice.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }

    /// Build an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    /// Category name for templates.
    #[must_use]
    pub fn category(&self) -> &'static str {
        self.level.as_str()
    }
}

/// Notice texts shown by the handlers.
pub mod notices {
    /// Add form submitted without a name or phone.
    pub const FIELDS_REQUIRED: &str = "All fields are required.";
    /// Contact created.
    pub const CONTACT_ADDED: &str = "Contact added successfully.";
    /// Contact overwritten.
    pub const CONTACT_UPDATED: &str = "Contact updated successfully.";
    /// Contact removed.
    pub const CONTACT_DELETED: &str = "Contact deleted successfully.";
    /// Login accepted.
    pub const LOGGED_IN: &str = "Logged in successfully.";
    /// Login rejected.
    pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
    /// Gated page requested without a session.
    pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";
}
