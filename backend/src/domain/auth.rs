//! Login credentials accepted by the authentication service.
//!
//! Handlers build these from raw form fields; blank input is rejected here so
//! the service never queries the store for an empty username.

use std::fmt;

use zeroize::Zeroizing;

use super::Username;

/// Domain error returned when login form values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace. The buffer
///   is zeroed on drop.
///
/// # Examples
/// ```
/// use contact_book::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "admin123").unwrap();
/// assert_eq!(creds.username().as_ref(), "admin");
/// assert_eq!(creds.password(), "admin123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(|_| LoginValidationError::EmptyUsername)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for store lookups.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
