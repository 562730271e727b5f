//! Credential value types for sign-up and sign-in.
//!
//! Inbound adapters build these from raw request strings, so handlers never
//! hand unvalidated input to a port.

use std::fmt;

use super::user::{Password, UserName, UserValidationError};

/// Domain error returned when sign-in payload values are blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Sign-in credentials.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - `password` is non-empty; whitespace is preserved.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "secret1").unwrap();
/// assert_eq!(creds.name(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    name: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(name: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyName);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            name: normalized.to_owned(),
            password: Password::unchecked(password),
        })
    }

    /// Name used for the identity lookup.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Password to verify against the stored digest.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated sign-up request: name of at least three characters and a
/// password of at least five.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationCredentials {
    name: UserName,
    password: Password,
}

impl RegistrationCredentials {
    /// Validate raw sign-up inputs.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::RegistrationCredentials;
    ///
    /// assert!(RegistrationCredentials::try_from_parts("alice", "secret1").is_ok());
    /// assert!(RegistrationCredentials::try_from_parts("alice", "abc").is_err());
    /// ```
    pub fn try_from_parts(name: &str, password: &str) -> Result<Self, UserValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            password: Password::new(password)?,
        })
    }

    /// Requested account name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &Password {
        &self.password
    }
}
