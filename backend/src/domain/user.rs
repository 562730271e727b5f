//! User identity model.
//!
//! An [`Identity`] is a registered account: a unique [`UserName`], an Argon2
//! [`PasswordDigest`] and the bearer [`AccessToken`] issued at sign-up. None
//! of the secret-bearing types implement `Serialize`, and their `Debug`
//! output is redacted.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors raised when building user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    PasswordTooShort { min: usize },
    MalformedToken,
    EmptyDigest,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::MalformedToken => write!(f, "access token is malformed"),
            Self::EmptyDigest => write!(f, "password digest must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimum allowed length for a user name.
pub const USER_NAME_MIN: usize = 3;
/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 64;

/// Unique, human-chosen account name.
///
/// Surrounding whitespace is trimmed; length is counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::UserName;
    ///
    /// assert!(UserName::new("alice").is_ok());
    /// assert!(UserName::new("al").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort {
                min: USER_NAME_MIN,
            });
        }
        if length > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum plaintext password length accepted at registration.
pub const PASSWORD_MIN: usize = 5;

/// Plaintext password, zeroised on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a plaintext password for registration.
    pub fn new(plaintext: &str) -> Result<Self, UserValidationError> {
        if plaintext.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self::unchecked(plaintext))
    }

    /// Wrap a plaintext password without length checks, for sign-in
    /// attempts where the stored digest is the only authority.
    pub fn unchecked(plaintext: &str) -> Self {
        Self(Zeroizing::new(plaintext.to_owned()))
    }

    /// Borrow the plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// One-way password digest in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by a [`crate::domain::ports::PasswordHasher`]
    /// or loaded from storage.
    pub fn new(digest: impl Into<String>) -> Result<Self, UserValidationError> {
        let digest = digest.into();
        if digest.trim().is_empty() {
            return Err(UserValidationError::EmptyDigest);
        }
        Ok(Self(digest))
    }

    /// Borrow the encoded digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Number of random bytes behind every access token.
pub const ACCESS_TOKEN_BYTES: usize = 128;
/// Length of the hex rendering of an access token.
pub const ACCESS_TOKEN_LEN: usize = ACCESS_TOKEN_BYTES * 2;

/// Opaque bearer credential rendered as lower-case hex.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Parse a token presented by a client or loaded from storage.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::AccessToken;
    ///
    /// assert!(AccessToken::parse("abc").is_err());
    /// assert!(AccessToken::parse(&"0f".repeat(128)).is_ok());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let well_formed = raw.len() == ACCESS_TOKEN_LEN
            && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(UserValidationError::MalformedToken);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Render freshly generated random bytes as a token.
    pub fn from_bytes(bytes: &[u8; ACCESS_TOKEN_BYTES]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Borrow the token text for transport or storage.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Identity record about to be persisted.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub id: UserId,
    pub name: UserName,
    pub password_digest: PasswordDigest,
    pub token: AccessToken,
}

/// Registered account.
///
/// ## Invariants
/// - `id` never changes once assigned.
/// - `token` is issued once at creation and never regenerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: UserId,
    name: UserName,
    password_digest: PasswordDigest,
    token: AccessToken,
}

impl Identity {
    /// Assemble an identity from validated parts.
    pub fn new(
        id: UserId,
        name: UserName,
        password_digest: PasswordDigest,
        token: AccessToken,
    ) -> Self {
        Self {
            id,
            name,
            password_digest,
            token,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique account name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Stored password digest.
    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Bearer token issued at registration.
    pub fn token(&self) -> &AccessToken {
        &self.token
    }
}

impl From<NewIdentity> for Identity {
    fn from(value: NewIdentity) -> Self {
        let NewIdentity {
            id,
            name,
            password_digest,
            token,
        } = value;
        Self::new(id, name, password_digest, token)
    }
}
