//! Driven port for bearer token generation.

use crate::domain::AccessToken;

/// Source of unguessable bearer tokens.
///
/// Implementations must draw from a cryptographically secure generator.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a brand-new token.
    fn issue(&self) -> AccessToken;
}
