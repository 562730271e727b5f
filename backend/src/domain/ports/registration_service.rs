//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, RegistrationCredentials, UserId};

/// Outcome of a successful sign-up.
///
/// This is the only place besides [`super::SignedIn`] where the bearer token
/// leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub id: UserId,
    pub token: AccessToken,
}

/// Domain use-case port for registration.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an identity, failing with `duplicate_name` when the name is
    /// already registered.
    async fn register(
        &self,
        credentials: &RegistrationCredentials,
    ) -> Result<RegisteredUser, Error>;
}
