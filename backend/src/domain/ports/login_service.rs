//! Driving port for sign-in.
//!
//! Inbound adapters call it to exchange a name and password for the stored
//! bearer token without knowing which store or hasher sits behind it.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials, UserId};

/// Outcome of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user_id: UserId,
    pub token: AccessToken,
}

/// Domain use-case port for sign-in.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the caller's token.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error>;
}
