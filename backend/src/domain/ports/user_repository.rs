//! Credential store port: persistence of identities.
//!
//! Adapters must enforce name and token uniqueness atomically inside the
//! store; callers never pre-check for an existing name.

use async_trait::async_trait;

use crate::domain::{AccessToken, Identity, NewIdentity, UserName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// A record with the same name (or token) already exists.
        DuplicateName => "user already exists: {message}",
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new identity, failing with
    /// [`UserPersistenceError::DuplicateName`] when the name is taken.
    async fn create(&self, identity: &NewIdentity) -> Result<Identity, UserPersistenceError>;

    /// Fetch an identity by its unique name.
    async fn find_by_name(&self, name: &UserName) -> Result<Option<Identity>, UserPersistenceError>;

    /// Fetch the identity holding `token`.
    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Identity>, UserPersistenceError>;
}
