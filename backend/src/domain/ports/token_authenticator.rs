//! Driving port resolving a presented bearer token to an identity.

use async_trait::async_trait;

use crate::domain::{Error, Identity};

/// Stateless request gate.
///
/// Every request is authenticated on its own; nothing is cached between
/// calls and the identity is never mutated.
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Resolve the raw header value into an identity, failing with
    /// `unauthorized` when it is absent, malformed or unknown.
    async fn authenticate(&self, presented: Option<&str>) -> Result<Identity, Error>;
}
