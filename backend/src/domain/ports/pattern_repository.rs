//! Port abstraction for pattern persistence.
use async_trait::async_trait;

use crate::domain::{Comment, Pattern, PatternId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by pattern repository adapters.
    pub enum PatternPersistenceError {
        /// Repository connection could not be established.
        Connection => "pattern repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "pattern repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatternRepository: Send + Sync {
    /// Newest patterns first, at most `limit` of them.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Pattern>, PatternPersistenceError>;

    /// Persist a new pattern.
    async fn insert(&self, pattern: &Pattern) -> Result<(), PatternPersistenceError>;

    /// Fetch a pattern by identifier.
    async fn find_by_id(&self, id: &PatternId) -> Result<Option<Pattern>, PatternPersistenceError>;

    /// Increment the like counter, returning the updated pattern.
    async fn add_like(&self, id: &PatternId) -> Result<Option<Pattern>, PatternPersistenceError>;

    /// Append a comment, returning the updated pattern.
    async fn add_comment(
        &self,
        id: &PatternId,
        comment: &Comment,
    ) -> Result<Option<Pattern>, PatternPersistenceError>;

    /// Delete the pattern only if `owner` still owns it.
    ///
    /// Returns `false` when no row matched.
    async fn delete_owned(
        &self,
        id: &PatternId,
        owner: &UserId,
    ) -> Result<bool, PatternPersistenceError>;

    /// Number of stored patterns.
    async fn count(&self) -> Result<u64, PatternPersistenceError>;

    /// Remove every pattern, returning how many were deleted.
    async fn clear(&self) -> Result<u64, PatternPersistenceError>;
}
