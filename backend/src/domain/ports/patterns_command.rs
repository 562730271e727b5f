//! Driving port for pattern mutations.

use async_trait::async_trait;

use crate::domain::{CommentBody, Error, Identity, Pattern, PatternDraft, PatternId};

/// Domain use-case port for authenticated pattern mutations.
#[async_trait]
pub trait PatternsCommand: Send + Sync {
    /// Publish a pattern owned by `author`.
    async fn create(&self, author: &Identity, draft: PatternDraft) -> Result<Pattern, Error>;

    /// Add one like.
    async fn like(&self, id: PatternId) -> Result<Pattern, Error>;

    /// Append a comment.
    async fn comment(&self, id: PatternId, body: CommentBody) -> Result<Pattern, Error>;

    /// Delete a pattern owned by `caller`.
    ///
    /// Fails with `not_found` for unknown ids and `forbidden` when the caller
    /// is not the recorded owner. Nothing is removed unless ownership holds.
    async fn delete(&self, caller: &Identity, id: PatternId) -> Result<(), Error>;
}
