//! Driving port for reading the pattern feed.

use async_trait::async_trait;

use crate::domain::{Error, Pattern};

/// Domain use-case port for the public feed.
#[async_trait]
pub trait PatternsQuery: Send + Sync {
    /// Newest patterns first, capped at the feed limit.
    async fn list_recent(&self) -> Result<Vec<Pattern>, Error>;
}
