//! In-memory pattern store.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{PatternPersistenceError, PatternRepository};
use crate::domain::{Comment, Pattern, PatternId, UserId};

use super::lock;

fn row_count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Pattern store kept in process memory, in insertion order.
#[derive(Default)]
pub struct InMemoryPatternRepository {
    rows: Mutex<Vec<Pattern>>,
}

impl InMemoryPatternRepository {
    fn update<F>(&self, id: &PatternId, apply: F) -> Option<Pattern>
    where
        F: FnOnce(&mut Pattern),
    {
        let mut rows = lock(&self.rows);
        let pattern = rows.iter_mut().find(|pattern| pattern.id == *id)?;
        apply(pattern);
        Some(pattern.clone())
    }
}

#[async_trait]
impl PatternRepository for InMemoryPatternRepository {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Pattern>, PatternPersistenceError> {
        let mut recent: Vec<Pattern> = lock(&self.rows).iter().rev().cloned().collect();
        // Stable sort: equal timestamps keep the latest insert first.
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(limit);
        Ok(recent)
    }

    async fn insert(&self, pattern: &Pattern) -> Result<(), PatternPersistenceError> {
        lock(&self.rows).push(pattern.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PatternId) -> Result<Option<Pattern>, PatternPersistenceError> {
        Ok(lock(&self.rows)
            .iter()
            .find(|pattern| pattern.id == *id)
            .cloned())
    }

    async fn add_like(&self, id: &PatternId) -> Result<Option<Pattern>, PatternPersistenceError> {
        Ok(self.update(id, |pattern| {
            pattern.likes = pattern.likes.saturating_add(1);
        }))
    }

    async fn add_comment(
        &self,
        id: &PatternId,
        comment: &Comment,
    ) -> Result<Option<Pattern>, PatternPersistenceError> {
        Ok(self.update(id, |pattern| pattern.comments.push(comment.clone())))
    }

    async fn delete_owned(
        &self,
        id: &PatternId,
        owner: &UserId,
    ) -> Result<bool, PatternPersistenceError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|pattern| !(pattern.id == *id && pattern.owner_id.as_ref() == Some(owner)));
        Ok(rows.len() < before)
    }

    async fn count(&self) -> Result<u64, PatternPersistenceError> {
        Ok(row_count(lock(&self.rows).len()))
    }

    async fn clear(&self) -> Result<u64, PatternPersistenceError> {
        let mut rows = lock(&self.rows);
        let removed = row_count(rows.len());
        rows.clear();
        Ok(removed)
    }
}
