//! Demo pattern seeding.
//!
//! Seeds a handful of ownerless patterns so a fresh deployment has a
//! non-empty feed. Seeded rows can be liked and commented on but never
//! deleted through the API.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{PatternPersistenceError, PatternRepository};
use crate::domain::{Pattern, PatternDraft, PatternId, PatternValidationError};

/// Built-in demo patterns as `(post, source, needles, yarn)`.
const DEMO_PATTERNS: &[(&str, &str, Option<f64>, Option<&str>)] = &[
    (
        "Garter stitch scarf for absolute beginners",
        "Knitting circle handbook",
        Some(5.0),
        Some("Chunky wool"),
    ),
    (
        "Seed stitch dishcloth",
        "Grandma's notebook",
        Some(4.0),
        Some("Cotton DK"),
    ),
    (
        "Top-down raglan cardigan",
        "Community workshop",
        Some(4.5),
        None,
    ),
    (
        "Fair isle mittens with a snowflake chart",
        "Winter club",
        Some(3.0),
        Some("Shetland fingering"),
    ),
];

/// Errors raised while seeding demo patterns.
#[derive(Debug, Error)]
pub enum PatternSeedingError {
    /// A built-in pattern failed validation.
    #[error("demo pattern failed validation: {0}")]
    Invalid(#[from] PatternValidationError),
    /// Persistence adapter failed while seeding.
    #[error("pattern seeding persistence error: {0}")]
    Persistence(#[from] PatternPersistenceError),
}

/// Outcome of [`PatternSeeder::ensure_seeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Rows removed by a reset.
    pub cleared: u64,
    /// Demo rows inserted.
    pub inserted: usize,
}

/// Inserts demo patterns into an empty store.
#[derive(Clone)]
pub struct PatternSeeder {
    patterns: Arc<dyn PatternRepository>,
    clock: Arc<dyn Clock>,
}

impl PatternSeeder {
    /// Create a seeder over `patterns`.
    pub fn new(patterns: Arc<dyn PatternRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { patterns, clock }
    }

    /// Optionally clear the store, then seed it if it holds no patterns.
    ///
    /// Running this twice without `reset` inserts nothing the second time.
    ///
    /// # Errors
    ///
    /// Returns [`PatternSeedingError`] if the store rejects a read or write.
    pub async fn ensure_seeded(&self, reset: bool) -> Result<SeedOutcome, PatternSeedingError> {
        let cleared = if reset {
            let removed = self.patterns.clear().await?;
            info!(removed, "pattern store reset");
            removed
        } else {
            0
        };

        if self.patterns.count().await? > 0 {
            info!(reason = "not empty", "pattern seeding skipped");
            return Ok(SeedOutcome {
                cleared,
                inserted: 0,
            });
        }

        let now = self.clock.utc();
        for (offset, (post, source, needles, yarn)) in (0_i64..).zip(DEMO_PATTERNS) {
            let draft = PatternDraft::new(post, source, *needles, *yarn)?;
            // Stagger timestamps so the feed order matches declaration order.
            let created_at = now - Duration::minutes(offset);
            let pattern = Pattern::from_draft(PatternId::random(), None, draft, created_at);
            self.patterns.insert(&pattern).await?;
        }
        info!(inserted = DEMO_PATTERNS.len(), "demo patterns seeded");
        Ok(SeedOutcome {
            cleared,
            inserted: DEMO_PATTERNS.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Seeding decisions over a mocked repository.
    use super::*;
    use crate::domain::ports::MockPatternRepository;
    use mockable::DefaultClock;
    use rstest::rstest;

    fn seeder(repo: MockPatternRepository) -> PatternSeeder {
        PatternSeeder::new(Arc::new(repo), Arc::new(DefaultClock))
    }

    #[rstest]
    #[tokio::test]
    async fn seeds_an_empty_store_with_ownerless_patterns() {
        let mut repo = MockPatternRepository::new();
        repo.expect_clear().never();
        repo.expect_count().returning(|| Ok(0));
        repo.expect_insert()
            .withf(|pattern: &Pattern| pattern.owner_id.is_none())
            .times(DEMO_PATTERNS.len())
            .returning(|_| Ok(()));

        let outcome = seeder(repo).ensure_seeded(false).await.expect("seeded");
        assert_eq!(
            outcome,
            SeedOutcome {
                cleared: 0,
                inserted: DEMO_PATTERNS.len()
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn skips_a_populated_store() {
        let mut repo = MockPatternRepository::new();
        repo.expect_count().returning(|| Ok(3));
        repo.expect_insert().never();

        let outcome = seeder(repo).ensure_seeded(false).await.expect("skipped");
        assert_eq!(outcome.inserted, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn reset_clears_before_seeding() {
        let mut sequence = mockall::Sequence::new();
        let mut repo = MockPatternRepository::new();
        repo.expect_clear()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|| Ok(7));
        repo.expect_count()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|| Ok(0));
        repo.expect_insert().returning(|_| Ok(()));

        let outcome = seeder(repo).ensure_seeded(true).await.expect("reseeded");
        assert_eq!(outcome.cleared, 7);
        assert_eq!(outcome.inserted, DEMO_PATTERNS.len());
    }

    #[rstest]
    #[tokio::test]
    async fn persistence_failures_are_reported() {
        let mut repo = MockPatternRepository::new();
        repo.expect_count()
            .returning(|| Err(PatternPersistenceError::connection("refused")));

        let err = seeder(repo).ensure_seeded(false).await.expect_err("fails");
        assert!(matches!(err, PatternSeedingError::Persistence(_)));
    }
}
