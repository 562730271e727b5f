//! Pattern feed use-cases backed by a [`PatternRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ownership::authorize_mutation;
use crate::domain::ports::{
    PatternPersistenceError, PatternRepository, PatternsCommand, PatternsQuery,
};
use crate::domain::{Comment, CommentBody, Error, Identity, Pattern, PatternDraft, PatternId};

/// Number of patterns returned by the feed.
pub const PATTERN_FEED_LIMIT: usize = 24;

pub(crate) fn map_pattern_persistence_error(error: PatternPersistenceError) -> Error {
    match error {
        PatternPersistenceError::Connection { message } => Error::service_unavailable(message),
        PatternPersistenceError::Query { message } => Error::internal(message),
    }
}

fn pattern_not_found() -> Error {
    Error::not_found("pattern not found")
}

/// Feed queries and owner-aware mutations.
#[derive(Clone)]
pub struct PatternService {
    patterns: Arc<dyn PatternRepository>,
    clock: Arc<dyn Clock>,
}

impl PatternService {
    /// Create a service over `patterns`, stamping writes with `clock`.
    pub fn new(patterns: Arc<dyn PatternRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { patterns, clock }
    }
}

#[async_trait]
impl PatternsQuery for PatternService {
    async fn list_recent(&self) -> Result<Vec<Pattern>, Error> {
        self.patterns
            .list_recent(PATTERN_FEED_LIMIT)
            .await
            .map_err(map_pattern_persistence_error)
    }
}

#[async_trait]
impl PatternsCommand for PatternService {
    async fn create(&self, author: &Identity, draft: PatternDraft) -> Result<Pattern, Error> {
        let pattern = Pattern::from_draft(
            PatternId::random(),
            Some(*author.id()),
            draft,
            self.clock.utc(),
        );
        self.patterns
            .insert(&pattern)
            .await
            .map_err(map_pattern_persistence_error)?;
        info!(pattern_id = %pattern.id, owner_id = %author.id(), "pattern created");
        Ok(pattern)
    }

    async fn like(&self, id: PatternId) -> Result<Pattern, Error> {
        self.patterns
            .add_like(&id)
            .await
            .map_err(map_pattern_persistence_error)?
            .ok_or_else(pattern_not_found)
    }

    async fn comment(&self, id: PatternId, body: CommentBody) -> Result<Pattern, Error> {
        let comment = Comment {
            body: body.as_ref().to_owned(),
            date: self.clock.utc(),
        };
        self.patterns
            .add_comment(&id, &comment)
            .await
            .map_err(map_pattern_persistence_error)?
            .ok_or_else(pattern_not_found)
    }

    async fn delete(&self, caller: &Identity, id: PatternId) -> Result<(), Error> {
        let existing = self
            .patterns
            .find_by_id(&id)
            .await
            .map_err(map_pattern_persistence_error)?;
        authorize_mutation(caller, existing.as_ref())?;

        // Scoped to the owner so a concurrent ownership change cannot slip through.
        let removed = self
            .patterns
            .delete_owned(&id, caller.id())
            .await
            .map_err(map_pattern_persistence_error)?;
        if !removed {
            return Err(pattern_not_found());
        }
        info!(pattern_id = %id, owner_id = %caller.id(), "pattern deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Pattern service behaviour over a mocked repository.
    use super::*;
    use crate::domain::ports::MockPatternRepository;
    use crate::domain::{AccessToken, ErrorCode, PasswordDigest, UserId, UserName};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixture_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn identity(name: &str) -> Identity {
        Identity::new(
            UserId::random(),
            UserName::new(name).expect("valid name"),
            PasswordDigest::new("digest").expect("digest"),
            AccessToken::from_bytes(&[3; 128]),
        )
    }

    fn service(repo: MockPatternRepository) -> PatternService {
        PatternService::new(Arc::new(repo), Arc::new(FixtureClock(fixture_timestamp())))
    }

    fn pattern_owned_by(owner: Option<UserId>) -> Pattern {
        let draft = PatternDraft::new("Brioche cowl", "Workshop", Some(5.0), None).expect("draft");
        Pattern::from_draft(PatternId::random(), owner, draft, fixture_timestamp())
    }

    #[fixture]
    fn alice() -> Identity {
        identity("alice")
    }

    #[rstest]
    #[tokio::test]
    async fn feed_requests_the_configured_limit() {
        let mut repo = MockPatternRepository::new();
        repo.expect_list_recent()
            .withf(|limit| *limit == PATTERN_FEED_LIMIT)
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let feed = service(repo).list_recent().await.expect("feed");
        assert!(feed.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn create_records_author_and_clock(alice: Identity) {
        let owner = *alice.id();
        let mut repo = MockPatternRepository::new();
        repo.expect_insert()
            .withf(move |pattern: &Pattern| {
                pattern.owner_id == Some(owner) && pattern.created_at == fixture_timestamp()
            })
            .times(1)
            .returning(|_| Ok(()));

        let draft = PatternDraft::new("Fair isle mittens", "Club", None, None).expect("draft");
        let created = service(repo).create(&alice, draft).await.expect("created");
        assert_eq!(created.likes, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn like_of_unknown_pattern_is_not_found() {
        let mut repo = MockPatternRepository::new();
        repo.expect_add_like().returning(|_| Ok(None));

        let err = service(repo)
            .like(PatternId::random())
            .await
            .expect_err("unknown pattern");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn comment_is_stamped_with_the_clock() {
        let stored = pattern_owned_by(None);
        let mut repo = MockPatternRepository::new();
        repo.expect_add_comment()
            .withf(|_, comment: &Comment| {
                comment.body == "Lovely" && comment.date == fixture_timestamp()
            })
            .returning(move |_, comment| {
                let mut updated = stored.clone();
                updated.comments.push(comment.clone());
                Ok(Some(updated))
            });

        let body = CommentBody::new("  Lovely ").expect("body");
        let updated = service(repo)
            .comment(PatternId::random(), body)
            .await
            .expect("commented");
        assert_eq!(updated.comments.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn owner_can_delete(alice: Identity) {
        let pattern = pattern_owned_by(Some(*alice.id()));
        let mut repo = MockPatternRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(pattern.clone())));
        repo.expect_delete_owned().times(1).returning(|_, _| Ok(true));

        service(repo)
            .delete(&alice, PatternId::random())
            .await
            .expect("owner deletes");
    }

    #[rstest]
    #[case(Some(UserId::random()))]
    #[case(None)]
    #[tokio::test]
    async fn non_owner_delete_is_forbidden_and_removes_nothing(
        alice: Identity,
        #[case] owner: Option<UserId>,
    ) {
        let pattern = pattern_owned_by(owner);
        let mut repo = MockPatternRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(pattern.clone())));
        repo.expect_delete_owned().never();

        let err = service(repo)
            .delete(&alice, PatternId::random())
            .await
            .expect_err("must be forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_unknown_pattern_is_not_found(alice: Identity) {
        let mut repo = MockPatternRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete_owned().never();

        let err = service(repo)
            .delete(&alice, PatternId::random())
            .await
            .expect_err("must be missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_losing_a_race_reports_not_found(alice: Identity) {
        let pattern = pattern_owned_by(Some(*alice.id()));
        let mut repo = MockPatternRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(pattern.clone())));
        repo.expect_delete_owned().returning(|_, _| Ok(false));

        let err = service(repo)
            .delete(&alice, PatternId::random())
            .await
            .expect_err("row vanished");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_unavailable() {
        let mut repo = MockPatternRepository::new();
        repo.expect_list_recent()
            .returning(|_| Err(PatternPersistenceError::connection("pool timed out")));

        let err = service(repo).list_recent().await.expect_err("outage");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
