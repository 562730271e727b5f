//! Knitting patterns shared on the feed.
//!
//! A [`Pattern`] is the ownable resource of the system. Patterns created
//! through the API always carry an owner; seeded rows may not.

mod service;

pub use service::{PATTERN_FEED_LIMIT, PatternService};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Maximum length of a pattern description.
pub const PATTERN_POST_MAX: usize = 2_000;
/// Maximum length of a comment body.
pub const COMMENT_BODY_MAX: usize = 500;

/// Validation errors raised while building pattern inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternValidationError {
    EmptyPost,
    PostTooLong { max: usize },
    EmptySource,
    InvalidNeedles { value: f64 },
    EmptyComment,
    CommentTooLong { max: usize },
}

impl fmt::Display for PatternValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPost => write!(f, "post must not be empty"),
            Self::PostTooLong { max } => write!(f, "post must be at most {max} characters"),
            Self::EmptySource => write!(f, "source must not be empty"),
            Self::InvalidNeedles { value } => {
                write!(f, "needles must be a positive size, got {value}")
            }
            Self::EmptyComment => write!(f, "comment must not be empty"),
            Self::CommentTooLong { max } => {
                write!(f, "comment must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PatternValidationError {}

impl PatternValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPost | Self::PostTooLong { .. } => "post",
            Self::EmptySource => "source",
            Self::InvalidNeedles { .. } => "needles",
            Self::EmptyComment | Self::CommentTooLong { .. } => "body",
        }
    }
}

/// Stable pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(Uuid);

impl PatternId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated input for a new pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDraft {
    post: String,
    source: String,
    needles: Option<f64>,
    yarn: Option<String>,
}

impl PatternDraft {
    /// Validate raw pattern fields.
    ///
    /// Blank optional strings are normalised to `None`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PatternDraft;
    ///
    /// let draft = PatternDraft::new("Seed stitch scarf", "Grandma", Some(4.5), None).unwrap();
    /// assert_eq!(draft.post(), "Seed stitch scarf");
    /// assert!(PatternDraft::new("  ", "Grandma", None, None).is_err());
    /// ```
    pub fn new(
        post: &str,
        source: &str,
        needles: Option<f64>,
        yarn: Option<&str>,
    ) -> Result<Self, PatternValidationError> {
        let post = post.trim();
        if post.is_empty() {
            return Err(PatternValidationError::EmptyPost);
        }
        if post.chars().count() > PATTERN_POST_MAX {
            return Err(PatternValidationError::PostTooLong {
                max: PATTERN_POST_MAX,
            });
        }
        let source = source.trim();
        if source.is_empty() {
            return Err(PatternValidationError::EmptySource);
        }
        if let Some(value) = needles.filter(|size| !(size.is_finite() && *size > 0.0)) {
            return Err(PatternValidationError::InvalidNeedles { value });
        }
        let yarn = yarn
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        Ok(Self {
            post: post.to_owned(),
            source: source.to_owned(),
            needles,
            yarn,
        })
    }

    /// Pattern description.
    pub fn post(&self) -> &str {
        &self.post
    }

    /// Where the pattern comes from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Needle size in millimetres.
    pub fn needles(&self) -> Option<f64> {
        self.needles
    }

    /// Suggested yarn.
    pub fn yarn(&self) -> Option<&str> {
        self.yarn.as_deref()
    }
}

/// Validated comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    /// Validate a comment body.
    pub fn new(body: &str) -> Result<Self, PatternValidationError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(PatternValidationError::EmptyComment);
        }
        if body.chars().count() > COMMENT_BODY_MAX {
            return Err(PatternValidationError::CommentTooLong {
                max: COMMENT_BODY_MAX,
            });
        }
        Ok(Self(body.to_owned()))
    }
}

impl AsRef<str> for CommentBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A comment left on a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,
    pub date: DateTime<Utc>,
}

/// A knitting pattern on the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: PatternId,
    pub owner_id: Option<UserId>,
    pub post: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yarn: Option<String>,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    pub comments: Vec<Comment>,
}

impl Pattern {
    /// Build a freshly created pattern from a draft.
    pub fn from_draft(
        id: PatternId,
        owner_id: Option<UserId>,
        draft: PatternDraft,
        created_at: DateTime<Utc>,
    ) -> Self {
        let PatternDraft {
            post,
            source,
            needles,
            yarn,
        } = draft;
        Self {
            id,
            owner_id,
            post,
            source,
            needles,
            yarn,
            created_at,
            likes: 0,
            comments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for pattern input validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "src", None, PatternValidationError::EmptyPost)]
    #[case("post", " ", None, PatternValidationError::EmptySource)]
    #[case("post", "src", Some(0.0), PatternValidationError::InvalidNeedles { value: 0.0 })]
    #[case("post", "src", Some(-3.0), PatternValidationError::InvalidNeedles { value: -3.0 })]
    fn draft_rejects_invalid_fields(
        #[case] post: &str,
        #[case] source: &str,
        #[case] needles: Option<f64>,
        #[case] expected: PatternValidationError,
    ) {
        let err = PatternDraft::new(post, source, needles, None).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn draft_rejects_overlong_post() {
        let post = "k".repeat(PATTERN_POST_MAX + 1);
        let err = PatternDraft::new(&post, "src", None, None).expect_err("must fail");
        assert_eq!(err.field(), "post");
    }

    #[rstest]
    fn draft_normalises_blank_yarn() {
        let draft = PatternDraft::new("Cabled hat", "Book", Some(4.0), Some("   ")).expect("valid");
        assert_eq!(draft.yarn(), None);
        assert_eq!(draft.needles(), Some(4.0));
    }

    #[rstest]
    #[case("", PatternValidationError::EmptyComment)]
    #[case("   ", PatternValidationError::EmptyComment)]
    fn comment_rejects_blank_bodies(#[case] body: &str, #[case] expected: PatternValidationError) {
        assert_eq!(CommentBody::new(body).expect_err("must fail"), expected);
    }

    #[rstest]
    fn comment_length_is_capped_in_characters() {
        let longest = "é".repeat(COMMENT_BODY_MAX);
        assert_eq!(
            CommentBody::new(&longest).expect("at the limit").as_ref(),
            longest
        );

        let over = "x".repeat(COMMENT_BODY_MAX + 1);
        assert_eq!(
            CommentBody::new(&over).expect_err("over the limit"),
            PatternValidationError::CommentTooLong {
                max: COMMENT_BODY_MAX
            }
        );
    }

    #[rstest]
    fn new_patterns_start_without_likes_or_comments() {
        let draft = PatternDraft::new("Lace shawl", "Magazine", None, Some("Merino")).expect("valid");
        let pattern = Pattern::from_draft(PatternId::random(), None, draft, Utc::now());
        assert_eq!(pattern.likes, 0);
        assert!(pattern.comments.is_empty());
        assert_eq!(pattern.yarn.as_deref(), Some("Merino"));
    }

    #[rstest]
    fn pattern_serialises_camel_case() {
        let draft = PatternDraft::new("Lace shawl", "Magazine", None, None).expect("valid");
        let owner = UserId::random();
        let pattern = Pattern::from_draft(PatternId::random(), Some(owner), draft, Utc::now());
        let value = serde_json::to_value(&pattern).expect("serialise");
        assert_eq!(value["ownerId"], serde_json::json!(owner.to_string()));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("needles").is_none());
    }
}
