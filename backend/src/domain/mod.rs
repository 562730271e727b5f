//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! layers, plus the use-case services that enforce credential and ownership
//! rules. Adapters talk to the domain only through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - Identity (alias to `user::Identity`): a registered account.
//! - Pattern (alias to `patterns::Pattern`): the ownable resource.
//! - AccountService / PatternService: driving-port implementations.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod ownership;
pub mod patterns;
pub mod ports;
pub mod seed;
pub mod trace_id;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError, RegistrationCredentials};
pub use self::error::{Error, ErrorCode};
pub use self::ownership::{Owned, OwnershipDenied, authorize_mutation};
pub use self::patterns::{
    COMMENT_BODY_MAX, Comment, CommentBody, PATTERN_FEED_LIMIT, PATTERN_POST_MAX, Pattern,
    PatternDraft, PatternId, PatternService, PatternValidationError,
};
pub use self::seed::{PatternSeeder, PatternSeedingError, SeedOutcome};
pub use self::trace_id::TraceId;
pub use self::user::{
    ACCESS_TOKEN_BYTES, ACCESS_TOKEN_LEN, AccessToken, Identity, NewIdentity, PASSWORD_MIN,
    Password, PasswordDigest, USER_NAME_MAX, USER_NAME_MIN, UserId, UserName,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
