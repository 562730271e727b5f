//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their serialised shape and are registered with
//! utoipa under the domain type's name.

#![expect(
    dead_code,
    reason = "Schema wrappers are only read by utoipa's derive output"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested name is already registered.
    #[schema(rename = "duplicate_name")]
    DuplicateName,
    /// The access token is missing or unknown.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "login required")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
    /// Present and `true` only on `401` responses.
    logged_out: Option<bool>,
}

/// OpenAPI schema for [`crate::domain::Comment`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Comment)]
pub struct CommentSchema {
    /// Comment text.
    #[schema(example = "Lovely drape!")]
    body: String,
    /// When the comment was posted.
    date: chrono::DateTime<chrono::Utc>,
}

/// OpenAPI schema for [`crate::domain::Pattern`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Pattern)]
#[schema(rename_all = "camelCase")]
pub struct PatternSchema {
    /// Pattern identifier.
    id: uuid::Uuid,
    /// Author; absent for seeded patterns.
    owner_id: Option<uuid::Uuid>,
    /// Pattern description.
    #[schema(example = "Garter stitch scarf")]
    post: String,
    /// Where the pattern comes from.
    #[schema(example = "Knitting circle handbook")]
    source: String,
    /// Needle size in millimetres.
    needles: Option<f64>,
    /// Suggested yarn.
    yarn: Option<String>,
    /// Creation time.
    created_at: chrono::DateTime<chrono::Utc>,
    /// Number of likes.
    likes: u32,
    /// Comments in posting order.
    comments: Vec<CommentSchema>,
}
