//! Pattern feed handlers.
//!
//! ```text
//! GET    /patterns                 -> 200 [Pattern]
//! POST   /patterns                 -> 201 Pattern            (token)
//! POST   /patterns/{id}/likes      -> 200 Pattern            (token)
//! POST   /patterns/{id}/comments   -> 201 Pattern            (token)
//! DELETE /patterns/{id}            -> 200 {"success":true}   (token, owner only)
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{CommentBody, Error, Pattern, PatternDraft, PatternId, PatternValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, PatternSchema};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /patterns`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreatePatternRequest {
    #[serde(default)]
    #[schema(example = "Garter stitch scarf")]
    pub post: String,
    #[serde(default)]
    #[schema(example = "Knitting circle handbook")]
    pub source: String,
    #[serde(default)]
    pub needles: Option<f64>,
    #[serde(default)]
    pub yarn: Option<String>,
}

/// Request body for `POST /patterns/{id}/comments`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CommentRequest {
    #[serde(default)]
    #[schema(example = "Lovely drape!")]
    pub body: String,
}

/// Response body for a successful delete.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

fn map_pattern_validation_error(err: PatternValidationError) -> Error {
    let code = match &err {
        PatternValidationError::EmptyPost => "empty_post",
        PatternValidationError::PostTooLong { .. } => "post_too_long",
        PatternValidationError::EmptySource => "empty_source",
        PatternValidationError::InvalidNeedles { .. } => "invalid_needles",
        PatternValidationError::EmptyComment => "empty_comment",
        PatternValidationError::CommentTooLong { .. } => "comment_too_long",
    };
    let field = err.field();
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Newest patterns first, at most 24.
#[utoipa::path(
    get,
    path = "/patterns",
    responses(
        (status = 200, description = "Pattern feed", body = [PatternSchema]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["patterns"],
    operation_id = "listPatterns",
    security([])
)]
#[get("/patterns")]
pub async fn list_patterns(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Pattern>>> {
    let patterns = state.patterns_query.list_recent().await?;
    Ok(web::Json(patterns))
}

/// Publish a pattern owned by the caller.
#[utoipa::path(
    post,
    path = "/patterns",
    request_body = CreatePatternRequest,
    responses(
        (status = 201, description = "Pattern created", body = PatternSchema),
        (status = 400, description = "Invalid pattern", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema)
    ),
    tags = ["patterns"],
    operation_id = "createPattern"
)]
#[post("/patterns")]
pub async fn create_pattern(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreatePatternRequest>,
) -> ApiResult<HttpResponse> {
    let CreatePatternRequest {
        post,
        source,
        needles,
        yarn,
    } = payload.into_inner();
    let draft = PatternDraft::new(&post, &source, needles, yarn.as_deref())
        .map_err(map_pattern_validation_error)?;
    let pattern = state.patterns.create(user.identity(), draft).await?;
    Ok(HttpResponse::Created().json(pattern))
}

/// Add one like to a pattern.
#[utoipa::path(
    post,
    path = "/patterns/{id}/likes",
    params(("id" = Uuid, Path, description = "Pattern identifier")),
    responses(
        (status = 200, description = "Updated pattern", body = PatternSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 404, description = "Unknown pattern", body = ErrorSchema)
    ),
    tags = ["patterns"],
    operation_id = "likePattern"
)]
#[post("/patterns/{id}/likes")]
pub async fn like_pattern(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Pattern>> {
    let id = PatternId::from_uuid(path.into_inner());
    let pattern = state.patterns.like(id).await?;
    Ok(web::Json(pattern))
}

/// Append a comment to a pattern.
#[utoipa::path(
    post,
    path = "/patterns/{id}/comments",
    params(("id" = Uuid, Path, description = "Pattern identifier")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Updated pattern", body = PatternSchema),
        (status = 400, description = "Invalid comment", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 404, description = "Unknown pattern", body = ErrorSchema)
    ),
    tags = ["patterns"],
    operation_id = "commentOnPattern"
)]
#[post("/patterns/{id}/comments")]
pub async fn comment_on_pattern(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    payload: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let id = PatternId::from_uuid(path.into_inner());
    let body = CommentBody::new(&payload.body).map_err(map_pattern_validation_error)?;
    let pattern = state.patterns.comment(id, body).await?;
    Ok(HttpResponse::Created().json(pattern))
}

/// Delete a pattern owned by the caller.
#[utoipa::path(
    delete,
    path = "/patterns/{id}",
    params(("id" = Uuid, Path, description = "Pattern identifier")),
    responses(
        (status = 200, description = "Pattern deleted", body = DeleteResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 403, description = "Caller is not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown pattern", body = ErrorSchema)
    ),
    tags = ["patterns"],
    operation_id = "deletePattern"
)]
#[delete("/patterns/{id}")]
pub async fn delete_pattern(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<DeleteResponse>> {
    let id = PatternId::from_uuid(path.into_inner());
    state.patterns.delete(user.identity(), id).await?;
    Ok(web::Json(DeleteResponse { success: true }))
}
