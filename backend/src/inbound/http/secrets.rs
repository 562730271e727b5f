//! Protected probe endpoint.
//!
//! `GET /secrets` answers only to a valid access token. Clients use it to
//! check whether a stored token is still good.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::schemas::ErrorSchema;

/// Message returned to every authenticated caller.
pub const SECRET_MESSAGE: &str = "This is a super secret message";

/// Response body for `GET /secrets`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretResponse {
    pub secret: String,
    pub user_id: String,
    pub name: String,
}

/// Return the protected payload for the authenticated caller.
#[utoipa::path(
    get,
    path = "/secrets",
    responses(
        (status = 200, description = "Token accepted", body = SecretResponse),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getSecret"
)]
#[get("/secrets")]
pub async fn secrets(user: AuthenticatedUser) -> web::Json<SecretResponse> {
    let identity = user.identity();
    web::Json(SecretResponse {
        secret: SECRET_MESSAGE.to_owned(),
        user_id: identity.id().to_string(),
        name: identity.name().to_string(),
    })
}
