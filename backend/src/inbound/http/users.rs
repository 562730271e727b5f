//! Account handlers: sign-up and sign-in.
//!
//! ```text
//! POST /users    {"name":"alice","password":"secret1"}  -> 201 {"id":..,"token":..}
//! POST /sessions {"name":"alice","password":"secret1"}  -> 200 {"userId":..,"token":..}
//! ```
//!
//! These are the only responses that ever carry an access token.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, RegistrationCredentials, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Credentials body shared by sign-up and sign-in.
///
/// Missing fields deserialise as empty strings so they are reported by the
/// domain validators with field-level details.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[schema(example = "alice")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Response body for `POST /users`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegistrationResponse {
    pub id: String,
    pub token: String,
}

/// Response body for `POST /sessions`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub token: String,
}

fn validation_details(field: &str, code: &str) -> serde_json::Value {
    json!({ "field": field, "code": code })
}

fn map_registration_validation_error(err: UserValidationError) -> Error {
    let (field, code) = match &err {
        UserValidationError::EmptyName => ("name", "empty_name"),
        UserValidationError::NameTooShort { .. } => ("name", "name_too_short"),
        UserValidationError::NameTooLong { .. } => ("name", "name_too_long"),
        UserValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
        UserValidationError::InvalidId
        | UserValidationError::MalformedToken
        | UserValidationError::EmptyDigest => ("request", "invalid"),
    };
    Error::invalid_request(err.to_string()).with_details(validation_details(field, code))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match &err {
        LoginValidationError::EmptyName => ("name", "empty_name"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(validation_details(field, code))
}

/// Register a new account and return its access token.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = RegistrationResponse),
        (status = 400, description = "Invalid input or name already taken", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { name, password } = payload.into_inner();
    let credentials = RegistrationCredentials::try_from_parts(&name, &password)
        .map_err(map_registration_validation_error)?;
    let registered = state.registration.register(&credentials).await?;
    Ok(HttpResponse::Created().json(RegistrationResponse {
        id: registered.id.to_string(),
        token: registered.token.expose().to_owned(),
    }))
}

/// Exchange a name and password for the account's access token.
#[utoipa::path(
    post,
    path = "/sessions",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 400, description = "Invalid input or incorrect password", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signIn",
    security([])
)]
#[post("/sessions")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let CredentialsRequest { name, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&name, &password).map_err(map_login_validation_error)?;
    let signed_in = state.login.sign_in(&credentials).await?;
    Ok(web::Json(SessionResponse {
        user_id: signed_in.user_id.to_string(),
        token: signed_in.token.expose().to_owned(),
    }))
}
