//! OpenAPI documentation for the REST API.
//!
//! Registers every handler in `inbound::http`, the schema wrappers from
//! `inbound::http::schemas`, and the raw-token header security scheme. Swagger
//! UI serves the document in debug builds.

use crate::inbound::http::patterns::{CommentRequest, CreatePatternRequest, DeleteResponse};
use crate::inbound::http::schemas::{CommentSchema, ErrorCodeSchema, ErrorSchema, PatternSchema};
use crate::inbound::http::secrets::SecretResponse;
use crate::inbound::http::users::{CredentialsRequest, RegistrationResponse, SessionResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme referenced by authenticated operations.
pub const ACCESS_TOKEN_SCHEME: &str = "AccessToken";

/// Adds the `Authorization` header scheme carrying the bare access token.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            ACCESS_TOKEN_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Raw token returned by POST /users or POST /sessions, with no scheme prefix.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Knitting patterns API",
        description = "Accounts, token authentication and an owner-guarded pattern feed.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("AccessToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::sign_in,
        crate::inbound::http::secrets::secrets,
        crate::inbound::http::patterns::list_patterns,
        crate::inbound::http::patterns::create_pattern,
        crate::inbound::http::patterns::like_pattern,
        crate::inbound::http::patterns::comment_on_pattern,
        crate::inbound::http::patterns::delete_pattern,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        PatternSchema,
        CommentSchema,
        CredentialsRequest,
        RegistrationResponse,
        SessionResponse,
        SecretResponse,
        CreatePatternRequest,
        CommentRequest,
        DeleteResponse,
    )),
    tags(
        (name = "users", description = "Registration, sign-in and the secret probe"),
        (name = "patterns", description = "Pattern feed and owner-guarded mutations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Shape of the generated document.
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const PATTERN_SCHEMA_NAME: &str = "crate.domain.Pattern";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "loggedOut")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(PATTERN_SCHEMA_NAME, "ownerId")]
    #[case(PATTERN_SCHEMA_NAME, "comments")]
    fn schemas_expose_camel_case_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    #[case("/users")]
    #[case("/sessions")]
    #[case("/secrets")]
    #[case("/patterns")]
    #[case("/patterns/{id}")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn access_token_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key(ACCESS_TOKEN_SCHEME));
    }
}
