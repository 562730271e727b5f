//! Bearer-token gate for protected handlers.
//!
//! Handlers that need a caller take an [`AuthenticatedUser`] argument. Actix
//! runs the extractor before the handler body, so an unauthenticated request
//! short-circuits with `401` and `loggedOut: true` and the handler never runs.
//! The token is the literal `Authorization` header value, without a scheme
//! prefix.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity};
use crate::inbound::http::state::HttpState;

/// Identity resolved from the request's access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(Identity);

impl AuthenticatedUser {
    /// Borrow the authenticated identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

/// Literal `Authorization` header contents, if present.
///
/// Values that are not visible ASCII can never match an issued token and
/// are reported as blank.
fn presented_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned).unwrap_or_default())
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let presented = presented_token(req);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            state
                .authenticator
                .authenticate(presented.as_deref())
                .await
                .map(Self)
        })
    }
}
