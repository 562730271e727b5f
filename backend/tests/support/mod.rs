//! Shared helpers for backend integration tests.
//!
//! Builds the full application over the in-memory adapters with Argon2 tuned
//! down to its minimum cost.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use argon2::Params;
use backend::Trace;
use backend::domain::{AccountService, PatternService};
use backend::inbound::http::{HealthState, HttpState, configure};
use backend::outbound::crypto::{Argon2PasswordHasher, OsRngTokenIssuer};
use backend::outbound::memory::{InMemoryPatternRepository, InMemoryUserRepository};

/// Fresh handler state over empty in-memory stores.
pub fn memory_state() -> web::Data<HttpState> {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
    let accounts = AccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(Argon2PasswordHasher::with_params(params)),
        Arc::new(OsRngTokenIssuer),
    );
    let patterns = PatternService::new(
        Arc::new(InMemoryPatternRepository::default()),
        Arc::new(mockable::DefaultClock),
    );
    web::Data::new(HttpState::from_services(accounts, patterns))
}

/// The application as the server assembles it, minus CORS and Swagger UI.
pub fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
}

/// `POST /users` for `name`.
pub fn registration(name: &str, password: &str) -> actix_web::test::TestRequest {
    actix_web::test::TestRequest::post()
        .uri("/users")
        .set_json(serde_json::json!({ "name": name, "password": password }))
}

/// Token from a successful registration response.
pub async fn issued_token(response: ServiceResponse) -> String {
    assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
    let body: serde_json::Value = actix_web::test::read_body_json(response).await;
    body["token"].as_str().expect("token").to_owned()
}
