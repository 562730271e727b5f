//! Test helpers for inbound HTTP components.
//!
//! Handlers run against the real domain services over in-memory adapters,
//! with Argon2 tuned down so suites stay quick.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test, web};
use argon2::Params;
use rstest::fixture;

use crate::domain::ports::{PatternRepository, RegisteredUser};
use crate::domain::{
    AccountService, Pattern, PatternDraft, PatternId, PatternService, RegistrationCredentials,
    UserId,
};
use crate::inbound::http::{HealthState, HttpState, configure};
use crate::middleware::Trace;
use crate::outbound::crypto::{Argon2PasswordHasher, OsRngTokenIssuer};
use crate::outbound::memory::{InMemoryPatternRepository, InMemoryUserRepository};

/// Argon2 with the smallest parameters the crate accepts.
pub fn fast_hasher() -> Argon2PasswordHasher {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid argon2 params");
    Argon2PasswordHasher::with_params(params)
}

/// Handler state plus direct access to the pattern store.
pub struct TestContext {
    pub state: web::Data<HttpState>,
    pub patterns: Arc<InMemoryPatternRepository>,
}

impl TestContext {
    /// Register an account through the domain service.
    pub async fn register(&self, name: &str, password: &str) -> RegisteredUser {
        let credentials =
            RegistrationCredentials::try_from_parts(name, password).expect("valid credentials");
        self.state
            .registration
            .register(&credentials)
            .await
            .expect("registration succeeds")
    }

    /// Insert a pattern directly, bypassing the API.
    pub async fn insert_pattern(&self, owner: Option<UserId>) -> Pattern {
        let draft = PatternDraft::new("Moss stitch cowl", "Fixture", Some(4.0), None)
            .expect("valid draft");
        let pattern = Pattern::from_draft(PatternId::random(), owner, draft, chrono::Utc::now());
        self.patterns
            .insert(&pattern)
            .await
            .expect("fixture pattern stored");
        pattern
    }

    /// Send `request` through the fully configured application.
    pub async fn call(&self, request: test::TestRequest) -> ServiceResponse {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .app_data(self.state.clone())
                .app_data(web::Data::new(HealthState::new()))
                .configure(configure),
        )
        .await;
        test::call_service(&app, request.to_request()).await
    }
}

/// Fresh in-memory application state.
#[fixture]
pub fn test_context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::default());
    let patterns = Arc::new(InMemoryPatternRepository::default());
    let accounts = AccountService::new(
        users,
        Arc::new(fast_hasher()),
        Arc::new(OsRngTokenIssuer),
    );
    let pattern_service = PatternService::new(patterns.clone(), Arc::new(mockable::DefaultClock));
    TestContext {
        state: web::Data::new(HttpState::from_services(accounts, pattern_service)),
        patterns,
    }
}
