//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, PatternsCommand, PatternsQuery, RegistrationService, TokenAuthenticator,
};
use crate::domain::{AccountService, PatternService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub authenticator: Arc<dyn TokenAuthenticator>,
    pub patterns_query: Arc<dyn PatternsQuery>,
    pub patterns: Arc<dyn PatternsCommand>,
}

impl HttpState {
    /// Wire every port from the two domain services.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{AccountService, PatternService};
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::crypto::{Argon2PasswordHasher, OsRngTokenIssuer};
    /// use backend::outbound::memory::{InMemoryPatternRepository, InMemoryUserRepository};
    ///
    /// let accounts = AccountService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     Arc::new(OsRngTokenIssuer),
    /// );
    /// let patterns = PatternService::new(
    ///     Arc::new(InMemoryPatternRepository::default()),
    ///     Arc::new(mockable::DefaultClock),
    /// );
    /// let state = HttpState::from_services(accounts, patterns);
    /// let _login = state.login.clone();
    /// ```
    pub fn from_services(accounts: AccountService, patterns: PatternService) -> Self {
        let accounts = Arc::new(accounts);
        let patterns = Arc::new(patterns);
        Self {
            registration: accounts.clone(),
            login: accounts.clone(),
            authenticator: accounts,
            patterns_query: patterns.clone(),
            patterns,
        }
    }
}
