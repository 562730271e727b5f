//! Adapter selection: PostgreSQL when a pool is configured, memory otherwise.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use backend::domain::ports::{PatternRepository, UserRepository};
use backend::domain::{AccountService, PatternSeeder, PatternService};
use backend::inbound::http::HttpState;
use backend::outbound::crypto::{Argon2PasswordHasher, OsRngTokenIssuer};
use backend::outbound::memory::{InMemoryPatternRepository, InMemoryUserRepository};
use backend::outbound::persistence::{DbPool, DieselPatternRepository, DieselUserRepository};

/// Handler state plus the seeder sharing its pattern store.
pub struct BuiltState {
    pub http_state: HttpState,
    pub seeder: PatternSeeder,
}

fn repositories(
    pool: Option<&DbPool>,
) -> (Arc<dyn UserRepository>, Arc<dyn PatternRepository>) {
    match pool {
        Some(pool) => (
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPatternRepository::new(pool.clone())),
        ),
        None => (
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(InMemoryPatternRepository::default()),
        ),
    }
}

/// Wire domain services over the selected adapters.
pub fn build_state(pool: Option<&DbPool>) -> BuiltState {
    let (users, patterns) = repositories(pool);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let accounts = AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::default()),
        Arc::new(OsRngTokenIssuer),
    );
    let pattern_service = PatternService::new(patterns.clone(), clock.clone());
    BuiltState {
        http_state: HttpState::from_services(accounts, pattern_service),
        seeder: PatternSeeder::new(patterns, clock),
    }
}
