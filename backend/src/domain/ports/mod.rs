//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`, `*Query`, `*Command`, `TokenAuthenticator`) are
//! called by inbound adapters; driven ports (`*Repository`, `PasswordHasher`,
//! `TokenIssuer`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod pattern_repository;
mod patterns_command;
mod patterns_query;
mod registration_service;
mod token_authenticator;
mod token_issuer;
mod user_repository;

pub use login_service::{LoginService, SignedIn};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use pattern_repository::MockPatternRepository;
pub use pattern_repository::{PatternPersistenceError, PatternRepository};
pub use patterns_command::PatternsCommand;
pub use patterns_query::PatternsQuery;
pub use registration_service::{RegisteredUser, RegistrationService};
pub use token_authenticator::TokenAuthenticator;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::TokenIssuer;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
