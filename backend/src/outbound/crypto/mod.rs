//! Cryptographic adapters: Argon2 password hashing and random token issuance.

mod argon2_hasher;
mod token_issuer;

pub use argon2_hasher::Argon2PasswordHasher;
pub use token_issuer::OsRngTokenIssuer;
