//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for development and tests
//! - **crypto**: Argon2 password hashing and random token issuance
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no business rules.

pub mod crypto;
pub mod memory;
pub mod persistence;
