//! Driven port for one-way password hashing.

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing a digest.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its inputs or parameters.
        Hashing => "password hashing failed: {message}",
    }
}

/// Salted one-way hash with constant-time verification.
///
/// Implementations must bind a fresh salt into every digest, so hashing the
/// same password twice yields different digests.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a freshly generated salt.
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError>;

    /// Check `password` against `digest`. Malformed digests never verify.
    fn verify(&self, password: &Password, digest: &PasswordDigest) -> bool;
}
