//! In-memory repositories.
//!
//! Used when no `DATABASE_URL` is configured and by the test suites. Each
//! operation takes the store lock once and never holds it across an
//! `.await`, so uniqueness checks and inserts are a single critical section.

mod pattern_repository;
mod user_repository;

pub use pattern_repository::InMemoryPatternRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
