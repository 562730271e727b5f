//! Request middleware.
//!
//! Purpose: define middleware for request lifecycle concerns. Authentication
//! is not middleware here; it runs as the `AuthenticatedUser` extractor.

pub mod trace;

pub use trace::{TRACE_ID_HEADER, Trace};
