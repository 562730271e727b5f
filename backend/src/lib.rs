//! Knitting pattern backend.
//!
//! Hexagonal layout: `domain` holds the account, token and ownership rules
//! behind port traits; `inbound::http` adapts them to actix-web; `outbound`
//! provides PostgreSQL, in-memory and cryptographic adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
