//! Laundry order backend library.
//!
//! Domain types, ports and services live in [`domain`]; the actix-web
//! adapter in [`inbound`]; persistence, the in-memory store and password
//! hashing in [`outbound`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

#[cfg(test)]
mod test_support;
