//! Membership backend library modules.
//!
//! The binary in `main.rs` wires these layers into an Actix server:
//! [`domain`] holds entities, rules and services, [`inbound`] the HTTP
//! adapter, and [`outbound`] the persistence and security adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
