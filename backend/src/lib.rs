//! Recruit admin backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod master_data;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
