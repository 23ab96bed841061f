//! Portfolio backend library modules.
//!
//! The crate is organised hexagonally: `domain` holds transport-agnostic
//! types, ports, and services; `inbound` and `outbound` hold the adapters;
//! `middleware` holds the request gatekeeping stages; `server` holds the
//! wiring used by the binary.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{Identity, RouteGuard, Trace};
