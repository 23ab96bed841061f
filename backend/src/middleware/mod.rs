//! Request-scoped middleware stages.
//!
//! Order matters: [`trace::Trace`] runs outermost, then
//! [`identity::Identity`] decorates the request with a caller, and
//! [`route_guard::RouteGuard`] decides access innermost, immediately before
//! the handlers.

pub mod identity;
pub mod route_guard;
pub mod trace;

pub use identity::{CLIENT_PRINCIPAL_HEADER, Identity};
pub use route_guard::RouteGuard;
pub use trace::{TRACE_ID_HEADER, Trace, TraceId};
