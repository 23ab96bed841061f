//! Port for recording authorization denials.
//!
//! Delivery is an external collaborator's concern; the port only promises
//! fire-and-forget semantics. Implementations must be safe for concurrent
//! calls and must never block or fail the request path: a sink outage is
//! swallowed (at most logged locally), never surfaced to the caller.

use crate::domain::AccessDeniedEvent;

/// Fire-and-forget sink for denied-access events.
#[cfg_attr(test, mockall::automock)]
pub trait AuditSink: Send + Sync {
    /// Record one denial.
    ///
    /// Called exactly once per denial, after the decision and before the
    /// response is written. Must return promptly; queueing and delivery
    /// happen off the request path.
    fn record(&self, event: AccessDeniedEvent);
}

/// Sink that discards every event.
///
/// Use in tests where audit behaviour is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpAuditSink;

impl AuditSink for NoOpAuditSink {
    fn record(&self, _event: AccessDeniedEvent) {}
}
