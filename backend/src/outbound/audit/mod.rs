//! Queued audit sink adapter.
//!
//! The "never block the request path" contract is enforced by a concurrency
//! primitive rather than convention: events go through a bounded channel
//! with `try_send`, and a background task drains them into structured log
//! records. When the queue is full the newest event is dropped; a
//! monitoring outage must never become a user-visible failure or a silent
//! bypass of a denial decision.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::AccessDeniedEvent;
use crate::domain::ports::AuditSink;

/// Default bound for the in-flight event queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Audit sink delivering events through a bounded queue.
pub struct QueuedAuditSink {
    tx: mpsc::Sender<AccessDeniedEvent>,
}

impl QueuedAuditSink {
    /// Start a sink with a drain task on the current Tokio runtime.
    ///
    /// The drain task ends when the sink (and all its clones) is dropped.
    pub fn spawn(capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel(capacity);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                emit(&event);
            }
        });
        Self { tx }
    }

    #[cfg(test)]
    fn with_sender(tx: mpsc::Sender<AccessDeniedEvent>) -> Self {
        Self { tx }
    }
}

/// Write one denial to the structured log.
fn emit(event: &AccessDeniedEvent) {
    warn!(
        target: "audit",
        actor_id = %event.actor_id,
        route = %event.route,
        method = %event.method,
        reason = event.reason.as_str(),
        timestamp = %event.timestamp,
        "access denied"
    );
}

impl AuditSink for QueuedAuditSink {
    fn record(&self, event: AccessDeniedEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                // Overflow policy: drop-newest rather than block.
                warn!(
                    route = %dropped.route,
                    reason = dropped.reason.as_str(),
                    "audit queue full; dropping event"
                );
            }
            Err(TrySendError::Closed(_)) => {
                warn!("audit drain task stopped; dropping event");
            }
        }
    }
}
