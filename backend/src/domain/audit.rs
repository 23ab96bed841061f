//! Audit events emitted when the authorization stage denies a request.
//!
//! Audit events are distinct from general application logging: every denial
//! produces exactly one event, and the event never carries the request body
//! or the raw identity assertion.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why the authorization stage denied the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DenialReason {
    /// No usable principal accompanied the request.
    NotAuthenticated,
    /// A principal was present but lacked the required role.
    InsufficientRole,
}

impl DenialReason {
    /// Stable wire label for the reason.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NotAuthenticated",
            Self::InsufficientRole => "InsufficientRole",
        }
    }
}

/// Record of one denied access attempt.
///
/// ## Invariants
/// - One event corresponds to exactly one denial returned to the caller.
/// - `actor_id` is the principal's user id, or `"anonymous"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessDeniedEvent {
    /// Identifier of the denied actor.
    pub actor_id: String,
    /// Path of the denied request.
    pub route: String,
    /// HTTP method of the denied request.
    pub method: String,
    /// Denial category.
    pub reason: DenialReason,
    /// When the denial was decided.
    pub timestamp: DateTime<Utc>,
}

impl AccessDeniedEvent {
    /// Create an event stamped with the current time.
    pub fn new(
        actor_id: impl Into<String>,
        route: impl Into<String>,
        method: impl Into<String>,
        reason: DenialReason,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            route: route.into(),
            method: method.into(),
            reason,
            timestamp: Utc::now(),
        }
    }
}
