//! Authorization stage: enforce the route policy table.
//!
//! Consults the immutable [`RoutePolicyTable`] and the [`Caller`] attached
//! by the authentication stage. Allowed requests pass through with no I/O
//! and no added work beyond the policy lookup and role check. Denied
//! requests short-circuit: decide, audit exactly once, then respond, in
//! that order. An audited denial corresponds 1:1 with a denial returned to
//! the caller.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::ports::AuditSink;
use crate::domain::{
    AccessDeniedEvent, ApiError, Caller, DenialReason, RouteAccess, RoutePolicyTable,
};

/// Outcome of the authorization decision for one request.
#[derive(Debug, PartialEq)]
enum Verdict {
    Allow,
    Deny {
        error: ApiError,
        event: AccessDeniedEvent,
    },
}

/// Pure decision function: policy × caller × route → verdict.
///
/// Kept free of the service plumbing so the decision table is testable in
/// isolation.
fn decide(policy: &RoutePolicyTable, caller: &Caller, path: &str, method: &Method) -> Verdict {
    let required = match policy.access_for(path) {
        RouteAccess::Public => return Verdict::Allow,
        RouteAccess::RequireRole(role) => role,
    };
    match caller {
        Caller::Anonymous => Verdict::Deny {
            error: ApiError::auth_required(),
            event: AccessDeniedEvent::new(
                caller.actor_id(),
                path,
                method.as_str(),
                DenialReason::NotAuthenticated,
            ),
        },
        Caller::Authenticated(principal) if principal.has_role(required) => Verdict::Allow,
        Caller::Authenticated(principal) => Verdict::Deny {
            error: ApiError::auth_forbidden(),
            event: AccessDeniedEvent::new(
                principal.user_id(),
                path,
                method.as_str(),
                DenialReason::InsufficientRole,
            ),
        },
    }
}

/// Middleware enforcing role requirements per route.
///
/// The policy table and audit sink are injected explicitly so tests can run
/// against alternate tables and recording sinks.
#[derive(Clone)]
pub struct RouteGuard {
    policy: Arc<RoutePolicyTable>,
    audit: Arc<dyn AuditSink>,
}

impl RouteGuard {
    /// Build the guard from its two collaborators.
    pub fn new(policy: Arc<RoutePolicyTable>, audit: Arc<dyn AuditSink>) -> Self {
        Self { policy, audit }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardMiddleware {
            service,
            policy: Arc::clone(&self.policy),
            audit: Arc::clone(&self.audit),
        }))
    }
}

/// Service wrapper produced by [`RouteGuard`].
pub struct RouteGuardMiddleware<S> {
    service: S,
    policy: Arc<RoutePolicyTable>,
    audit: Arc<dyn AuditSink>,
}

impl<S, B> Service<ServiceRequest> for RouteGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let caller = req
            .extensions()
            .get::<Caller>()
            .cloned()
            .unwrap_or(Caller::Anonymous);
        match decide(&self.policy, &caller, req.path(), req.method()) {
            Verdict::Allow => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Verdict::Deny { error, event } => {
                let audit = Arc::clone(&self.audit);
                Box::pin(async move {
                    // Audit precedes the response write; both are
                    // best-effort but the ordering is fixed.
                    audit.record(event);
                    let response = error.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                })
            }
        }
    }
}
