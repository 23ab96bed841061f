//! Authentication stage: decode the platform identity header.
//!
//! The gateway injects an identity assertion for authenticated requests in
//! the [`CLIENT_PRINCIPAL_HEADER`] header. This stage decodes it and
//! attaches a [`Caller`] to request-scoped context, then always invokes the
//! next stage. It never rejects a request and never emits a response:
//! deciding whether anonymity is acceptable belongs exclusively to the
//! authorization stage, so future endpoints can opt into "authenticated but
//! role-agnostic" handling without duplicating parsing. No I/O, no logging.

use std::task::{Context, Poll};

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::Caller;

/// Request header carrying the gateway's identity assertion.
pub const CLIENT_PRINCIPAL_HEADER: &str = "x-ms-client-principal";

/// Derive the caller state from request headers.
///
/// Absent and malformed headers are equivalent: both yield
/// [`Caller::Anonymous`].
fn caller_from(req: &ServiceRequest) -> Caller {
    req.headers()
        .get(CLIENT_PRINCIPAL_HEADER)
        .map_or(Caller::Anonymous, |value| {
            Caller::from_header_value(value.as_bytes())
        })
}

/// Middleware attaching a [`Caller`] to every request.
#[derive(Clone)]
pub struct Identity;

impl<S, B> Transform<S, ServiceRequest> for Identity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = IdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityMiddleware { service }))
    }
}

/// Service wrapper produced by [`Identity`].
pub struct IdentityMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for IdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let caller = caller_from(&req);
        req.extensions_mut().insert(caller);
        self.service.call(req)
    }
}

/// Extractor giving handlers direct access to the request's caller.
///
/// Requests that did not pass through [`Identity`] extract as
/// [`Caller::Anonymous`].
impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let caller = req
            .extensions()
            .get::<Caller>()
            .cloned()
            .unwrap_or(Caller::Anonymous);
        ready(Ok(caller))
    }
}
