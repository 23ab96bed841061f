//! HTTP adapter mapping for the wire error taxonomy.
//!
//! Keeps [`ApiError`] transport agnostic while giving Actix handlers a
//! consistent JSON envelope and status code per [`ErrorCode`]. The
//! code→status table below is closed and versioned; writing a response is
//! idempotent and free of side effects. Logging and auditing are the
//! caller's responsibility at the failure site.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{ApiError, ErrorCode};
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::AuthRequired => StatusCode::UNAUTHORIZED,
        ErrorCode::AuthForbidden => StatusCode::FORBIDDEN,
        ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Strip internal detail from unexpected failures.
///
/// Stack traces, connection strings, and raw exception text must never
/// reach the wire; the redacted payload carries only the default message.
fn redact_if_server_error(error: &ApiError) -> ApiError {
    if matches!(error.code(), ErrorCode::ServerError) {
        ApiError::server_error()
    } else {
        error.clone()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = TraceId::current() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(redact_if_server_error(self))
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to API error");
        Self::server_error()
    }
}
