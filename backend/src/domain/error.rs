//! Wire-visible error taxonomy.
//!
//! These types are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] to exactly one status code and handles redaction of
//! server-side failures; nothing in this module performs I/O or logging.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
///
/// The set of codes and their status mapping is closed and versioned:
/// callers may override the human-readable message per instance, but never
/// the meaning of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No usable principal on a route that requires one.
    AuthRequired,
    /// Principal present but lacking the required role.
    AuthForbidden,
    /// The requested resource does not exist.
    ResourceNotFound,
    /// The request payload or parameters failed validation.
    ValidationFailed,
    /// The caller exceeded a request budget.
    RateLimited,
    /// An unexpected failure; details stay server-side.
    ServerError,
}

impl ErrorCode {
    /// Default-locale message for this code.
    ///
    /// The message is never the sole signal for client logic; `code` is the
    /// machine contract. A future locale layer replaces these strings
    /// without touching the taxonomy.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource.",
            Self::AuthForbidden => "You do not have permission to access this resource.",
            Self::ResourceNotFound => "The requested resource does not exist.",
            Self::ValidationFailed => "The request failed validation.",
            Self::RateLimited => "Too many requests; try again later.",
            Self::ServerError => "Something went wrong on our side.",
        }
    }
}

/// Structured error payload returned to callers on denial or failure.
///
/// ## Invariants
/// - Constructed once at the failure site and never mutated afterwards.
/// - `details` never carries secrets, raw identity assertions, or internal
///   failure text; the HTTP adapter additionally redacts
///   [`ErrorCode::ServerError`] payloads before serialisation.
///
/// # Examples
/// ```
/// use portfolio_backend::domain::{ApiError, ErrorCode};
///
/// let err = ApiError::new(ErrorCode::ResourceNotFound);
/// assert_eq!(err.code(), ErrorCode::ResourceNotFound);
/// assert_eq!(err.message(), ErrorCode::ResourceNotFound.default_message());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    #[schema(example = "AUTH_REQUIRED")]
    code: ErrorCode,
    #[schema(example = "Authentication is required to access this resource.")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Create an error carrying the code's default message.
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_owned(),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message in the default locale.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary machine-readable context, when present.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Override the human-readable message for this instance.
    ///
    /// The code and its status mapping are fixed; only the text changes.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use portfolio_backend::domain::{ApiError, ErrorCode};
    /// use serde_json::json;
    ///
    /// let err = ApiError::new(ErrorCode::ValidationFailed)
    ///     .with_details(json!({ "field": "title" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::AuthRequired`].
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired)
    }

    /// Convenience constructor for [`ErrorCode::AuthForbidden`].
    pub fn auth_forbidden() -> Self {
        Self::new(ErrorCode::AuthForbidden)
    }

    /// Convenience constructor for [`ErrorCode::ResourceNotFound`].
    pub fn not_found() -> Self {
        Self::new(ErrorCode::ResourceNotFound)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation_failed() -> Self {
        Self::new(ErrorCode::ValidationFailed)
    }

    /// Convenience constructor for [`ErrorCode::RateLimited`].
    pub fn rate_limited() -> Self {
        Self::new(ErrorCode::RateLimited)
    }

    /// Convenience constructor for [`ErrorCode::ServerError`].
    pub fn server_error() -> Self {
        Self::new(ErrorCode::ServerError)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
