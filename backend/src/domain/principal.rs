//! Caller identity parsed from the platform-injected assertion header.
//!
//! The hosting gateway authenticates users against an external identity
//! provider and injects the result as a base64-encoded JSON object. The
//! header crosses the trust boundary, so parsing must never assume
//! well-formedness: any defect in the value collapses to [`Caller::Anonymous`]
//! rather than an error.

use std::collections::BTreeSet;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

/// Actor label used for audit records when no principal is present.
pub const ANONYMOUS_ACTOR: &str = "anonymous";

/// Immutable identity of an authenticated caller for a single request.
///
/// ## Invariants
/// - Constructed once per request and never mutated or persisted.
/// - `roles` membership is case-insensitive; roles are stored lowercased.
/// - `display_name` is informational only and never consulted for
///   authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    identity_provider: String,
    user_id: String,
    display_name: String,
    roles: BTreeSet<String>,
}

impl Principal {
    /// Opaque label of the identity provider that issued the assertion.
    pub fn identity_provider(&self) -> &str {
        self.identity_provider.as_str()
    }

    /// Stable external identifier for the caller.
    ///
    /// Unique per caller but not guaranteed non-empty; it is never used as a
    /// storage key here.
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Human-readable label for the caller.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Whether the caller holds `role`, compared case-insensitively.
    ///
    /// Unknown roles carried by the assertion are kept but ignored; they
    /// simply never match a required role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(&role.to_ascii_lowercase())
    }
}

/// Wire shape of the decoded assertion payload.
///
/// All four fields are required; an assertion missing any of them is
/// treated as absent rather than partially trusted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientPrincipalDto {
    identity_provider: String,
    user_id: String,
    user_details: String,
    user_roles: Vec<String>,
}

/// Closed sum of the two caller states attached to every request.
///
/// Absence of a principal is a valid, distinct state rather than an error:
/// public routes serve anonymous callers, and only the authorization stage
/// decides whether anonymity is acceptable for a given route.
///
/// # Examples
/// ```
/// use portfolio_backend::domain::Caller;
///
/// assert!(matches!(Caller::from_header_value(b"not base64"), Caller::Anonymous));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// No usable identity assertion accompanied the request.
    Anonymous,
    /// The gateway supplied a well-formed identity assertion.
    Authenticated(Principal),
}

impl Caller {
    /// Decode a raw header value into a caller state.
    ///
    /// Invalid base64, invalid UTF-8, invalid JSON, and missing required
    /// sub-fields all yield [`Caller::Anonymous`]; the header is
    /// attacker-controllable input and a malformed value is
    /// indistinguishable from no value at all.
    pub fn from_header_value(raw: &[u8]) -> Self {
        let Ok(decoded) = BASE64.decode(raw) else {
            return Self::Anonymous;
        };
        let Ok(dto) = serde_json::from_slice::<ClientPrincipalDto>(&decoded) else {
            return Self::Anonymous;
        };
        Self::Authenticated(Principal {
            identity_provider: dto.identity_provider,
            user_id: dto.user_id,
            display_name: dto.user_details,
            roles: dto
                .user_roles
                .into_iter()
                .map(|role| role.to_ascii_lowercase())
                .collect(),
        })
    }

    /// The authenticated principal, when present.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(principal) => Some(principal),
        }
    }

    /// Actor identifier recorded in audit events.
    pub fn actor_id(&self) -> &str {
        match self {
            Self::Anonymous => ANONYMOUS_ACTOR,
            Self::Authenticated(principal) => principal.user_id(),
        }
    }

    /// Whether the caller holds `role`; anonymous callers hold none.
    pub fn has_role(&self, role: &str) -> bool {
        self.principal().is_some_and(|p| p.has_role(role))
    }
}
