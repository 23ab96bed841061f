//! Domain primitives, ports, and services.
//!
//! Everything here is transport agnostic: the HTTP adapter maps these types
//! onto requests and responses, and outbound adapters implement the ports.
//! Types are immutable once constructed; invariants live in each type's
//! Rustdoc.

pub mod audit;
pub mod error;
pub mod ports;
pub mod principal;
pub mod project;
pub mod project_repository;
pub mod route_policy;

pub use self::audit::{AccessDeniedEvent, DenialReason};
pub use self::error::{ApiError, ErrorCode};
pub use self::principal::{ANONYMOUS_ACTOR, Caller, Principal};
pub use self::project::{
    Project, ProjectDraft, ProjectPatch, ProjectStatus, ProjectValidationError, TITLE_MAX,
    validate_title,
};
pub use self::project_repository::{ProjectRepository, ProjectRepositoryError};
pub use self::route_policy::{PolicyRule, RouteAccess, RoutePolicyTable};
