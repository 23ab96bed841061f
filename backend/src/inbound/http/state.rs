//! Shared HTTP adapter state.
//!
//! Handlers accept this bundle via `actix_web::web::Data` so they depend on
//! the domain service alone and remain testable without real I/O.

use crate::domain::ProjectRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Partition-aware project repository.
    pub projects: ProjectRepository,
}

impl HttpState {
    /// Bundle the repository for handler injection.
    pub fn new(projects: ProjectRepository) -> Self {
        Self { projects }
    }
}
