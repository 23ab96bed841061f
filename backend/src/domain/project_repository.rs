//! Partition-aware project repository.
//!
//! The project's status is its partition key, so a status change cannot be
//! an in-place write: the repository inserts the document into the new
//! partition first and only then removes it from the old one. A crash
//! between the two steps leaves a transient duplicate, which is detectable
//! and repaired on the next write, rather than a lost document. Readers may
//! observe the duplicate during that window; both copies carry the same id
//! and content, and the most recent write is authoritative.
//!
//! The repository is not a transaction manager. Concurrent status-changing
//! updates to the same id are not linearised here; callers needing strict
//! exclusivity must serialise writes to a given id themselves.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{
    ApiError, Project, ProjectDraft, ProjectPatch, ProjectStatus, ProjectValidationError,
    validate_title,
};

/// Errors surfaced by repository operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectRepositoryError {
    /// No partition holds the requested id.
    #[error("project not found: {id}")]
    NotFound {
        /// The id that was requested.
        id: Uuid,
    },
    /// Caller-supplied fields failed validation.
    #[error("invalid project data: {0}")]
    Validation(#[from] ProjectValidationError),
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}

impl From<ProjectRepositoryError> for ApiError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound { id } => {
                Self::not_found().with_details(json!({ "id": id }))
            }
            ProjectRepositoryError::Validation(source) => {
                Self::validation_failed().with_message(source.to_string())
            }
            ProjectRepositoryError::Store(source) => {
                // Full detail stays server-side; the caller sees the
                // redacted default payload only.
                error!(error = %source, "document store failure");
                Self::server_error()
            }
        }
    }
}

/// CRUD over the partitioned store, hiding partition placement from
/// callers while keeping the two-phase move protocol explicit inside.
#[derive(Clone)]
pub struct ProjectRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProjectRepository {
    /// Build a repository over a store adapter.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch the live copy of a project without the caller knowing its
    /// status.
    ///
    /// Probes every partition; when an interrupted move has left a
    /// duplicate, the most recently written copy wins.
    pub async fn get(&self, id: Uuid) -> Result<Project, ProjectRepositoryError> {
        let copies = self.probe(id).await?;
        live_copy(copies).ok_or(ProjectRepositoryError::NotFound { id })
    }

    /// Create a project in the partition matching its initial status.
    pub async fn create(&self, draft: ProjectDraft) -> Result<Project, ProjectRepositoryError> {
        validate_title(&draft.title)?;
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            status: draft.status,
            title: draft.title,
            summary: draft.summary,
            created_at: now,
            updated_at: now,
        };
        self.store.upsert(project.clone()).await?;
        Ok(project)
    }

    /// Apply a patch, relocating the document when its status changes.
    ///
    /// Same-status patches are a plain in-partition replace. A status
    /// change upserts into the target partition first and then removes
    /// every stale copy, in that order. Re-issuing the same update after a
    /// mid-operation failure is safe: the upsert is a no-op replace and the
    /// sweep clears whatever the earlier attempt left behind.
    pub async fn update(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Project, ProjectRepositoryError> {
        if let Some(title) = patch.title.as_deref() {
            validate_title(title)?;
        }
        let copies = self.probe(id).await?;
        let current =
            live_copy(copies.clone()).ok_or(ProjectRepositoryError::NotFound { id })?;
        let updated = current.with_patch(&patch, Utc::now());

        self.store.upsert(updated.clone()).await?;
        for copy in &copies {
            if copy.status != updated.status {
                self.store.remove(copy.status, id).await?;
            }
        }
        Ok(updated)
    }

    /// Remove a project from whichever partitions currently hold it.
    ///
    /// Deleting an absent id reports [`ProjectRepositoryError::NotFound`]
    /// so callers can tell "already gone" from "just deleted".
    pub async fn delete(&self, id: Uuid) -> Result<(), ProjectRepositoryError> {
        let copies = self.probe(id).await?;
        if copies.is_empty() {
            return Err(ProjectRepositoryError::NotFound { id });
        }
        for copy in &copies {
            self.store.remove(copy.status, id).await?;
        }
        Ok(())
    }

    /// Enumerate one partition.
    ///
    /// The scan is restartable and carries no ordering guarantee; ordering
    /// is a presentation concern of the caller.
    pub async fn list_by_status(
        &self,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        Ok(self.store.list(status).await?)
    }

    async fn probe(&self, id: Uuid) -> Result<Vec<Project>, DocumentStoreError> {
        let mut copies = Vec::new();
        for partition in ProjectStatus::ALL {
            if let Some(project) = self.store.read(partition, id).await? {
                copies.push(project);
            }
        }
        if copies.len() > 1 {
            debug!(%id, copies = copies.len(), "transient duplicate observed across partitions");
        }
        Ok(copies)
    }
}

/// Pick the authoritative copy: the most recent write wins.
fn live_copy(copies: Vec<Project>) -> Option<Project> {
    copies.into_iter().max_by_key(|copy| copy.updated_at)
}
