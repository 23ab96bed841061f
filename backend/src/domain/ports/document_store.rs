//! Port for the partitioned document store holding project documents.
//!
//! The store is assumed to offer point reads, point writes, point deletes,
//! and enumeration of a single partition, nothing more exotic. Partition
//! placement is always derived from the document's status; the repository
//! layered on top owns the cross-partition move protocol.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Project, ProjectStatus};

/// Errors raised by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    /// The store could not be reached.
    #[error("document store unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied failure description; server-side only.
        message: String,
    },
    /// An individual operation failed inside the store.
    #[error("document store operation failed: {message}")]
    Backend {
        /// Adapter-supplied failure description; server-side only.
        message: String,
    },
}

impl DocumentStoreError {
    /// Construct an [`DocumentStoreError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Construct a [`DocumentStoreError::Backend`] error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Point and partition operations over the store.
///
/// `upsert` must replace an existing document with the same id in the same
/// partition rather than fail: the repository's move protocol relies on a
/// re-issued insert step being a no-op update, not a duplicate-key error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point-read one document from one partition.
    async fn read(
        &self,
        partition: ProjectStatus,
        id: Uuid,
    ) -> Result<Option<Project>, DocumentStoreError>;

    /// Insert or replace a document in the partition matching its status.
    async fn upsert(&self, project: Project) -> Result<(), DocumentStoreError>;

    /// Delete a document from one partition.
    ///
    /// Returns `Ok(true)` when a document was removed and `Ok(false)` when
    /// the partition did not hold the id.
    async fn remove(&self, partition: ProjectStatus, id: Uuid) -> Result<bool, DocumentStoreError>;

    /// Enumerate one partition.
    ///
    /// The scan is finite and restartable; no ordering is guaranteed.
    async fn list(&self, partition: ProjectStatus) -> Result<Vec<Project>, DocumentStoreError>;
}
