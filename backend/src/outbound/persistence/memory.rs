//! In-memory partitioned document store.
//!
//! One map per partition, guarded by a single mutex. Point operations and
//! single-partition scans only, mirroring the shape of the hosted document
//! API; the repository never needs anything richer.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{Project, ProjectStatus};

type Partitions = HashMap<ProjectStatus, HashMap<Uuid, Project>>;

/// Store adapter backed by process memory.
///
/// Suitable for tests and single-instance deployments without durable
/// storage; swap the adapter, not the repository, for a hosted store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    partitions: Mutex<Partitions>,
}

impl InMemoryDocumentStore {
    fn lock(&self) -> Result<MutexGuard<'_, Partitions>, DocumentStoreError> {
        self.partitions
            .lock()
            .map_err(|_| DocumentStoreError::backend("partition lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn read(
        &self,
        partition: ProjectStatus,
        id: Uuid,
    ) -> Result<Option<Project>, DocumentStoreError> {
        let partitions = self.lock()?;
        Ok(partitions
            .get(&partition)
            .and_then(|documents| documents.get(&id))
            .cloned())
    }

    async fn upsert(&self, project: Project) -> Result<(), DocumentStoreError> {
        let mut partitions = self.lock()?;
        partitions
            .entry(project.status)
            .or_default()
            .insert(project.id, project);
        Ok(())
    }

    async fn remove(&self, partition: ProjectStatus, id: Uuid) -> Result<bool, DocumentStoreError> {
        let mut partitions = self.lock()?;
        Ok(partitions
            .get_mut(&partition)
            .and_then(|documents| documents.remove(&id))
            .is_some())
    }

    async fn list(&self, partition: ProjectStatus) -> Result<Vec<Project>, DocumentStoreError> {
        let partitions = self.lock()?;
        Ok(partitions
            .get(&partition)
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default())
    }
}
