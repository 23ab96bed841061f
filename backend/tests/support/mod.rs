//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;
use uuid::Uuid;

use portfolio_backend::domain::ports::{AuditSink, DocumentStore, DocumentStoreError};
use portfolio_backend::domain::{AccessDeniedEvent, Project, ProjectStatus};
use portfolio_backend::outbound::persistence::InMemoryDocumentStore;

/// Sink capturing every event for assertions.
#[derive(Default)]
pub struct RecordingAuditSink {
    events: Mutex<Vec<AccessDeniedEvent>>,
}

impl RecordingAuditSink {
    /// Snapshot of the captured events.
    pub fn events(&self) -> Vec<AccessDeniedEvent> {
        self.events.lock().expect("sink lock poisoned").clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: AccessDeniedEvent) {
        self.events.lock().expect("sink lock poisoned").push(event);
    }
}

/// Encode a gateway identity assertion the way the platform does.
pub fn principal_header(user_id: &str, roles: &[&str]) -> String {
    BASE64.encode(
        serde_json::to_vec(&json!({
            "identityProvider": "aad",
            "userId": user_id,
            "userDetails": "Integration Tester",
            "userRoles": roles,
        }))
        .expect("assertion serialises"),
    )
}

/// Valid base64 wrapping bytes that are not a JSON principal.
pub fn garbled_json_header() -> String {
    BASE64.encode(b"{\"userId\": truncated")
}

/// Store wrapper that fails the next `remove` once, simulating a crash
/// between the insert and delete steps of a partition move.
pub struct FailOnceRemoveStore {
    inner: InMemoryDocumentStore,
    armed: AtomicBool,
}

impl FailOnceRemoveStore {
    /// Wrap a fresh in-memory store with the failure disarmed.
    pub fn new() -> Self {
        Self {
            inner: InMemoryDocumentStore::default(),
            armed: AtomicBool::new(false),
        }
    }

    /// Make the next `remove` fail.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

impl Default for FailOnceRemoveStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for FailOnceRemoveStore {
    async fn read(
        &self,
        partition: ProjectStatus,
        id: Uuid,
    ) -> Result<Option<Project>, DocumentStoreError> {
        self.inner.read(partition, id).await
    }

    async fn upsert(&self, project: Project) -> Result<(), DocumentStoreError> {
        self.inner.upsert(project).await
    }

    async fn remove(&self, partition: ProjectStatus, id: Uuid) -> Result<bool, DocumentStoreError> {
        if self.armed.swap(false, Ordering::SeqCst) {
            return Err(DocumentStoreError::backend("simulated crash before delete"));
        }
        self.inner.remove(partition, id).await
    }

    async fn list(&self, partition: ProjectStatus) -> Result<Vec<Project>, DocumentStoreError> {
        self.inner.list(partition).await
    }
}
