//! Domain ports for the hexagonal boundary.

mod audit_sink;
mod document_store;

#[cfg(test)]
pub use audit_sink::MockAuditSink;
pub use audit_sink::{AuditSink, NoOpAuditSink};
#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use document_store::{DocumentStore, DocumentStoreError};
