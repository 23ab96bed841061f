//! Persistence adapters for the document store port.

mod memory;

pub use memory::InMemoryDocumentStore;
