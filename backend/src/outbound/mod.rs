//! Outbound adapters implementing the domain ports.

pub mod audit;
pub mod persistence;
