//! Server configuration read from the environment.

use std::env;
use std::net::SocketAddr;

use tracing::warn;

use crate::outbound::audit::DEFAULT_QUEUE_CAPACITY;

/// Default bind address for the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,
    /// Bound of the audit event queue.
    pub audit_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: parse_bind_addr(DEFAULT_BIND_ADDR)
                .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080))),
            audit_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Read configuration from `BIND_ADDR` and `AUDIT_QUEUE_CAPACITY`.
    ///
    /// Invalid values fall back to the defaults with a warning rather than
    /// aborting startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|raw| {
                let parsed = parse_bind_addr(&raw);
                if parsed.is_none() {
                    warn!(value = %raw, "invalid BIND_ADDR; using default");
                }
                parsed
            })
            .unwrap_or(defaults.bind_addr);
        let audit_queue_capacity = env::var("AUDIT_QUEUE_CAPACITY")
            .ok()
            .and_then(|raw| {
                let parsed = raw.parse::<usize>().ok().filter(|capacity| *capacity > 0);
                if parsed.is_none() {
                    warn!(value = %raw, "invalid AUDIT_QUEUE_CAPACITY; using default");
                }
                parsed
            })
            .unwrap_or(defaults.audit_queue_capacity);
        Self {
            bind_addr,
            audit_queue_capacity,
        }
    }
}

fn parse_bind_addr(raw: &str) -> Option<SocketAddr> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.audit_queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn bind_addr_parsing_accepts_host_port() {
        assert!(parse_bind_addr("127.0.0.1:9000").is_some());
        assert!(parse_bind_addr("not-an-addr").is_none());
    }
}
