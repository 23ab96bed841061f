//! Server wiring: the production policy table and role constants.

mod config;

pub use config::{DEFAULT_BIND_ADDR, ServerConfig};

use crate::domain::{PolicyRule, RoutePolicyTable};

/// Role required for the administrative surface.
pub const ADMIN_ROLE: &str = "admin";

/// Prefix under which routes deny by default.
pub const ADMIN_PREFIX: &str = "/api/manage";

/// The compiled-in route policy.
///
/// Built once at startup and handed to the authorization middleware; tests
/// construct their own tables instead of mutating this one.
pub fn default_policy() -> RoutePolicyTable {
    RoutePolicyTable::new(
        vec![
            PolicyRule::public("/api"),
            PolicyRule::require_role(ADMIN_PREFIX, ADMIN_ROLE),
        ],
        vec![ADMIN_PREFIX.to_owned()],
        ADMIN_ROLE,
    )
}
