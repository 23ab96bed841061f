//! Static route-access policy table.
//!
//! The table is built once at startup, never mutated, and passed explicitly
//! into the authorization middleware so tests can swap in alternate tables.
//! Matching is by longest path prefix on segment boundaries; when no rule
//! matches, routes under an administrative prefix deny by default and every
//! other route is public. Allow-listing is never implicit for admin paths.

/// Access requirement attached to a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone may reach the route, including anonymous callers.
    Public,
    /// Callers must present a principal holding this role.
    RequireRole(String),
}

/// One `(prefix, access)` entry of the policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRule {
    prefix: String,
    access: RouteAccess,
}

impl PolicyRule {
    /// Rule marking every route under `prefix` as public.
    pub fn public(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            access: RouteAccess::Public,
        }
    }

    /// Rule requiring `role` for every route under `prefix`.
    pub fn require_role(prefix: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            access: RouteAccess::RequireRole(role.into()),
        }
    }
}

/// Immutable, process-wide route policy.
///
/// ## Invariants
/// - Exactly one access decision applies to any path: the longest matching
///   rule prefix wins, with the earliest rule breaking ties.
/// - Safe for unsynchronised concurrent reads; there is no mutation API.
///
/// # Examples
/// ```
/// use portfolio_backend::domain::{PolicyRule, RouteAccess, RoutePolicyTable};
///
/// let table = RoutePolicyTable::new(
///     vec![PolicyRule::require_role("/api/manage", "admin")],
///     vec!["/api/manage".to_owned()],
///     "admin",
/// );
/// assert_eq!(table.access_for("/api/projects"), &RouteAccess::Public);
/// ```
#[derive(Debug, Clone)]
pub struct RoutePolicyTable {
    rules: Vec<PolicyRule>,
    admin_prefixes: Vec<String>,
    admin_fallback: RouteAccess,
    public_fallback: RouteAccess,
}

impl RoutePolicyTable {
    /// Build a table from explicit rules plus the deny-by-default admin
    /// prefixes.
    ///
    /// `admin_role` is the role implied for admin paths that no explicit
    /// rule covers.
    pub fn new(
        rules: Vec<PolicyRule>,
        admin_prefixes: Vec<String>,
        admin_role: impl Into<String>,
    ) -> Self {
        Self {
            rules,
            admin_prefixes,
            admin_fallback: RouteAccess::RequireRole(admin_role.into()),
            public_fallback: RouteAccess::Public,
        }
    }

    /// The single access decision for `path`.
    pub fn access_for(&self, path: &str) -> &RouteAccess {
        let mut best: Option<&PolicyRule> = None;
        for rule in &self.rules {
            if !prefix_matches(&rule.prefix, path) {
                continue;
            }
            // Strict comparison keeps the earliest rule on equal length.
            let longer = best.is_none_or(|current| rule.prefix.len() > current.prefix.len());
            if longer {
                best = Some(rule);
            }
        }
        if let Some(rule) = best {
            return &rule.access;
        }
        if self
            .admin_prefixes
            .iter()
            .any(|prefix| prefix_matches(prefix, path))
        {
            &self.admin_fallback
        } else {
            &self.public_fallback
        }
    }
}

/// Prefix match on path-segment boundaries.
///
/// `/api/manage` matches `/api/manage` and `/api/manage/projects` but not
/// `/api/managefoo`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for policy matching.

    use super::*;
    use rstest::rstest;

    fn table() -> RoutePolicyTable {
        RoutePolicyTable::new(
            vec![
                PolicyRule::public("/api"),
                PolicyRule::require_role("/api/manage", "admin"),
                PolicyRule::require_role("/api/manage/settings", "owner"),
            ],
            vec!["/api/manage".to_owned()],
            "admin",
        )
    }

    #[rstest]
    #[case::public_api("/api/projects", RouteAccess::Public)]
    #[case::admin_wins_by_length(
        "/api/manage/projects",
        RouteAccess::RequireRole("admin".to_owned())
    )]
    #[case::longest_prefix_wins(
        "/api/manage/settings/theme",
        RouteAccess::RequireRole("owner".to_owned())
    )]
    #[case::exact_prefix_match("/api/manage", RouteAccess::RequireRole("admin".to_owned()))]
    #[case::unmatched_is_public("/health/live", RouteAccess::Public)]
    fn access_follows_longest_matching_prefix(#[case] path: &str, #[case] expected: RouteAccess) {
        assert_eq!(table().access_for(path), &expected);
    }

    #[test]
    fn admin_paths_deny_by_default_without_rules() {
        let empty = RoutePolicyTable::new(Vec::new(), vec!["/api/manage".to_owned()], "admin");
        assert_eq!(
            empty.access_for("/api/manage/unlisted"),
            &RouteAccess::RequireRole("admin".to_owned())
        );
        assert_eq!(empty.access_for("/api/projects"), &RouteAccess::Public);
    }

    #[rstest]
    #[case::boundary_respected("/api/managefoo", false)]
    #[case::exact(" /api/manage", false)]
    #[case::nested("/api/manage/projects/p1", true)]
    fn prefix_matching_honours_segment_boundaries(#[case] path: &str, #[case] matched: bool) {
        assert_eq!(prefix_matches("/api/manage", path), matched);
    }

    #[test]
    fn root_prefix_matches_everything() {
        assert!(prefix_matches("/", "/anything/at/all"));
    }
}
