//! Route override table.
//!
//! # Responsibilities
//! - Store the override declared for each route template
//! - Look up the override for a matched route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap
//! - Later registrations for the same template replace earlier ones

use std::collections::HashMap;

use crate::config::RouteConfig;
use crate::policy::RouteOverride;

/// Maps route templates to their signature overrides.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    overrides: HashMap<String, RouteOverride>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from configured routes.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        routes.iter().fold(Self::new(), |table, route| {
            table.with_override(route.path.clone(), route.signature)
        })
    }

    /// Register an override for a route template.
    ///
    /// An override with neither flag set is ignored, leaving any existing
    /// entry for the template in place.
    pub fn with_override(mut self, route: impl Into<String>, route_override: RouteOverride) -> Self {
        if !route_override.is_empty() {
            self.overrides.insert(route.into(), route_override);
        }
        self
    }

    /// Override registered for `route`, if any.
    pub fn get(&self, route: &str) -> Option<&RouteOverride> {
        self.overrides.get(route)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_template() {
        let table = RouteTable::new()
            .with_override("/annotation", RouteOverride::verify(true))
            .with_override("/users/{id}", RouteOverride::sign(false));

        assert_eq!(table.get("/annotation"), Some(&RouteOverride::verify(true)));
        assert_eq!(table.get("/users/{id}"), Some(&RouteOverride::sign(false)));
        assert_eq!(table.get("/users/42"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_config() {
        let routes = vec![
            RouteConfig {
                path: "/annotation".into(),
                signature: RouteOverride::verify(true),
            },
            RouteConfig {
                path: "/public".into(),
                signature: RouteOverride::verify(false).with_sign(false),
            },
        ];
        let table = RouteTable::from_config(&routes);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/public").and_then(|o| o.sign), Some(false));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let table = RouteTable::new().with_override("/public", RouteOverride::default());
        assert!(table.is_empty());

        let table = RouteTable::new()
            .with_override("/annotation", RouteOverride::verify(true))
            .with_override("/annotation", RouteOverride::default());
        assert_eq!(table.get("/annotation"), Some(&RouteOverride::verify(true)));
    }
}
