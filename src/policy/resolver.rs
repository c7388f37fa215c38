//! Route policy lookup.
//!
//! # Responsibilities
//! - Hold the global defaults and the route table
//! - Produce a `SignaturePolicy` for the matched route of a request
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc, no locks)
//! - Unmatched or unknown routes fall back to the global defaults

use crate::policy::{GlobalPolicy, SignaturePolicy};
use crate::routing::RouteTable;

/// Resolves the effective signature policy per route.
#[derive(Debug, Clone, Default)]
pub struct PolicyResolver {
    global: GlobalPolicy,
    routes: RouteTable,
}

impl PolicyResolver {
    pub fn new(global: GlobalPolicy, routes: RouteTable) -> Self {
        Self { global, routes }
    }

    pub fn global(&self) -> &GlobalPolicy {
        &self.global
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Resolve the policy for a matched route template, if any.
    pub fn resolve(&self, route: Option<&str>) -> SignaturePolicy {
        let route_override = route.and_then(|r| self.routes.get(r));
        self.global.resolve(route_override)
    }
}
