//! Per-route signature policy.
//!
//! # Data Flow
//! ```text
//! GlobalPolicy (config, startup)     RouteOverride (route table, startup)
//!            └──────────────┬──────────────┘
//!                           ▼
//!            resolver.rs (once per request)
//!                           ▼
//!              SignaturePolicy (read-only, per request)
//! ```
//!
//! # Design Decisions
//! - An explicitly set override flag always wins over the global default
//! - Unset override flags inherit the global default
//! - Debug mode is global only; routes cannot override it

pub mod resolver;

use serde::{Deserialize, Serialize};

pub use resolver::PolicyResolver;

/// Process-wide defaults supplied once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalPolicy {
    pub verify: bool,
    pub sign: bool,
    pub debug: bool,
}

impl Default for GlobalPolicy {
    fn default() -> Self {
        Self {
            verify: true,
            sign: true,
            debug: false,
        }
    }
}

impl GlobalPolicy {
    /// Merge an optional route override into these defaults.
    pub fn resolve(&self, route: Option<&RouteOverride>) -> SignaturePolicy {
        let route = route.copied().unwrap_or_default();
        SignaturePolicy {
            verify_enabled: route.verify.unwrap_or(self.verify),
            sign_enabled: route.sign.unwrap_or(self.sign),
            debug_enabled: self.debug,
        }
    }
}

/// Route-level metadata forcing verification or signing on or off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<bool>,
}

impl RouteOverride {
    /// Force request verification on or off, leaving signing inherited.
    pub fn verify(enabled: bool) -> Self {
        Self {
            verify: Some(enabled),
            sign: None,
        }
    }

    /// Force response signing on or off, leaving verification inherited.
    pub fn sign(enabled: bool) -> Self {
        Self {
            verify: None,
            sign: Some(enabled),
        }
    }

    pub fn with_verify(mut self, enabled: bool) -> Self {
        self.verify = Some(enabled);
        self
    }

    pub fn with_sign(mut self, enabled: bool) -> Self {
        self.sign = Some(enabled);
        self
    }

    /// True when neither flag is set.
    pub fn is_empty(&self) -> bool {
        self.verify.is_none() && self.sign.is_none()
    }
}

/// Resolved policy for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignaturePolicy {
    pub verify_enabled: bool,
    pub sign_enabled: bool,
    pub debug_enabled: bool,
}
