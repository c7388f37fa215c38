//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the signing
//! layer. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::policy::{GlobalPolicy, RouteOverride};
use crate::signature::SignatureAlgorithm;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SignedRequestConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Secret, algorithm and global switches.
    pub signature: SignatureConfig,

    /// Route-level overrides.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Signing configuration shared by the verifier and the signer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Shared secret (salt). Must be set.
    pub secret: String,

    /// Digest used for signatures.
    pub algorithm: SignatureAlgorithm,

    /// Verify `X-SignedRequest` on incoming requests.
    pub request_listener: bool,

    /// Sign outgoing response bodies.
    pub response_listener: bool,

    /// Annotate instead of rejecting failed verifications.
    pub debug: bool,

    /// Largest response body that will be buffered for signing, in bytes.
    pub max_body_size: usize,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: SignatureAlgorithm::default(),
            request_listener: true,
            response_listener: true,
            debug: false,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

impl SignatureConfig {
    /// Global policy described by this configuration.
    pub fn global_policy(&self) -> GlobalPolicy {
        GlobalPolicy {
            verify: self.request_listener,
            sign: self.response_listener,
            debug: self.debug,
        }
    }
}

/// Signature override for a single route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route template as registered with the router (e.g. "/users/{id}").
    pub path: String,

    /// Flags forcing verification/signing for this route.
    #[serde(flatten)]
    pub signature: RouteOverride,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
