//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → SignedRequestConfig (validated, immutable)
//!     → secret + global policy + route table built once at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload of the secret
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, RouteConfig, SignatureConfig, SignedRequestConfig,
    TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
