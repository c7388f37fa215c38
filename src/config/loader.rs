//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SignedRequestConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `signature.secret`.
pub const SECRET_ENV: &str = "SIGNED_REQUEST_SECRET";
/// Environment variable overriding `signature.debug`.
pub const DEBUG_ENV: &str = "SIGNED_REQUEST_DEBUG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SignedRequestConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: SignedRequestConfig = toml::from_str(&content)?;
    finalize(config, |key| std::env::var(key).ok())
}

/// Validate a configuration built without a file (defaults plus environment).
pub fn load_from_env() -> Result<SignedRequestConfig, ConfigError> {
    finalize(SignedRequestConfig::default(), |key| std::env::var(key).ok())
}

fn finalize<F>(mut config: SignedRequestConfig, lookup: F) -> Result<SignedRequestConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut config, lookup);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut SignedRequestConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secret) = lookup(SECRET_ENV).filter(|s| !s.is_empty()) {
        config.signature.secret = secret;
    }

    if let Some(debug) = lookup(DEBUG_ENV) {
        match debug.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => config.signature.debug = true,
            "0" | "false" | "no" | "off" => config.signature.debug = false,
            other => tracing::warn!(value = %other, "Ignoring unrecognised {}", DEBUG_ENV),
        }
    }
}
