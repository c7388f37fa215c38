//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject configurations that cannot sign anything (missing secret)
//! - Validate value ranges and addresses
//! - Detect conflicting route overrides
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: config → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::SignedRequestConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("signature.secret must not be empty")]
    MissingSecret,

    #[error("signature.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("route path must start with '/': {0}")]
    InvalidRoutePath(String),

    #[error("route {0} is configured more than once")]
    DuplicateRoute(String),

    #[error("route {0} sets neither verify nor sign")]
    EmptyOverride(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &SignedRequestConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.signature.secret.is_empty() {
        errors.push(ValidationError::MissingSecret);
    }
    if config.signature.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::InvalidRoutePath(route.path.clone()));
        }
        if !seen.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.path.clone()));
        }
        if route.signature.is_empty() {
            errors.push(ValidationError::EmptyOverride(route.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::policy::RouteOverride;

    fn valid_config() -> SignedRequestConfig {
        let mut config = SignedRequestConfig::default();
        config.signature.secret = "testsalt".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn test_default_config_needs_secret() {
        let errors = validate_config(&SignedRequestConfig::default()).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingSecret]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.signature.max_body_size = 0;
        config.listener.bind_address = "not-an-address".into();
        config.routes = vec![
            RouteConfig {
                path: "annotation".into(),
                signature: RouteOverride::verify(true),
            },
            RouteConfig {
                path: "annotation".into(),
                signature: RouteOverride::default(),
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
        assert!(errors.contains(&ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: "not-an-address".into(),
        }));
        assert!(errors.contains(&ValidationError::InvalidRoutePath("annotation".into())));
        assert!(errors.contains(&ValidationError::DuplicateRoute("annotation".into())));
        assert!(errors.contains(&ValidationError::EmptyOverride("annotation".into())));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "nope".into();
        assert_eq!(validate_config(&config), Ok(()));

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
