//! Signing middleware.
//!
//! Two `from_fn_with_state` layers share one [`SignedRequestState`]:
//! `sign_response` wraps `verify_request`, which wraps the handler. Both are
//! installed as route layers so that only matched routes are subject to
//! verification; unmatched paths keep the router's own 404.

pub mod sign;
pub mod verify;

use std::sync::Arc;

use axum::{extract::Request, middleware, Router};

use crate::config::SignedRequestConfig;
use crate::policy::{PolicyResolver, RouteOverride, SignaturePolicy};
use crate::routing::RouteTable;
use crate::signature::{Secret, SignatureError, Signer};

pub use sign::sign_response;
pub use verify::verify_request;

/// Largest response body buffered for signing unless configured otherwise.
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Immutable state shared by the verifier and signer layers.
#[derive(Debug, Clone)]
pub struct SignedRequestState {
    signer: Signer,
    resolver: PolicyResolver,
    max_body_size: usize,
}

impl SignedRequestState {
    pub fn new(signer: Signer, resolver: PolicyResolver) -> Self {
        Self {
            signer,
            resolver,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Build the state from a validated configuration.
    pub fn from_config(config: &SignedRequestConfig) -> Result<Self, SignatureError> {
        let secret = Secret::new(config.signature.secret.clone())?;
        let signer = Signer::new(secret, config.signature.algorithm);
        let resolver = PolicyResolver::new(
            config.signature.global_policy(),
            RouteTable::from_config(&config.routes),
        );
        Ok(Self::new(signer, resolver).with_max_body_size(config.signature.max_body_size))
    }

    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Declare an override for a route template registered in code.
    ///
    /// An empty override is ignored; it never removes a configured one.
    pub fn with_route(self, route: impl Into<String>, route_override: RouteOverride) -> Self {
        let global = *self.resolver.global();
        let routes = self.resolver.routes().clone().with_override(route, route_override);
        Self {
            resolver: PolicyResolver::new(global, routes),
            ..self
        }
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn resolver(&self) -> &PolicyResolver {
        &self.resolver
    }

    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Policy for the route matched by `request`.
    pub fn policy_for(&self, request: &Request) -> SignaturePolicy {
        self.resolver.resolve(super::request::matched_route(request))
    }
}

/// Installs the signing layers on an application router.
pub trait SignedRequestRouterExt {
    /// Verify requests and sign responses on every route added so far.
    ///
    /// Must be called after the routes are registered.
    fn with_signed_requests(self, state: Arc<SignedRequestState>) -> Self;
}

impl<S> SignedRequestRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_signed_requests(self, state: Arc<SignedRequestState>) -> Self {
        self.route_layer(middleware::from_fn_with_state(state.clone(), verify_request))
            .route_layer(middleware::from_fn_with_state(state, sign_response))
    }
}
