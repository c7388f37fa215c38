//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the application router with the signing layers
//! - Wire up ambient middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Graceful shutdown on signal or coordinator trigger

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SignedRequestConfig;
use crate::http::middleware::{SignedRequestRouterExt, SignedRequestState};
use crate::http::request::X_REQUEST_ID;
use crate::lifecycle::signals;
use crate::signature::SignatureError;

/// HTTP server serving an application behind the signing layer.
pub struct HttpServer {
    router: Router,
    config: SignedRequestConfig,
    state: Arc<SignedRequestState>,
}

impl HttpServer {
    /// Create a server whose signing state comes entirely from `config`.
    pub fn new(config: SignedRequestConfig, app: Router) -> Result<Self, SignatureError> {
        let state = SignedRequestState::from_config(&config)?;
        Ok(Self::with_state(config, state, app))
    }

    /// Create a server with a prepared signing state (e.g. with route
    /// overrides declared in code).
    pub fn with_state(config: SignedRequestConfig, state: SignedRequestState, app: Router) -> Self {
        let state = Arc::new(state);

        tracing::info!(
            algorithm = %state.signer().algorithm(),
            verify = state.resolver().global().verify,
            sign = state.resolver().global().sign,
            debug = state.resolver().global().debug,
            route_overrides = state.resolver().routes().len(),
            "Signing layer configured"
        );

        let router = Self::build_router(&config, state.clone(), app);
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SignedRequestConfig, state: Arc<SignedRequestState>, app: Router) -> Router {
        app.with_signed_requests(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
        )
    }

    /// Router with every layer applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C/SIGTERM or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = signals::shutdown_signal() => {}
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SignedRequestConfig {
        &self.config
    }

    pub fn state(&self) -> &Arc<SignedRequestState> {
        &self.state
    }
}
