//! Request/response integrity signing for axum applications.
//!
//! Incoming requests must carry `X-SignedRequest`, the signature of their
//! path under a shared secret; unsigned or mis-signed requests get an empty
//! 404. Outgoing bodies are signed into the same header so callers can tell
//! the response came from a server holding the secret.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod policy;
pub mod routing;
pub mod signature;

pub use config::schema::SignedRequestConfig;
pub use http::{HttpServer, SignedRequestRouterExt, SignedRequestState};
pub use lifecycle::Shutdown;
pub use policy::{RouteOverride, SignaturePolicy};
pub use signature::{Secret, Signature, SignatureAlgorithm, Signer, VerificationOutcome};
