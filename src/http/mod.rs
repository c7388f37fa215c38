//! HTTP integration of the signing layer.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → server.rs (request ID, tracing, timeout)
//!     → axum router matches the route (MatchedPath)
//!     → middleware/sign.rs   resolve SignaturePolicy for the route
//!     → middleware/verify.rs admit, reject (404) or annotate
//!     → application handler
//!     → middleware/sign.rs   X-SignedRequest / X-SignedRequest-Debug
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{SignedRequestRouterExt, SignedRequestState};
pub use request::{X_REQUEST_ID, X_SIGNED_REQUEST};
pub use response::X_SIGNED_REQUEST_DEBUG;
pub use server::HttpServer;
