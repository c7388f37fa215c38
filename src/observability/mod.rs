//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Verifier and signer produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (verification outcomes, rejections, signed responses)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging through `tracing`
//! - Request ID flows through all log lines via the trace span
//! - Metrics are cheap (atomic increments) and no-ops until a recorder is installed
//! - Expected signatures are never logged

pub mod logging;
pub mod metrics;
