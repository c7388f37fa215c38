//! Routing metadata subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteConfig[] (config file) + programmatic overrides
//!     → table.rs (route template → RouteOverride)
//!     → Freeze as immutable RouteTable
//!
//! Per request:
//!     axum MatchedPath (route template)
//!     → RouteTable::get
//!     → Option<RouteOverride>
//! ```
//!
//! # Design Decisions
//! - Request matching itself belongs to the axum router
//! - Keys are route templates, not concrete paths (`/users/{id}`)
//! - Deterministic: same template always yields the same override

pub mod table;

pub use table::RouteTable;
