//! HTTP server assembly
//!
//! `ServerBuilder` wires the order store and job queue into the order routes,
//! adds the liveness route and request tracing, and serves with graceful
//! shutdown.

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::{build_order_routes, health_routes};
