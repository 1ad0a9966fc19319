//! gRPC service implementation and stream lifecycle.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`RouteGuideService`).
//! - [`lifecycle`] - in-flight stream accounting and graceful shutdown.

pub mod handler;
pub mod lifecycle;
