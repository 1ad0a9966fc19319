//! # `routeguide-tonic`: RouteGuide over gRPC
//!
//! A [`tonic`] server exposing a read-only database of named geographic
//! features through all four gRPC call shapes, plus a client driver that
//! exercises each of them.
//!
//! ## Highlights
//!
//! - **Unary lookup**: `GetFeature` returns the feature at an exact point, or
//!   an unnamed feature at that point when nothing is recorded there.
//! - **Server streaming**: `ListFeatures` streams every feature inside a
//!   rectangle from a spawned producer task over a bounded channel.
//! - **Client streaming**: `RecordRoute` consumes a stream of points and
//!   answers with a [`RouteSummary`](routeguide_tonic_core::routeguide::RouteSummary).
//! - **Bidirectional streaming**: `RouteChat` echoes prior notes left at the
//!   same location. History is scoped to a single call.
//! - **Graceful shutdown**: the health service flips to `NOT_SERVING`, new
//!   streams are refused, and in-flight streams are drained before remaining
//!   work is cancelled.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin routeguide-server --release
//! cargo run --bin routeguide-client --release
//! ```
//!
//! ## Module Overview
//!
//! - [`server`] - service handlers, streaming producers, lifecycle, config
//!   and telemetry.
//! - [`client`] - the demo driver used by the `routeguide-client` binary.

pub mod client;
pub mod server;
