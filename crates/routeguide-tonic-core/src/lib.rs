#![doc = include_str!("../README.md")]

mod common;
pub use common::*;
// Public re-export so downstream crates can reach the domain types via
// `routeguide_tonic_core::routeguide`
pub use routeguide;

/// gRPC service and message definitions generated from
/// `proto/routeguide.proto`.
///
/// ## Service
///
/// - `GetFeature` - unary lookup of the feature at a point.
/// - `ListFeatures` - server-streaming range query over a rectangle.
/// - `RecordRoute` - client-streaming route summary.
/// - `RouteChat` - bidirectional note exchange.
///
/// Messages here are wire types only. Convert them to and from the
/// [`routeguide`] domain types with the `From` impls in [`crate::convert`].
pub mod proto {
    tonic::include_proto!("routeguide");

    /// Encoded file descriptor set for the gRPC reflection service.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("routeguide_descriptor");
}
