//! Error types for the RouteGuide RPC layer.
//!
//! Lookups, range queries and route/chat processing cannot fail. The cases
//! here cover the plumbing around them: producer tasks losing their output
//! channel, callers going away, and requests arriving during shutdown.
//! `From<Error>` for `tonic::Status` maps each case onto a gRPC status code.
//!
//! ## Error Cases
//! - `ChannelError`: An internal channel between a producer task and the
//!   response stream failed.
//! - `RequestCancelled`: The client cancelled the call mid-flight.
//! - `ServiceShutdown`: A request arrived while the service was draining.

use tonic::Status;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for the RouteGuide RPC layer.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Internal channel send/receive failure (e.g. the receiver was dropped).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// The client aborted the request.
    #[error("Request cancelled by client")]
    RequestCancelled,

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::ChannelError { context } => Status::internal(format!("Channel error: {context}")),
            Error::RequestCancelled => Status::cancelled("Request was cancelled"),
            Error::ServiceShutdown => Status::unavailable("Service is shutting down"),
        }
    }
}
