//! Shared RPC-boundary types.
//!
//! - [`error`] - the service error type and its mapping onto `tonic::Status`.
//! - [`convert`] - conversions between wire messages and domain types.

pub mod convert;
pub mod error;

pub use error::{Error, Result};
