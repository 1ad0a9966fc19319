use std::path::PathBuf;

/// A result type for fallible `routeguide` operations.
///
/// Only loading the feature database can fail; every query and RPC behavior
/// in this crate is infallible.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while loading the feature database.
///
/// Both variants are fatal at startup: the service must not begin serving
/// from a missing or corrupt store.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The database file could not be opened or read.
    #[error("failed to read feature database {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The database contents are not a valid JSON feature list.
    #[error("malformed feature database: {0}")]
    Malformed(#[from] serde_json::Error),
}
