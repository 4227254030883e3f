use crate::error::api_client::ApiClientError;

use common::ErrorLocation;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth service answered 401/403 for the submitted credentials.
    #[error("Credentials Rejected: {message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error("Session Store Read Error: {path}: {source} {location}")]
    StoreRead {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session Store Write Error: {path}: {source} {location}")]
    StoreWrite {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session Store Parse Error: {path}: {reason} {location}")]
    StoreParse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },
}
