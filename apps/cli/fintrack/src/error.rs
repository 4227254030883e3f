use client_core::error::{ApiClientError, AuthError, ConfigError, CoreError, ViewError};

use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by CLI commands.
///
/// Serializable so `--json` runs can report them in the same envelope as
/// successful output.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum FintrackError {
    /// Error from this app (terminal I/O, logging setup)
    #[error("Fintrack Error: {message} {location}")]
    Fintrack {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core operations (HTTP, config, session store)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Rejected form or argument input
    #[error("Invalid Input: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    /// Protected command run without a session
    #[error("Not Signed In: {message} {location}")]
    NotSignedIn {
        message: String,
        location: ErrorLocation,
    },

    /// User declined a confirmation prompt
    #[error("Cancelled: {message} {location}")]
    Cancelled {
        message: String,
        location: ErrorLocation,
    },
}

impl FintrackError {
    /// Short text for the terminal, without the location suffix.
    pub fn user_message(&self) -> &str {
        match self {
            FintrackError::Fintrack { message, .. }
            | FintrackError::Core { message, .. }
            | FintrackError::InvalidInput { message, .. }
            | FintrackError::NotSignedIn { message, .. }
            | FintrackError::Cancelled { message, .. } => message,
        }
    }
}

impl From<ModelError> for FintrackError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        let message = match error {
            ModelError::Validation { message, .. } => message,
        };
        FintrackError::InvalidInput {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for FintrackError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Model(model) => model.into(),
            other => FintrackError::Core {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<ApiClientError> for FintrackError {
    #[track_caller]
    fn from(error: ApiClientError) -> Self {
        FintrackError::from(CoreError::Api(error))
    }
}

impl From<AuthError> for FintrackError {
    #[track_caller]
    fn from(error: AuthError) -> Self {
        FintrackError::from(CoreError::Auth(error))
    }
}

impl From<ConfigError> for FintrackError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        FintrackError::from(CoreError::Config(error))
    }
}

impl From<ViewError> for FintrackError {
    #[track_caller]
    fn from(error: ViewError) -> Self {
        FintrackError::from(CoreError::View(error))
    }
}
