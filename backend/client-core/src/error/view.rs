use crate::error::api_client::ApiClientError;

use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ViewError {
    /// Row actions only apply to rows currently on screen.
    #[error("Row Not Visible: {message} {location}")]
    RowNotVisible {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Api(#[from] ApiClientError),
}
