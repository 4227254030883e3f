use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Rejections raised while constructing model values.
///
/// These are the form-boundary validation failures: they never reach the
/// network and are reported back to whoever filled in the form.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}
