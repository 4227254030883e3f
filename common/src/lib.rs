//! Shared building blocks for the fintrack workspace.
//!
//! Everything here is free of I/O and business rules so that `models`,
//! `client-core` and the CLI can all depend on it:
//!
//! - [`ErrorLocation`]: file/line/column captured at the error site
//! - [`HttpStatusCode`]: status carried by server errors
//! - [`RedactedSecret`]: passwords and bearer tokens that never leak into logs

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;

#[cfg(test)]
mod tests;
