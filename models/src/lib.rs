//! Domain models for fintrack.
//!
//! Pure data structures shared between the API client, the collection view and
//! the CLI. Constructors validate their input and return [`ModelError`]; there
//! is no I/O in this crate.
//!
//! ## Architecture
//!
//! - **models** (this crate): transactions, list queries/results, session, credentials
//! - **client-core**: API client, session guard, collection view
//! - **fintrack**: terminal application wiring everything together

pub mod auth;
pub mod error;
pub mod list;
pub mod session;
pub mod transaction;

pub use auth::{AccessToken, Credentials, Registration};
pub use error::model_error::ModelError;
pub use list::{ListQuery, ListResult};
pub use session::Session;
pub use transaction::{TRANSACTION_DATE_FORMAT, Transaction, TransactionDraft, TransactionDraftBuilder};

#[cfg(test)]
mod tests;
