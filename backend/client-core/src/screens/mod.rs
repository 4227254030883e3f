//! Form submissions and the navigation/notification that follows them.
//!
//! Each function is one screen's submit handler: call the API, report the
//! outcome through the [`Notifier`](crate::notify::Notifier), and move the
//! [`Navigator`](crate::router::Navigator) on success.

pub mod account;
pub mod transaction_form;

pub use account::{logout, submit_login, submit_register};
pub use transaction_form::{load_for_update, submit_create, submit_update};
