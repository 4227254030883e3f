//! Session state, the route guard built on it, and the login/logout flows
//! that mutate it.
//!
//! # Lifecycle
//!
//! 1. [`SessionContext::new`] starts in the loading state.
//! 2. [`AuthService::restore`] resolves it from the persisted token, if any.
//! 3. [`AuthService::login`] / [`AuthService::register`] sign in and persist.
//! 4. [`AuthService::logout`] signs out and removes the persisted token.

pub mod guard;
pub mod service;
pub mod session;
pub mod token_store;

pub use guard::{Access, SessionGuard};
pub use service::AuthService;
pub use session::SessionContext;
pub use token_store::{StoredSession, TokenStore};
