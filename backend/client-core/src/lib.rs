//! Client core for the personal finance transaction manager.
//!
//! Everything below the presentation layer lives here: the REST client,
//! session handling and the route guard, the paginated list state machine,
//! form submit handlers, and configuration. Front ends (the `fintrack` CLI)
//! only render state and forward user input.

pub mod api_client;
pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod router;
pub mod screens;
pub mod view;

#[cfg(test)]
mod tests;

pub use api_client::ApiClient;
pub use auth::{Access, AuthService, SessionContext, SessionGuard, TokenStore};
pub use config::AppConfig;
pub use error::CoreError;
pub use notify::{LogNotifier, MemoryNotifier, Notification, NotificationKind, Notifier};
pub use router::{NavigateOptions, NavigationHistory, Navigator, Route};
pub use view::{CollectionSource, CollectionView, FetchOutcome, PaginationControls, ViewStatus};
