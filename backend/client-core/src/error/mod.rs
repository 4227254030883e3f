pub mod api_client;
pub mod auth;
pub mod config;
pub mod view;

pub use api_client::ApiClientError;
pub use auth::AuthError;
pub use config::ConfigError;
pub use view::ViewError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Model(#[from] models::ModelError),
}
