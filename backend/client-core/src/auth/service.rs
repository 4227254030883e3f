use crate::api_client::{ApiClient, RegisteredUser};
use crate::auth::session::SessionContext;
use crate::auth::token_store::TokenStore;
use crate::error::api_client::ApiClientError;
use crate::error::auth::AuthError;

use common::ErrorLocation;
use models::{Credentials, Registration, Session};

use std::panic::Location;

use log::{info, warn};

/// Sign-in, registration and sign-out against the auth endpoints.
///
/// Keeps three things in step: the bearer token on the [`ApiClient`], the
/// shared [`SessionContext`], and the [`TokenStore`] on disk.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    session: SessionContext,
    store: TokenStore,
}

impl AuthService {
    pub fn new(client: ApiClient, session: SessionContext, store: TokenStore) -> Self {
        Self { client, session, store }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Resolve the loading state from the stored token.
    ///
    /// An unreadable or corrupt store resolves to signed out; it never fails
    /// startup.
    pub fn restore(&self) -> Session {
        match self.store.load() {
            Ok(Some(stored)) => {
                info!("Restored session for {}", stored.username);
                self.client.set_access_token(Some(stored.token.access_token));
                self.session.resolve(Some(stored.username));
            }
            Ok(None) => self.session.resolve(None),
            Err(e) => {
                warn!("Ignoring unusable stored session: {e}");
                self.client.set_access_token(None);
                self.session.resolve(None);
            }
        }

        self.session.current()
    }

    /// Exchange credentials for a token and sign in.
    ///
    /// A 401/403 answer becomes [`AuthError::Rejected`]. Failing to persist
    /// the token only costs the next run its session, so it is logged and
    /// the in-memory sign-in still happens.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let token = self.client.login(credentials).await.map_err(rejection)?;

        if let Err(e) = self.store.save(credentials.username(), &token) {
            warn!("Signed in but could not persist the session: {e}");
        }

        self.client.set_access_token(Some(token.access_token));
        self.session.sign_in(credentials.username());
        Ok(())
    }

    /// Create the account, then sign in with the same credentials.
    pub async fn register(&self, registration: &Registration) -> Result<RegisteredUser, AuthError> {
        let user = self.client.register(registration).await?;
        info!("Registered user {}", user.username);

        self.login(registration.credentials()).await?;
        Ok(user)
    }

    /// Forget the token in memory and on disk.
    ///
    /// The in-memory session is always cleared, even if the stored file
    /// cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.client.set_access_token(None);
        self.session.sign_out();
        self.store.clear()
    }
}

#[track_caller]
fn rejection(error: ApiClientError) -> AuthError {
    match error.status() {
        Some(status) if status.is_auth_rejection() => {
            let message = match &error {
                ApiClientError::Server { message, .. } if !message.is_empty() => message.clone(),
                _ => String::from("Incorrect username or password"),
            };
            AuthError::Rejected {
                message,
                location: ErrorLocation::from(Location::caller()),
            }
        }
        _ => AuthError::Api(error),
    }
}
