use crate::api_client::RegisteredUser;
use crate::auth::AuthService;
use crate::error::auth::AuthError;
use crate::notify::{Notification, Notifier};
use crate::router::{NavigateOptions, Navigator, Route};

use models::{Credentials, Registration};

use log::warn;

/// Login form. Stays on the login screen when it fails.
pub async fn submit_login<N: Notifier, R: Navigator>(
    auth: &AuthService,
    credentials: &Credentials,
    notifier: &N,
    navigator: &mut R,
) -> Result<(), AuthError> {
    match auth.login(credentials).await {
        Ok(()) => {
            navigator.navigate(Route::Transactions, NavigateOptions::default());
            Ok(())
        }
        Err(e) => {
            warn!("Login failed: {e}");
            let text = match &e {
                AuthError::Rejected { .. } => "Incorrect username or password.",
                _ => "Login failed.",
            };
            notifier.notify(Notification::error("Error!", text));
            Err(e)
        }
    }
}

/// Register form: creates the account and signs in with it.
pub async fn submit_register<N: Notifier, R: Navigator>(
    auth: &AuthService,
    registration: &Registration,
    notifier: &N,
    navigator: &mut R,
) -> Result<RegisteredUser, AuthError> {
    match auth.register(registration).await {
        Ok(user) => {
            navigator.navigate(Route::Transactions, NavigateOptions::default());
            Ok(user)
        }
        Err(e) => {
            warn!("Registration failed: {e}");
            notifier.notify(Notification::error("Error!", "Registration failed."));
            Err(e)
        }
    }
}

/// Logout button. Always ends on the login screen.
pub fn logout<R: Navigator>(auth: &AuthService, navigator: &mut R) -> Result<(), AuthError> {
    let result = auth.logout();
    navigator.navigate(Route::Login, NavigateOptions::replace());
    result
}
