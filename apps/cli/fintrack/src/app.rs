//! Per-invocation application context.

use crate::cli::ListArgs;
use crate::error::FintrackError;
use crate::notifier::AppNotifier;
use crate::output::OutputFormat;

use client_core::config::AppConfig;
use client_core::view::CollectionView;
use client_core::{Access, ApiClient, AuthService, NavigateOptions, NavigationHistory, Navigator, Route, SessionContext, SessionGuard, TokenStore};

use common::ErrorLocation;
use models::ListQuery;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};

/// Everything a command needs: config, the signed-in client, navigation
/// state, and where notifications go.
pub struct App {
    config: AppConfig,
    config_dir: PathBuf,
    auth: AuthService,
    guard: SessionGuard,
    history: NavigationHistory,
    notifier: AppNotifier,
    output: OutputFormat,
}

impl App {
    /// Load config, build the API client, and restore the stored session.
    pub fn bootstrap(config_dir: &Path, output: OutputFormat) -> Result<Self, FintrackError> {
        let mut config = AppConfig::load(config_dir)?;
        config.apply_env_overrides()?;

        let client = ApiClient::with_timeout(
            &config.server.base_url,
            Duration::from_secs(config.server.timeout_secs),
        )?;
        info!("Using API at {}", client.base_url());

        let auth = AuthService::new(client, SessionContext::new(), TokenStore::new(config_dir));
        let session = auth.restore();

        let initial = if session.is_authenticated {
            Route::Transactions
        } else {
            Route::Login
        };

        Ok(Self {
            config,
            config_dir: config_dir.to_path_buf(),
            auth,
            guard: SessionGuard::new(),
            history: NavigationHistory::new(initial),
            notifier: AppNotifier::for_output(output == OutputFormat::Json),
            output,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn client(&self) -> &ApiClient {
        self.auth.client()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn notifier(&self) -> &AppNotifier {
        &self.notifier
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    /// Split borrow for the screen handlers, which need both at once.
    pub fn auth_and_history(&mut self) -> (&AuthService, &AppNotifier, &mut NavigationHistory) {
        (&self.auth, &self.notifier, &mut self.history)
    }

    /// Client, notifier and history for the transaction form handlers.
    pub fn client_and_history(&mut self) -> (&ApiClient, &AppNotifier, &mut NavigationHistory) {
        (self.auth.client(), &self.notifier, &mut self.history)
    }

    /// Run the session guard for `route` and enter it when granted.
    #[track_caller]
    pub fn enter(&mut self, route: Route) -> Result<(), FintrackError> {
        let session = self.auth.session().current();

        match self.guard.enforce(&session, route, (), &mut self.history) {
            Access::Granted(()) => {
                if self.history.current() != route {
                    self.history.navigate(route, NavigateOptions::default());
                }
                debug!("Entered {route}");
                Ok(())
            }
            Access::Loading => Err(FintrackError::NotSignedIn {
                message: String::from("Session is still being restored"),
                location: ErrorLocation::from(Location::caller()),
            }),
            Access::Redirected(_) => Err(FintrackError::NotSignedIn {
                message: String::from("Not signed in. Run `fintrack login <username>` first."),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// List view for the given arguments, page size defaulting to config.
    #[track_caller]
    pub fn list_view(&self, args: &ListArgs) -> Result<CollectionView<ApiClient, AppNotifier>, FintrackError> {
        let page_size = args.size.unwrap_or(self.config.list.page_size);
        let query = ListQuery::new(args.page, page_size, args.search.clone().unwrap_or_default())?;

        Ok(CollectionView::with_query(
            self.client().clone(),
            self.notifier.clone(),
            query,
        ))
    }
}
