use crate::router::{NavigateOptions, Navigator, Route};

use models::Session;

use log::debug;

/// Result of guarding a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<P> {
    /// Session not resolved yet; show a placeholder and decide later.
    Loading,
    /// Render the view with its original props.
    Granted(P),
    /// Not signed in; the caller was sent to this route.
    Redirected(Route),
}

impl<P> Access<P> {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Gate in front of every protected route.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    login_route: Route,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self {
            login_route: Route::Login,
        }
    }

    pub fn with_login_route(login_route: Route) -> Self {
        Self { login_route }
    }

    /// Pure decision; performs no navigation.
    pub fn decide<P>(&self, session: &Session, props: P) -> Access<P> {
        if session.loading {
            return Access::Loading;
        }

        if !session.is_authenticated {
            return Access::Redirected(self.login_route);
        }

        Access::Granted(props)
    }

    /// Decide, and on redirect replace the current history entry with the
    /// login route so "back" cannot return to the protected view.
    pub fn enforce<P, R: Navigator>(
        &self,
        session: &Session,
        attempted: Route,
        props: P,
        navigator: &mut R,
    ) -> Access<P> {
        let access = self.decide(session, props);

        if let Access::Redirected(route) = &access {
            debug!("Access to {attempted} denied, redirecting to {route}");
            navigator.navigate(*route, NavigateOptions::replace());
        }

        access
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}
