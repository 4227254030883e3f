//! Screens of the application and the navigation history between them.

use std::fmt;

use log::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, which always forwards to the transaction list.
    Home,
    Login,
    Register,
    Transactions,
    CreateTransaction,
    UpdateTransaction(Uuid),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => String::from("/"),
            Route::Login => String::from("/login"),
            Route::Register => String::from("/register"),
            Route::Transactions => String::from("/read-transaction"),
            Route::CreateTransaction => String::from("/create-transaction"),
            Route::UpdateTransaction(id) => format!("/update-transaction/{id}"),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/read-transaction" => Some(Route::Transactions),
            "/create-transaction" => Some(Route::CreateTransaction),
            _ => trimmed
                .strip_prefix("/update-transaction/")
                .and_then(|id| Uuid::parse_str(id).ok())
                .map(Route::UpdateTransaction),
        }
    }

    /// Everything except the login and register screens needs a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Overwrite the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route, options: NavigateOptions);
}

impl<T: Navigator + ?Sized> Navigator for &mut T {
    fn navigate(&mut self, route: Route, options: NavigateOptions) {
        (**self).navigate(route, options)
    }
}

/// In-memory history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<Route>,
}

impl NavigationHistory {
    pub fn new(initial: Route) -> Self {
        let mut history = Self { entries: Vec::new() };
        history.navigate(initial, NavigateOptions::default());
        history
    }

    pub fn current(&self) -> Route {
        self.entries.last().copied().unwrap_or(Route::Transactions)
    }

    pub fn entries(&self) -> &[Route] {
        &self.entries
    }

    /// Pop the current entry. The first entry is never popped.
    pub fn back(&mut self) -> Option<Route> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        self.entries.last().copied()
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&mut self, route: Route, options: NavigateOptions) {
        let (route, replace) = match route {
            Route::Home => (Route::Transactions, true),
            other => (other, options.replace),
        };

        debug!("Navigate to {route} (replace: {replace})");

        if replace {
            if let Some(current) = self.entries.last_mut() {
                *current = route;
                return;
            }
        }
        self.entries.push(route);
    }
}
