/// Authentication status of the current user agent.
///
/// Starts out `loading` until the stored credentials have been checked; no
/// access decision is final while `loading` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub loading: bool,
    pub username: Option<String>,
}

impl Session {
    /// Unresolved session at application start.
    pub fn loading() -> Self {
        Self {
            is_authenticated: false,
            loading: true,
            username: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            loading: false,
            username: None,
        }
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            loading: false,
            username: Some(username.into()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.loading
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::loading()
    }
}
