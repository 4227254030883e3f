use models::Session;

use std::sync::Arc;

use log::info;
use tokio::sync::watch;

/// Explicit handle to the process-wide session.
///
/// Created once at startup and passed to whatever needs it; clones share
/// the same state. Observers get change notifications through
/// [`subscribe`](SessionContext::subscribe).
#[derive(Clone)]
pub struct SessionContext {
    sender: Arc<watch::Sender<Session>>,
}

impl SessionContext {
    /// New context in the unresolved loading state.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Session::loading());
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> Session {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    /// Finish the loading phase with what was found in storage.
    pub fn resolve(&self, username: Option<String>) {
        match username {
            Some(username) => self.sign_in(username),
            None => {
                info!("Session resolved: not signed in");
                self.sender.send_replace(Session::anonymous());
            }
        }
    }

    pub fn sign_in(&self, username: impl Into<String>) {
        let username = username.into();
        info!("Session signed in as {username}");
        self.sender.send_replace(Session::authenticated(username));
    }

    pub fn sign_out(&self) {
        info!("Session signed out");
        self.sender.send_replace(Session::anonymous());
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
