//! Toast-style user notifications.
//!
//! Notifications are fire-and-forget: callers never inspect a return value,
//! and a notifier must not fail the operation that triggered it.

use std::sync::{Arc, Mutex, PoisonError};

use log::{error, info, warn};

/// How long a toast stays up unless the notification says otherwise.
pub const DEFAULT_AUTO_DISMISS_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub text: String,
    pub kind: NotificationKind,
    pub auto_dismiss_ms: Option<u64>,
}

impl Notification {
    fn with_kind(kind: NotificationKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            kind,
            auto_dismiss_ms: Some(DEFAULT_AUTO_DISMISS_MS),
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_kind(NotificationKind::Success, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_kind(NotificationKind::Error, title, text)
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_kind(NotificationKind::Warning, title, text)
    }

    /// Stays up until dismissed.
    pub fn sticky(mut self) -> Self {
        self.auto_dismiss_ms = None;
        self
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Sends notifications to the `log` facade only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!("{}: {}", notification.title, notification.text),
            NotificationKind::Warning => warn!("{}: {}", notification.title, notification.text),
            NotificationKind::Error => error!("{}: {}", notification.title, notification.text),
        }
    }
}

/// Keeps every notification in memory until drained.
///
/// Used where notifications are reported in bulk (JSON output) and by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}
