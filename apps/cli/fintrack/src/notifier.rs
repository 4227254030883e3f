//! Where notifications go in a terminal session.

use client_core::notify::{MemoryNotifier, Notification, NotificationKind, Notifier};

use log::debug;

/// Prints each notification to stderr as a one-line toast.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn format(notification: &Notification) -> String {
        let marker = match notification.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Warning => "!",
            NotificationKind::Error => "✗",
        };
        format!("{marker} {} {}", notification.title, notification.text)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        debug!("Notification: {notification:?}");
        eprintln!("{}", Self::format(&notification));
    }
}

/// Terminal toasts for humans, buffered ones for `--json` output.
#[derive(Debug, Clone)]
pub enum AppNotifier {
    Terminal(TerminalNotifier),
    Buffered(MemoryNotifier),
}

impl AppNotifier {
    pub fn for_output(json: bool) -> Self {
        if json {
            AppNotifier::Buffered(MemoryNotifier::new())
        } else {
            AppNotifier::Terminal(TerminalNotifier)
        }
    }

    /// Buffered notifications, emptied. Always empty for the terminal.
    pub fn take_buffered(&self) -> Vec<Notification> {
        match self {
            AppNotifier::Terminal(_) => Vec::new(),
            AppNotifier::Buffered(memory) => memory.drain(),
        }
    }
}

impl Notifier for AppNotifier {
    fn notify(&self, notification: Notification) {
        match self {
            AppNotifier::Terminal(terminal) => terminal.notify(notification),
            AppNotifier::Buffered(memory) => memory.notify(notification),
        }
    }
}
