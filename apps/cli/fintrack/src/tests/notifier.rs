use crate::notifier::{AppNotifier, TerminalNotifier};

use client_core::notify::{Notification, Notifier};

#[test]
fn given_success_notification_when_formatted_then_check_mark_and_texts() {
    let line = TerminalNotifier::format(&Notification::success("Deleted!", "Transaction deleted successfully!"));

    assert_eq!(line, "✓ Deleted! Transaction deleted successfully!");
}

#[test]
fn given_error_notification_when_formatted_then_cross_marker() {
    let line = TerminalNotifier::format(&Notification::error("Error!", "Failed to fetch transactions."));

    assert_eq!(line, "✗ Error! Failed to fetch transactions.");
}

/// **VALUE**: JSON runs collect notifications instead of printing them.
///
/// **WHY THIS MATTERS**: A toast on stderr is lost to scripts reading the
/// JSON envelope, and a toast on stdout would corrupt it.
///
/// **BUG THIS CATCHES**: Would catch `for_output(true)` returning the
/// terminal notifier, or `take_buffered` not emptying the buffer.
#[test]
fn given_json_output_when_notified_then_buffered_and_drained_once() {
    // GIVEN: A notifier for JSON output
    let notifier = AppNotifier::for_output(true);

    // WHEN: Two notifications arrive, through a clone
    notifier.notify(Notification::success("Updated!", "Transaction updated successfully!"));
    notifier.clone().notify(Notification::error("Error!", "Failed to delete transaction."));

    // THEN: Both are drained in order, and a second drain is empty
    let drained = notifier.take_buffered();
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].title, "Updated!");
    assert_eq!(drained[1].text, "Failed to delete transaction.");
    assert!(notifier.take_buffered().is_empty());
}

#[test]
fn given_text_output_when_taking_buffered_then_always_empty() {
    let notifier = AppNotifier::for_output(false);

    notifier.notify(Notification::warning("Heads up", "shown on stderr"));

    assert!(notifier.take_buffered().is_empty());
}
