// Unit tests for the paginated list state machine
// Covers request ordering, paging rules, failure retention and delete-then-refetch

use super::support::{FakeLedger, server_error};

use crate::error::view::ViewError;
use crate::notify::{MemoryNotifier, NotificationKind};
use crate::view::{CollectionView, FetchOutcome, ViewStatus, format_currency};

use models::ListQuery;

fn view_over(ledger: &FakeLedger) -> CollectionView<FakeLedger, MemoryNotifier> {
    CollectionView::new(ledger.clone(), MemoryNotifier::new(), 9).unwrap()
}

fn query(page: u32, search: &str) -> ListQuery {
    ListQuery::new(page, 9, search).unwrap()
}

// ============================================
// INITIAL LOAD
// ============================================

/// **VALUE**: Verifies the first screen of the list: rows, total and pager.
///
/// **WHY THIS MATTERS**: This is what every user sees after signing in. The total
/// is the server-side sum over all matching rows, not the visible nine.
///
/// **BUG THIS CATCHES**: Would catch summing only the visible page, or a pager
/// that allows "Previous" on page 1.
#[tokio::test]
async fn given_25_entries_when_loaded_then_shows_9_rows_total_and_three_pages() {
    // GIVEN: 25 entries of 18.00 each (450 in total)
    let ledger = FakeLedger::with_entries(25, 18.0);
    let mut view = view_over(&ledger);
    assert_eq!(view.status(), ViewStatus::Idle);

    // WHEN: Loading the default query
    let outcome = view.load().await;

    // THEN: First page of nine rows with the filtered total
    assert_eq!(outcome, Some(FetchOutcome::Applied));
    assert_eq!(ledger.last_query(), Some(query(1, "")));
    assert_eq!(view.status(), ViewStatus::Loaded);
    assert_eq!(view.items().len(), 9);
    assert_eq!(view.total_amount().map(format_currency), Some(String::from("$450")));

    let pager = view.pagination();
    let numbers: Vec<u32> = pager.pages.iter().map(|button| button.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(pager.active_page(), Some(1));
    assert!(!pager.previous_enabled);
    assert!(pager.next_enabled);
}

/// **VALUE**: Verifies an identical query is not fetched twice concurrently.
///
/// **BUG THIS CATCHES**: Would catch re-render loops that spam the API with the
/// same request while one is still outstanding.
#[test]
fn given_query_in_flight_when_requested_again_then_no_duplicate_ticket() {
    let ledger = FakeLedger::with_entries(3, 1.0);
    let mut view = view_over(&ledger);

    let first = view.request();
    let second = view.request();

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(view.status(), ViewStatus::Loading);
}

// ============================================
// REQUEST ORDERING
// ============================================

/// **VALUE**: Verifies last-request-wins when responses arrive out of order.
///
/// **WHY THIS MATTERS**: Typing a search quickly issues several fetches. A slow
/// answer for an old term must never overwrite the rows for the newest term.
///
/// **BUG THIS CATCHES**: Would catch applying responses in arrival order.
#[test]
fn given_two_queries_when_older_response_arrives_last_then_it_is_discarded() {
    // GIVEN: A fetch for page 1, superseded by a search
    let ledger = FakeLedger::with_entries(20, 5.0);
    ledger.push("groceries", 40.0);
    let mut view = view_over(&ledger);

    let stale = view.request().unwrap();
    let current = view.set_search_term("groceries").unwrap();
    assert!(current.generation() > stale.generation());

    // WHEN: The newer response lands first, then the older one
    let current_result = ledger.page_for(current.query());
    let stale_result = ledger.page_for(stale.query());
    let applied = view.receive(current, Ok(current_result));
    let discarded = view.receive(stale, Ok(stale_result));

    // THEN: Only the search result is displayed
    assert_eq!(applied, FetchOutcome::Applied);
    assert_eq!(discarded, FetchOutcome::Discarded);
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].label, "groceries");
    assert_eq!(view.total_amount(), Some(40.0));
}

/// **VALUE**: Verifies a stale response arriving first leaves the view loading.
///
/// **BUG THIS CATCHES**: Would catch a stale response flipping status to Loaded
/// while the current request is still outstanding.
#[test]
fn given_two_queries_when_older_response_arrives_first_then_still_loading() {
    let ledger = FakeLedger::with_entries(20, 5.0);
    let mut view = view_over(&ledger);

    let stale = view.request().unwrap();
    let current = view.set_search_term("entry-1").unwrap();

    let stale_result = ledger.page_for(stale.query());
    assert_eq!(view.receive(stale, Ok(stale_result)), FetchOutcome::Discarded);
    assert_eq!(view.status(), ViewStatus::Loading);
    assert!(view.displayed().is_none());

    let current_result = ledger.page_for(current.query());
    assert_eq!(view.receive(current, Ok(current_result)), FetchOutcome::Applied);
    assert_eq!(view.status(), ViewStatus::Loaded);
}

/// **VALUE**: Verifies a stale failure is ignored too.
///
/// **BUG THIS CATCHES**: Would catch error toasts for requests the user already
/// moved away from.
#[test]
fn given_superseded_ticket_when_it_fails_then_no_notification() {
    let ledger = FakeLedger::with_entries(5, 1.0);
    let mut view = view_over(&ledger);

    let stale = view.request().unwrap();
    let _current = view.set_search_term("entry").unwrap();

    assert_eq!(view.receive(stale, Err(server_error(500))), FetchOutcome::Discarded);
    assert!(view.notifier().snapshot().is_empty());
    assert_eq!(view.status(), ViewStatus::Loading);
}

// ============================================
// SEARCH AND PAGING
// ============================================

/// **VALUE**: Verifies a search starts from page 1.
///
/// **WHY THIS MATTERS**: Keeping page 2 for a narrower result set would show an
/// empty page for any search with a single page of hits.
///
/// **BUG THIS CATCHES**: Would catch the search term being applied without
/// resetting the page.
#[tokio::test]
async fn given_page_2_when_searching_groceries_then_fetches_page_1_with_term() {
    // GIVEN: The list on page 2
    let ledger = FakeLedger::with_entries(25, 18.0);
    ledger.push("groceries", 30.0);
    let mut view = view_over(&ledger);
    view.load().await;
    assert_eq!(view.go_to_page(2).await, Some(FetchOutcome::Applied));
    assert_eq!(view.query().page(), 2);

    // WHEN: Searching
    let outcome = view.search("groceries").await;

    // THEN: The request sent is {1, 9, "groceries"}
    assert_eq!(outcome, Some(FetchOutcome::Applied));
    assert_eq!(ledger.last_query(), Some(query(1, "groceries")));
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.pagination().active_page(), Some(1));
}

/// **VALUE**: Verifies re-submitting the same search does not refetch.
#[tokio::test]
async fn given_loaded_search_when_same_term_submitted_then_no_fetch() {
    let ledger = FakeLedger::with_entries(10, 1.0);
    let mut view = view_over(&ledger);
    view.search("entry-1").await;
    let fetches = ledger.queries().len();

    assert_eq!(view.search("entry-1").await, None);
    assert_eq!(ledger.queries().len(), fetches);
}

/// **VALUE**: Verifies previous/next are no-ops at the boundaries.
///
/// **WHY THIS MATTERS**: The pager buttons are disabled at the edges; calling the
/// handlers anyway (keyboard shortcuts in the CLI) must not fetch page 0 or 4.
///
/// **BUG THIS CATCHES**: Would catch off-by-one checks on either edge.
#[tokio::test]
async fn given_first_and_last_page_when_paging_past_edges_then_no_fetch() {
    let ledger = FakeLedger::with_entries(25, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;

    // First page
    assert_eq!(view.go_to_previous().await, None);
    assert_eq!(view.go_to_page(0).await, None);

    // Last page
    assert_eq!(view.go_to_page(3).await, Some(FetchOutcome::Applied));
    assert!(!view.pagination().next_enabled);
    assert_eq!(view.go_to_next().await, None);
    assert_eq!(view.go_to_page(4).await, None);

    // Same page
    assert_eq!(view.go_to_page(3).await, None);

    let pages: Vec<u32> = ledger.queries().iter().map(ListQuery::page).collect();
    assert_eq!(pages, vec![1, 3]);
}

/// **VALUE**: Verifies paging is unavailable before the first result.
#[test]
fn given_nothing_loaded_when_changing_page_then_ignored() {
    let ledger = FakeLedger::with_entries(25, 1.0);
    let mut view = view_over(&ledger);

    assert!(view.set_page(2).is_none());
    assert!(view.next_page().is_none());
    assert!(view.pagination().pages.is_empty());
}

/// **VALUE**: Verifies next/previous step one page at a time.
#[tokio::test]
async fn given_middle_page_when_stepping_then_moves_by_one() {
    let ledger = FakeLedger::with_entries(25, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;

    view.go_to_next().await;
    assert_eq!(view.query().page(), 2);
    let pager = view.pagination();
    assert!(pager.previous_enabled);
    assert!(pager.next_enabled);

    view.go_to_previous().await;
    assert_eq!(view.query().page(), 1);
}

/// **VALUE**: Verifies a page size change starts over from page 1.
#[tokio::test]
async fn given_page_2_when_page_size_changes_then_fetches_page_1() {
    let ledger = FakeLedger::with_entries(25, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;
    view.go_to_page(2).await;

    let outcome = view.change_page_size(20).await.unwrap();

    assert_eq!(outcome, Some(FetchOutcome::Applied));
    assert_eq!(ledger.last_query(), Some(ListQuery::new(1, 20, "").unwrap()));
    assert_eq!(view.pagination().pages.len(), 2);
}

/// **VALUE**: Verifies a zero page size is rejected without touching the query.
#[tokio::test]
async fn given_zero_page_size_when_changed_then_validation_error() {
    let ledger = FakeLedger::with_entries(5, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;

    assert!(view.change_page_size(0).await.is_err());
    assert_eq!(view.query().page_size(), 9);
}

// ============================================
// FAILURES
// ============================================

/// **VALUE**: Verifies a failed fetch keeps the last rows on screen.
///
/// **WHY THIS MATTERS**: A flaky connection should not blank the table; the user
/// keeps working with what they saw and gets an error toast.
///
/// **BUG THIS CATCHES**: Would catch clearing `items` on error.
#[tokio::test]
async fn given_loaded_page_when_next_fetch_fails_then_rows_retained_and_error_notified() {
    // GIVEN: Page 1 loaded
    let ledger = FakeLedger::with_entries(25, 18.0);
    let mut view = view_over(&ledger);
    view.load().await;
    let before: Vec<u32> = view.items().iter().map(|entry| entry.id).collect();

    // WHEN: The next page fails
    ledger.set_fetch_failure(true);
    let outcome = view.go_to_next().await;

    // THEN: Old rows and total stay, status is Failed, one error toast
    assert_eq!(outcome, Some(FetchOutcome::Failed));
    assert_eq!(view.status(), ViewStatus::Failed);
    let after: Vec<u32> = view.items().iter().map(|entry| entry.id).collect();
    assert_eq!(before, after);
    assert_eq!(view.total_amount(), Some(450.0));

    let notifications = view.notifier().snapshot();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].title, "Error!");
    assert_eq!(notifications[0].text, "Failed to fetch transactions.");
}

/// **VALUE**: Verifies the failed page can be retried.
///
/// **BUG THIS CATCHES**: Would catch the "same page" no-op blocking a retry after
/// an error.
#[tokio::test]
async fn given_failed_page_change_when_same_page_selected_again_then_refetches() {
    let ledger = FakeLedger::with_entries(25, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;

    ledger.set_fetch_failure(true);
    view.go_to_page(2).await;
    assert_eq!(view.pagination().active_page(), Some(2));

    ledger.set_fetch_failure(false);
    let outcome = view.go_to_page(2).await;

    assert_eq!(outcome, Some(FetchOutcome::Applied));
    assert_eq!(view.items()[0].id, 10);
}

/// **VALUE**: Verifies a first load failure leaves an empty, failed view.
#[tokio::test]
async fn given_no_data_when_first_load_fails_then_failed_and_empty() {
    let ledger = FakeLedger::with_entries(5, 1.0);
    ledger.set_fetch_failure(true);
    let mut view = view_over(&ledger);

    assert_eq!(view.load().await, Some(FetchOutcome::Failed));
    assert!(view.items().is_empty());
    assert_eq!(view.total_amount(), None);

    // A plain reload is allowed after failure
    ledger.set_fetch_failure(false);
    assert_eq!(view.load().await, Some(FetchOutcome::Applied));
    assert_eq!(view.items().len(), 5);
}

// ============================================
// DELETE
// ============================================

/// **VALUE**: Verifies delete refetches the current query and toasts success.
///
/// **WHY THIS MATTERS**: Rows shift up from the next page after a delete; only a
/// refetch shows the right nine rows and the new total.
///
/// **BUG THIS CATCHES**: Would catch splicing the row out locally instead of
/// reloading from the server.
#[tokio::test]
async fn given_loaded_page_when_row_deleted_then_refetched_and_success_notified() {
    let ledger = FakeLedger::with_entries(25, 18.0);
    let mut view = view_over(&ledger);
    view.load().await;

    let outcome = view.delete_row(0).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(ledger.removed(), vec![1]);
    assert_eq!(ledger.queries(), vec![query(1, ""), query(1, "")]);
    assert_eq!(view.items()[0].id, 2);
    assert_eq!(view.items().len(), 9);
    assert_eq!(view.total_amount(), Some(432.0));

    let notifications = view.notifier().snapshot();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(notifications[0].title, "Deleted!");
    assert_eq!(notifications[0].text, "Transaction deleted successfully!");
}

/// **VALUE**: Verifies a failed delete leaves the table untouched.
///
/// **BUG THIS CATCHES**: Would catch optimistic removal that is never rolled back.
#[tokio::test]
async fn given_remove_fails_when_deleting_row_then_row_stays_and_error_notified() {
    let ledger = FakeLedger::with_entries(25, 18.0);
    let mut view = view_over(&ledger);
    view.load().await;
    let fetches = ledger.queries().len();

    ledger.set_remove_failure(true);
    let result = view.delete_row(0).await;

    assert!(matches!(result, Err(ViewError::Api(_))));
    assert_eq!(ledger.len(), 25);
    assert_eq!(view.items()[0].id, 1);
    assert_eq!(view.items().len(), 9);
    assert_eq!(ledger.queries().len(), fetches);

    let notifications = view.notifier().snapshot();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].text, "Failed to delete transaction.");
}

/// **VALUE**: Verifies deleting the last row of the last page lands on a real page.
///
/// **WHY THIS MATTERS**: Refetching page 3 after it ceased to exist would show an
/// empty table with a pager pointing at a page that is not there.
///
/// **BUG THIS CATCHES**: Would catch displaying the past-the-end response
/// instead of clamping to the new last page.
#[tokio::test]
async fn given_single_row_on_page_3_of_3_when_deleted_then_displays_page_2() {
    // GIVEN: 19 entries, so page 3 holds exactly one row
    let ledger = FakeLedger::with_entries(19, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;
    view.go_to_page(3).await;
    assert_eq!(view.items().len(), 1);

    // WHEN: Deleting that row
    let outcome = view.delete_row(0).await.unwrap();

    // THEN: Page 3 was refetched, found empty, and page 2 is displayed
    assert_eq!(outcome, FetchOutcome::Applied);
    let pages: Vec<u32> = ledger.queries().iter().map(ListQuery::page).collect();
    assert_eq!(pages, vec![1, 3, 3, 2]);
    assert_eq!(view.query().page(), 2);
    assert_eq!(view.items().len(), 9);

    let pager = view.pagination();
    assert_eq!(pager.pages.len(), 2);
    assert_eq!(pager.active_page(), Some(2));
    assert!(!pager.next_enabled);
}

/// **VALUE**: Verifies deleting the only row leaves an empty first page.
#[tokio::test]
async fn given_single_row_when_deleted_then_empty_first_page() {
    let ledger = FakeLedger::with_entries(1, 5.0);
    let mut view = view_over(&ledger);
    view.load().await;

    let outcome = view.delete_row(0).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Applied);
    assert!(view.items().is_empty());
    assert_eq!(view.query().page(), 1);
    assert_eq!(view.total_amount(), Some(0.0));
    assert!(!view.pagination().previous_enabled);
}

/// **VALUE**: Verifies row actions only accept visible rows.
#[tokio::test]
async fn given_three_rows_when_deleting_row_5_then_row_not_visible() {
    let ledger = FakeLedger::with_entries(3, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;

    let result = view.delete_row(4).await;

    assert!(matches!(result, Err(ViewError::RowNotVisible { .. })));
    assert!(ledger.removed().is_empty());
}

// ============================================
// CLAMPING IN THE EVENT-LOOP API
// ============================================

/// **VALUE**: Verifies `receive` redirects past-the-end pages with a fresh ticket.
///
/// **BUG THIS CATCHES**: Would catch the redirect reusing the old generation, which
/// would let a late duplicate of the page-3 answer through.
#[tokio::test]
async fn given_ticket_for_missing_page_when_received_then_redirects_to_last_page() {
    let ledger = FakeLedger::with_entries(19, 1.0);
    let mut view = view_over(&ledger);
    view.load().await;
    let ticket = view.set_page(3).unwrap();

    // Entries vanish elsewhere before the answer is computed
    for id in 1..=5 {
        ledger.remove_now(id);
    }
    let answer = ledger.page_for(ticket.query());
    let stale_duplicate = ledger.page_for(ticket.query());

    let outcome = view.receive(ticket.clone(), Ok(answer));
    let FetchOutcome::Redirected(next) = outcome else {
        panic!("expected a redirect, got {outcome:?}");
    };
    assert_eq!(next.query().page(), 2);
    assert!(next.generation() > ticket.generation());
    assert_eq!(view.receive(ticket, Ok(stale_duplicate)), FetchOutcome::Discarded);

    let result = ledger.page_for(next.query());
    assert_eq!(view.receive(next, Ok(result)), FetchOutcome::Applied);
    assert_eq!(view.pagination().active_page(), Some(2));
}
