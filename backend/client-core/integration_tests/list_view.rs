// Integration tests for the transaction list view over HTTP
// The view drives a real ApiClient against wiremock

use crate::helpers::{client_for, page_json, transaction_json, transactions};

use client_core::view::{CollectionView, FetchOutcome, ViewStatus, format_currency};
use client_core::{ApiClient, MemoryNotifier, NotificationKind};

use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn list_view(server: &MockServer) -> CollectionView<ApiClient, MemoryNotifier> {
    CollectionView::new(client_for(server), MemoryNotifier::new(), 9).unwrap()
}

/// **VALUE**: Verifies the first screen end to end: nine rows, "$450", three pages.
#[tokio::test]
async fn given_api_with_three_pages_when_loaded_then_rows_total_and_pager_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "1"))
        .and(query_param("size", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(9, 18.0), 450.0, 25, 1, 9, 3)))
        .expect(1)
        .mount(&server)
        .await;
    let mut view = list_view(&server);

    assert_eq!(view.load().await, Some(FetchOutcome::Applied));

    assert_eq!(view.items().len(), 9);
    assert_eq!(view.total_amount().map(format_currency).as_deref(), Some("$450"));
    let pager = view.pagination();
    assert_eq!(pager.pages.len(), 3);
    assert_eq!(pager.active_page(), Some(1));
    assert!(!pager.previous_enabled);
}

/// **VALUE**: Verifies deleting the last row of page 3 of 3 lands on page 2.
///
/// **WHY THIS MATTERS**: The server answers a past-the-end page with an empty list;
/// the client has to notice and step back.
#[tokio::test]
async fn given_last_row_on_page_3_when_deleted_then_page_2_displayed() {
    // GIVEN: Page 3 holds one row until it is deleted
    let server = MockServer::start().await;
    let doomed = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(9, 1.0), 19.0, 19, 1, 9, 3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![transaction_json(doomed, 1.0, "rent")],
            19.0,
            19,
            3,
            9,
            3,
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 18.0, 18, 3, 9, 2)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(9, 1.0), 18.0, 18, 2, 9, 2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/transactions/{doomed}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = list_view(&server);
    view.load().await;
    view.go_to_page(3).await;
    assert_eq!(view.items().len(), 1);

    // WHEN: Deleting the row
    let outcome = view.delete_row(0).await.unwrap();

    // THEN: Page 2 of 2 is displayed and a success toast was raised
    assert_eq!(outcome, FetchOutcome::Applied);
    assert_eq!(view.query().page(), 2);
    assert_eq!(view.items().len(), 9);
    assert_eq!(view.pagination().pages.len(), 2);
    assert_eq!(view.total_amount(), Some(18.0));

    let notifications = view.notifier().snapshot();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Deleted!");
}

/// **VALUE**: Verifies a 500 on a later page keeps the first page visible.
#[tokio::test]
async fn given_server_error_on_page_2_when_paging_then_page_1_rows_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(9, 2.0), 36.0, 18, 1, 9, 2)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut view = list_view(&server);
    view.load().await;

    let outcome = view.go_to_next().await;

    assert_eq!(outcome, Some(FetchOutcome::Failed));
    assert_eq!(view.status(), ViewStatus::Failed);
    assert_eq!(view.items().len(), 9);
    let notifications = view.notifier().snapshot();
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].text, "Failed to fetch transactions.");
}
