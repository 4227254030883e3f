// Integration tests for the REST client against a wiremock server
// Covers the query string, bearer header, body encodings and error mapping

use crate::helpers::{TEST_TOKEN, client_for, page_json, transaction_json, transactions};

use client_core::error::ApiClientError;

use common::{HttpStatusCode, RedactedSecret};
use models::{Credentials, ListQuery, Registration, TransactionDraft};

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the list request carries page and size and no empty search.
///
/// **WHY THIS MATTERS**: The API treats `search=` as a filter on the empty string
/// in some deployments; omitting it keeps "no search" unambiguous.
///
/// **BUG THIS CATCHES**: Would catch sending `page_size` instead of `size`, or a
/// blank `search` parameter.
#[tokio::test]
async fn given_default_query_when_listing_then_sends_page_and_size_only() {
    // GIVEN: A server expecting page 1 of size 9
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "1"))
        .and(query_param("size", "9"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(9, 50.0), 450.0, 25, 1, 9, 3)))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Listing
    let client = client_for(&server);
    let result = client.list_transactions(&ListQuery::first_page(9).unwrap()).await.unwrap();

    // THEN: Page metadata mapped from the body
    assert_eq!(result.items.len(), 9);
    assert_eq!(result.total_amount, 450.0);
    assert_eq!(result.total_items, 25);
    assert_eq!(result.total_pages, 3);
    assert_eq!(result.page, 1);
}

/// **VALUE**: Verifies the search term is trimmed and sent.
#[tokio::test]
async fn given_search_term_when_listing_then_search_param_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "1"))
        .and(query_param("search", "coffee beans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0.0, 0, 1, 9, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListQuery::first_page(9).unwrap().with_search_term("  coffee beans ");
    let result = client_for(&server).list_transactions(&query).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(result.total_pages, 0);
}

/// **VALUE**: Verifies a set token is sent as a bearer header on every call.
///
/// **BUG THIS CATCHES**: Would catch a clone of the client not seeing the token
/// set through another handle.
#[tokio::test]
async fn given_token_set_on_clone_when_fetching_then_bearer_header_sent() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/transactions/{id}")))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(id, 12.5, "coffee")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let other_handle = client.clone();
    other_handle.set_access_token(Some(RedactedSecret::new(TEST_TOKEN)));

    let transaction = client.get_transaction(id).await.unwrap();

    assert!(client.has_access_token());
    assert_eq!(transaction.id, id);
    assert_eq!(transaction.category, "coffee");
}

/// **VALUE**: Verifies non-2xx answers become `Server` errors with the status.
#[tokio::test]
async fn given_401_when_listing_then_server_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Not authenticated"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_transactions(&ListQuery::first_page(9).unwrap())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(HttpStatusCode(401)));
    match error {
        ApiClientError::Server { message, .. } => assert_eq!(message, "Not authenticated"),
        other => panic!("expected Server error, got {other:?}"),
    }
}

/// **VALUE**: Verifies a malformed body is a JSON error, not a panic.
#[tokio::test]
async fn given_malformed_body_when_listing_then_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .list_transactions(&ListQuery::first_page(9).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(error, ApiClientError::Json { .. }));
    assert_eq!(error.status(), None);
}

/// **VALUE**: Verifies an unreachable server is an HTTP error.
#[tokio::test]
async fn given_server_gone_when_listing_then_http_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let error = client
        .list_transactions(&ListQuery::first_page(9).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(error, ApiClientError::Http { .. }));
}

/// **VALUE**: Verifies login uses the OAuth2 password form encoding.
///
/// **WHY THIS MATTERS**: The auth endpoint only accepts form fields; a JSON body
/// gets a 422 and the user can never sign in.
#[tokio::test]
async fn given_credentials_when_logging_in_then_form_body_sent_and_token_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=alice"))
        .and(body_string_contains("password=p%40ss+word"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::new("alice", "p@ss word").unwrap();
    let token = client_for(&server).login(&credentials).await.unwrap();

    assert_eq!(token.access_token.expose(), TEST_TOKEN);
    assert_eq!(token.token_type, "bearer");
}

/// **VALUE**: Verifies registration posts JSON with all three fields.
#[tokio::test]
async fn given_registration_when_registering_then_json_body_sent() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "username": "alice",
            "email": "alice@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registration = Registration::new("alice", "alice@example.com", "secret").unwrap();
    let user = client_for(&server).register(&registration).await.unwrap();

    assert_eq!(user.id, id);
    assert!(user.is_active);
}

/// **VALUE**: Verifies create, update and delete hit the right verbs and paths.
#[tokio::test]
async fn given_draft_when_creating_updating_and_deleting_then_expected_requests() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    let draft = TransactionDraft::builder()
        .with_amount(42.0)
        .with_category("fuel")
        .with_date("2026-03-14")
        .build()
        .unwrap();
    let expected_body = json!({
        "amount": 42.0,
        "category": "fuel",
        "description": "",
        "is_income": false,
        "date": "2026-03-14"
    });

    Mock::given(method("POST"))
        .and(path("/transactions"))
        .and(body_json(expected_body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(id, 42.0, "fuel")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/transactions/{id}")))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(id, 42.0, "fuel")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.create_transaction(&draft).await.unwrap().id, id);
    assert_eq!(client.update_transaction(id, &draft).await.unwrap().amount, 42.0);
    client.delete_transaction(id).await.unwrap();
}

/// **VALUE**: Verifies a base URL with a path prefix keeps the prefix.
///
/// **BUG THIS CATCHES**: Would catch `Url::join` dropping `/api` when the base URL
/// has no trailing slash.
#[tokio::test]
async fn given_base_url_with_path_when_listing_then_prefix_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0.0, 0, 1, 9, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_core::ApiClient::new(&format!("{}/api", server.uri())).unwrap();

    client.list_transactions(&ListQuery::first_page(9).unwrap()).await.unwrap();
    assert_eq!(client.base_url().path(), "/api/");
}
