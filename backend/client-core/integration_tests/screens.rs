// Integration tests for the form submit handlers
// Each handler must notify with the expected text and navigate only on success

use crate::helpers::{TEST_TOKEN, client_for, transaction_json};

use client_core::screens::{load_for_update, logout, submit_create, submit_login, submit_update};
use client_core::{
    AuthService, MemoryNotifier, NavigationHistory, NotificationKind, Route, SessionContext, TokenStore,
};

use models::{Credentials, TransactionDraft};

use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn draft() -> TransactionDraft {
    TransactionDraft::builder()
        .with_amount(80.0)
        .with_category("utilities")
        .with_description("electricity")
        .with_date("2026-04-01")
        .build()
        .unwrap()
}

/// **VALUE**: Verifies a created transaction toasts and returns to the list.
#[tokio::test]
async fn given_valid_draft_when_created_then_success_toast_and_list_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(Uuid::new_v4(), 80.0, "utilities")))
        .mount(&server)
        .await;
    let notifier = MemoryNotifier::new();
    let mut history = NavigationHistory::new(Route::CreateTransaction);

    submit_create(&client_for(&server), &draft(), &notifier, &mut history)
        .await
        .unwrap();

    let notifications = notifier.snapshot();
    assert_eq!(notifications[0].title, "Transaction Created!");
    assert_eq!(notifications[0].text, "Transaction created successfully!");
    assert_eq!(history.current(), Route::Transactions);
}

/// **VALUE**: Verifies a failed create stays on the form with an error toast.
///
/// **BUG THIS CATCHES**: Would catch navigating away and losing the user's input.
#[tokio::test]
async fn given_server_error_when_created_then_error_toast_and_form_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;
    let notifier = MemoryNotifier::new();
    let mut history = NavigationHistory::new(Route::CreateTransaction);

    let result = submit_create(&client_for(&server), &draft(), &notifier, &mut history).await;

    assert!(result.is_err());
    let notifications = notifier.snapshot();
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(notifications[0].text, "Failed to create transaction.");
    assert_eq!(history.current(), Route::CreateTransaction);
}

/// **VALUE**: Verifies the update flow: prefill, edit, save.
#[tokio::test]
async fn given_existing_transaction_when_loaded_and_updated_then_updated_toast() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(id, 12.5, "coffee")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(transaction_json(id, 15.0, "coffee")))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server);
    let notifier = MemoryNotifier::new();
    let mut history = NavigationHistory::new(Route::UpdateTransaction(id));

    let prefill = load_for_update(&client, id, &notifier).await.unwrap();
    let edited = prefill.with_amount(15.0).build().unwrap();
    assert_eq!(edited.category(), "coffee");
    assert_eq!(edited.date(), "2026-03-14");

    let updated = submit_update(&client, id, &edited, &notifier, &mut history).await.unwrap();

    assert_eq!(updated.amount, 15.0);
    let notifications = notifier.snapshot();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Updated!");
    assert_eq!(history.current(), Route::Transactions);
}

/// **VALUE**: Verifies missing and failing updates report the matching texts.
#[tokio::test]
async fn given_missing_transaction_when_prefilling_and_updating_then_error_texts() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let client = client_for(&server);
    let notifier = MemoryNotifier::new();
    let mut history = NavigationHistory::new(Route::UpdateTransaction(id));

    let prefill = load_for_update(&client, id, &notifier).await;
    let update = submit_update(&client, id, &draft(), &notifier, &mut history).await;

    assert!(prefill.unwrap_err().status().is_some_and(|status| status.is_not_found()));
    assert!(update.is_err());
    let texts: Vec<String> = notifier.snapshot().into_iter().map(|n| n.text).collect();
    assert_eq!(texts, vec!["Failed to fetch transaction.", "Failed to update transaction."]);
    assert_eq!(history.current(), Route::UpdateTransaction(id));
}

/// **VALUE**: Verifies login navigates to the list and logout back to login.
#[tokio::test]
async fn given_login_then_logout_when_navigating_then_list_then_login() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer"
        })))
        .mount(&server)
        .await;
    let auth = AuthService::new(client_for(&server), SessionContext::new(), TokenStore::new(dir.path()));
    let notifier = MemoryNotifier::new();
    let mut history = NavigationHistory::new(Route::Login);

    submit_login(&auth, &Credentials::new("alice", "secret").unwrap(), &notifier, &mut history)
        .await
        .unwrap();
    assert_eq!(history.current(), Route::Transactions);

    logout(&auth, &mut history).unwrap();

    assert_eq!(history.current(), Route::Login);
    assert!(!auth.session().current().is_authenticated);
    assert!(notifier.snapshot().is_empty());
}

/// **VALUE**: Verifies rejected credentials keep the user on the login screen.
#[tokio::test]
async fn given_rejected_credentials_when_submitting_login_then_error_toast_and_stay() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let auth = AuthService::new(client_for(&server), SessionContext::new(), TokenStore::new(dir.path()));
    let notifier = MemoryNotifier::new();
    let mut history = NavigationHistory::new(Route::Login);

    let result = submit_login(&auth, &Credentials::new("alice", "nope").unwrap(), &notifier, &mut history).await;

    assert!(result.is_err());
    assert_eq!(history.current(), Route::Login);
    assert_eq!(notifier.snapshot()[0].text, "Incorrect username or password.");
}
