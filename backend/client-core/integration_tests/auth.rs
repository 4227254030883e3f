// Integration tests for AuthService: login, register, logout and restore
// against a wiremock auth endpoint and a temp-dir token store

use crate::helpers::{TEST_TOKEN, client_for, page_json};

use client_core::error::AuthError;
use client_core::{AuthService, SessionContext, TokenStore};

use models::{AccessToken, Credentials, ListQuery, Registration, Session};

use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer, dir: &TempDir) -> AuthService {
    AuthService::new(client_for(server), SessionContext::new(), TokenStore::new(dir.path()))
}

async fn mount_login(server: &MockServer, status: u16) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer"
        }))
    } else {
        ResponseTemplate::new(status).set_body_string("Incorrect username or password")
    };

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies a successful login signs in, persists, and authorizes calls.
///
/// **WHY THIS MATTERS**: All three must happen together; a token on disk with no
/// bearer header, or the reverse, leaves the user half signed in.
#[tokio::test]
async fn given_valid_credentials_when_logging_in_then_session_token_and_store_updated() {
    // GIVEN: An auth endpoint and a list endpoint requiring the token
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, 200).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 0.0, 0, 1, 9, 0)))
        .expect(1)
        .mount(&server)
        .await;
    let auth = service(&server, &dir);
    auth.restore();

    // WHEN: Logging in
    auth.login(&Credentials::new("alice", "secret").unwrap()).await.unwrap();

    // THEN: Signed in, stored, and the next call carries the bearer token
    assert_eq!(auth.session().current(), Session::authenticated("alice"));
    let stored = auth.store().load().unwrap().unwrap();
    assert_eq!(stored.username, "alice");
    assert_eq!(stored.token.access_token.expose(), TEST_TOKEN);
    auth.client()
        .list_transactions(&ListQuery::first_page(9).unwrap())
        .await
        .unwrap();
}

/// **VALUE**: Verifies a 401 is reported as rejected credentials.
///
/// **BUG THIS CATCHES**: Would catch signing in (or writing a store file) when the
/// server refused the credentials.
#[tokio::test]
async fn given_wrong_password_when_logging_in_then_rejected_and_still_anonymous() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, 401).await;
    let auth = service(&server, &dir);
    auth.restore();

    let result = auth.login(&Credentials::new("alice", "wrong").unwrap()).await;

    match result {
        Err(AuthError::Rejected { message, .. }) => assert_eq!(message, "Incorrect username or password"),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert_eq!(auth.session().current(), Session::anonymous());
    assert!(!auth.client().has_access_token());
    assert!(!auth.store().path().exists());
}

/// **VALUE**: Verifies a 5xx on login is an API error, not a rejection.
#[tokio::test]
async fn given_server_error_when_logging_in_then_api_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, 500).await;
    let auth = service(&server, &dir);

    let result = auth.login(&Credentials::new("alice", "secret").unwrap()).await;

    assert!(matches!(result, Err(AuthError::Api(_))));
}

/// **VALUE**: Verifies register is followed by a login with the same credentials.
#[tokio::test]
async fn given_new_account_when_registering_then_signed_in() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": Uuid::new_v4(),
            "username": "carol",
            "email": "carol@example.com",
            "is_active": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_login(&server, 200).await;
    let auth = service(&server, &dir);

    let user = auth
        .register(&Registration::new("carol", "carol@example.com", "secret").unwrap())
        .await
        .unwrap();

    assert_eq!(user.username, "carol");
    assert_eq!(auth.session().current(), Session::authenticated("carol"));
    assert!(auth.client().has_access_token());
}

/// **VALUE**: Verifies a failed registration never attempts a login.
#[tokio::test]
async fn given_taken_username_when_registering_then_error_and_no_login() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Username already registered"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let auth = service(&server, &dir);
    auth.restore();

    let result = auth
        .register(&Registration::new("carol", "carol@example.com", "secret").unwrap())
        .await;

    assert!(matches!(result, Err(AuthError::Api(_))));
    assert_eq!(auth.session().current(), Session::anonymous());
}

/// **VALUE**: Verifies logout clears memory, store and header.
#[tokio::test]
async fn given_signed_in_when_logging_out_then_everything_cleared() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server, 200).await;
    let auth = service(&server, &dir);
    auth.login(&Credentials::new("alice", "secret").unwrap()).await.unwrap();

    auth.logout().unwrap();

    assert_eq!(auth.session().current(), Session::anonymous());
    assert!(!auth.client().has_access_token());
    assert!(auth.store().load().unwrap().is_none());
}

/// **VALUE**: Verifies the next run starts signed in from the stored token.
///
/// **WHY THIS MATTERS**: Without restore, every CLI invocation would need a login.
#[tokio::test]
async fn given_stored_session_when_restored_then_authenticated_with_bearer() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    TokenStore::new(dir.path())
        .save("dave", &AccessToken::bearer(TEST_TOKEN))
        .unwrap();
    let auth = service(&server, &dir);
    assert!(auth.session().current().loading);

    let session = auth.restore();

    assert_eq!(session, Session::authenticated("dave"));
    assert!(auth.client().has_access_token());
}

/// **VALUE**: Verifies a corrupt store resolves to signed out instead of failing.
#[tokio::test]
async fn given_corrupt_store_when_restored_then_anonymous() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("session.json"), "garbage").unwrap();
    let auth = service(&server, &dir);

    let session = auth.restore();

    assert_eq!(session, Session::anonymous());
    assert!(!auth.client().has_access_token());
}
