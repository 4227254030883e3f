use crate::helpers::{
    TEST_TOKEN, app_in, config_dir_for, mount_login, page_json, run, signed_in, transaction_json, transactions,
};

use fintrack::cli::{Commands, ListArgs, UpdateArgs};
use fintrack::error::FintrackError;

use uuid::Uuid;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: A session created by `login` survives into the next
/// invocation and is gone after `logout`.
///
/// **WHY THIS MATTERS**: Every CLI invocation is a fresh process. Without
/// the stored session each command would need the password again.
///
/// **BUG THIS CATCHES**: Would catch the token not being written to the
/// store, or logout leaving it behind.
#[tokio::test]
async fn given_login_when_next_invocation_starts_then_session_restored_until_logout() {
    // GIVEN: A server that accepts the login
    let server = MockServer::start().await;
    mount_login(&server).await;
    let dir = config_dir_for(&server);

    // WHEN: Logging in, then starting a new app
    let mut first = app_in(dir.path());
    signed_in(&mut first).await;
    let mut second = app_in(dir.path());

    // THEN: The new app is signed in as the same user
    let (status, _) = run(&mut second, Commands::Status, "").await;
    let status = status.unwrap();
    assert_eq!(status.data["signed_in"], true);
    assert_eq!(status.data["username"], "mubeen");

    // AND WHEN: Logging out, then starting a third app
    let (logout, _) = run(&mut second, Commands::Logout, "").await;
    logout.unwrap();
    let mut third = app_in(dir.path());

    // THEN: Nobody is signed in
    let (status, _) = run(&mut third, Commands::Status, "").await;
    assert_eq!(status.unwrap().data["signed_in"], false);
}

/// **VALUE**: Protected commands never reach the API without a session.
///
/// **BUG THIS CATCHES**: Would catch the guard being skipped for `list`,
/// which sends an unauthenticated request and shows a fetch error instead
/// of telling the user to sign in.
#[tokio::test]
async fn given_no_session_when_listing_then_not_signed_in_and_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());

    let (result, _) = run(&mut app, Commands::List(ListArgs::default()), "").await;

    assert!(matches!(result, Err(FintrackError::NotSignedIn { .. })), "got: {result:?}");
}

#[tokio::test]
async fn given_session_when_listing_page_two_then_bearer_and_page_json() {
    // GIVEN: A signed-in app and a 25-row collection
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "2"))
        .and(query_param("size", "9"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(9, 18.0), 450.0, 25, 2, 3)))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());
    signed_in(&mut app).await;

    // WHEN: Listing page 2
    let args = ListArgs {
        page: 2,
        ..ListArgs::default()
    };
    let (result, _) = run(&mut app, Commands::List(args), "").await;

    // THEN: Page data and text both reflect the server's answer
    let report = result.unwrap();
    assert_eq!(report.data["page"], 2);
    assert_eq!(report.data["pages"], 3);
    assert_eq!(report.data["total_amount"], 450.0);
    assert!(report.text.contains("« Previous  1  [2]  3  Next »"), "got:\n{}", report.text);
}

/// **VALUE**: Deleting refetches the page and confirms with a toast.
///
/// **BUG THIS CATCHES**: Would catch the CLI removing the row locally
/// (stale total) or skipping the success notification.
#[tokio::test]
async fn given_confirmed_delete_when_run_then_refetched_page_and_deleted_notification() {
    // GIVEN: One transaction on the server
    let server = MockServer::start().await;
    mount_login(&server).await;
    let id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(Vec::new(), 0.0, 0, 1, 0)))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());
    signed_in(&mut app).await;

    // WHEN: Deleting after answering yes at the prompt
    let command = Commands::Delete {
        id,
        yes: false,
        list: ListArgs::default(),
    };
    let (result, _) = run(&mut app, command, "y\n").await;

    // THEN: The refetched, now empty, page is reported with a success toast
    let report = result.unwrap();
    assert_eq!(report.data["total"], 0);
    assert!(report.text.starts_with("No transactions found."));

    let notifications = app.notifier().take_buffered();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Deleted!");
    assert_eq!(notifications[0].text, "Transaction deleted successfully!");
}

#[tokio::test]
async fn given_declined_confirmation_when_deleting_then_cancelled_and_nothing_sent() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());
    signed_in(&mut app).await;

    let command = Commands::Delete {
        id: Uuid::new_v4(),
        yes: false,
        list: ListArgs::default(),
    };
    let (result, _) = run(&mut app, command, "n\n").await;

    assert!(matches!(result, Err(FintrackError::Cancelled { .. })), "got: {result:?}");
}

#[tokio::test]
async fn given_wrong_password_when_logging_in_then_incorrect_credentials_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());

    let command = Commands::Login {
        username: String::from("mubeen"),
        password: Some(String::from("wrong")),
    };
    let (result, _) = run(&mut app, command, "").await;

    assert!(result.is_err());
    let notifications = app.notifier().take_buffered();
    assert_eq!(notifications[0].text, "Incorrect username or password.");
    assert!(!app.auth().session().current().is_authenticated);
}

/// **VALUE**: The browse loop pages, searches and renders after each step.
///
/// **WHY THIS MATTERS**: This is the interactive form of the list screen;
/// the same query rules must hold (search goes back to page 1).
///
/// **BUG THIS CATCHES**: Would catch a search issued from page 2 keeping
/// `page=2`, which lands on an empty page when the filter has fewer rows.
#[tokio::test]
async fn given_scripted_session_when_browsing_then_pages_and_search_rendered() {
    // GIVEN: Three pages unfiltered, one page for "rent"
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("page", "1"))
        .and(query_param("search", "rent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![transaction_json(Uuid::new_v4(), 1200.0, "rent")],
            1200.0,
            1,
            1,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;
    for page in 1..=2u32 {
        Mock::given(method("GET"))
            .and(path("/transactions"))
            .and(query_param("page", page.to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(9, 18.0), 450.0, 25, page, 3)))
            .mount(&server)
            .await;
    }
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());
    signed_in(&mut app).await;

    // WHEN: Next page, search, then quit
    let (result, out) = run(&mut app, Commands::Browse(ListArgs::default()), "next\nsearch rent\nq\n").await;

    // THEN: Each step was rendered and the final page is the search result
    let report = result.unwrap();
    assert!(out.contains("[1]  2  3  Next »"), "got:\n{out}");
    assert!(out.contains("« Previous  1  [2]  3  Next »"), "got:\n{out}");
    assert!(out.contains("Total: $1200 (1 transactions)"), "got:\n{out}");
    assert_eq!(report.data["total"], 1);
    assert_eq!(report.data["page"], 1);
}

#[tokio::test]
async fn given_browse_when_moving_before_first_page_then_nothing_fetched() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(transactions(3, 10.0), 30.0, 3, 1, 1)))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());
    signed_in(&mut app).await;

    let (result, out) = run(&mut app, Commands::Browse(ListArgs::default()), "prev\nnext\n").await;

    result.unwrap();
    assert_eq!(out.matches("Nothing to do").count(), 2, "got:\n{out}");
}

/// **VALUE**: `update --amount` works on records whose stored date is free text.
///
/// **WHY THIS MATTERS**: The API accepts any text as a date. A record the
/// list shows must stay editable without retyping its date.
///
/// **BUG THIS CATCHES**: Would catch the prefilled date being rejected as
/// not `YYYY-MM-DD`, which blocks every edit of such a record.
#[tokio::test]
async fn given_record_with_free_text_date_when_updating_amount_then_date_sent_back_unchanged() {
    // GIVEN: A record dated 15/07/2024
    let server = MockServer::start().await;
    mount_login(&server).await;
    let id = Uuid::new_v4();
    let mut stored = transaction_json(id, 30.0, "food");
    stored["date"] = json!("15/07/2024");
    Mock::given(method("GET"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored.clone()))
        .mount(&server)
        .await;

    let mut updated = stored.clone();
    updated["amount"] = json!(12.0);
    Mock::given(method("PUT"))
        .and(path(format!("/transactions/{id}")))
        .and(body_json(json!({
            "amount": 12.0,
            "category": "food",
            "description": "food purchase",
            "is_income": false,
            "date": "15/07/2024"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());
    signed_in(&mut app).await;

    // WHEN: Changing only the amount
    let command = Commands::Update {
        id,
        fields: UpdateArgs {
            amount: Some(12.0),
            ..UpdateArgs::default()
        },
    };
    let (result, _) = run(&mut app, command, "").await;

    // THEN: The update goes through with the stored date
    let report = result.unwrap();
    assert_eq!(report.data["amount"], 12.0);
    assert_eq!(report.data["date"], "15/07/2024");
    assert_eq!(app.notifier().take_buffered()[0].title, "Updated!");
}

/// **VALUE**: A failed delete in the browse loop says so.
///
/// **BUG THIS CATCHES**: Would catch the failure being reported as
/// "Nothing to do", which tells the user the command was ignored.
#[tokio::test]
async fn given_server_error_when_deleting_row_in_browse_then_reports_not_deleted() {
    // GIVEN: One page of rows and a DELETE that fails
    let server = MockServer::start().await;
    mount_login(&server).await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![transaction_json(id, 10.0, "fuel")], 10.0, 1, 1, 1)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/transactions/{id}")))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let dir = config_dir_for(&server);
    let mut app = app_in(dir.path());
    signed_in(&mut app).await;

    // WHEN: Deleting row 1 and confirming
    let (result, out) = run(&mut app, Commands::Browse(ListArgs::default()), "delete 1\ny\nq\n").await;

    // THEN: The failure is named, the row is still there, and the toast fired
    let report = result.unwrap();
    assert!(out.contains(&format!("Transaction {id} was not deleted")), "got:\n{out}");
    assert!(!out.contains("Nothing to do"), "got:\n{out}");
    assert_eq!(report.data["total"], 1);
    let notifications = app.notifier().take_buffered();
    assert_eq!(notifications[0].text, "Failed to delete transaction.");
}
