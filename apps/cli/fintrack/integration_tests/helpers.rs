//! Fixtures shared by the command tests.

use fintrack::app::App;
use fintrack::cli::Commands;
use fintrack::commands::dispatch;
use fintrack::error::FintrackError;
use fintrack::output::{OutputFormat, Report};
use fintrack::prompt::Prompt;

use std::path::Path;

use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "cli-test-token";

/// Config dir whose config.json points at the mock server.
pub fn config_dir_for(server: &MockServer) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let config = json!({
        "version": 1,
        "server": { "base_url": server.uri(), "timeout_secs": 5 },
        "list": { "page_size": 9 }
    });
    std::fs::write(dir.path().join("config.json"), config.to_string()).unwrap();
    dir
}

/// JSON-mode app so notifications are buffered and inspectable.
pub fn app_in(dir: &Path) -> App {
    App::bootstrap(dir, OutputFormat::Json).unwrap()
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

/// Run one command with scripted stdin, returning the result and what was
/// written to the output stream.
pub async fn run(app: &mut App, command: Commands, input: &str) -> (Result<Report, FintrackError>, String) {
    let mut prompt = Prompt::new(input.as_bytes());
    let mut out = Vec::new();
    let result = dispatch(app, command, &mut prompt, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

pub async fn signed_in(app: &mut App) {
    let (result, _) = run(
        app,
        Commands::Login {
            username: String::from("mubeen"),
            password: Some(String::from("secret")),
        },
        "",
    )
    .await;
    result.unwrap();
    app.notifier().take_buffered();
}

pub fn transaction_json(id: Uuid, amount: f64, category: &str) -> Value {
    json!({
        "table_name_id": id,
        "amount": amount,
        "category": category,
        "description": format!("{category} purchase"),
        "is_income": false,
        "date": "2026-03-14"
    })
}

pub fn page_json(transactions: Vec<Value>, total_amount: f64, total: u64, page: u32, pages: u32) -> Value {
    json!({
        "transactions": transactions,
        "total_amount": total_amount,
        "total": total,
        "page": page,
        "size": 9,
        "pages": pages
    })
}

pub fn transactions(count: usize, amount: f64) -> Vec<Value> {
    (0..count)
        .map(|_| transaction_json(Uuid::new_v4(), amount, "groceries"))
        .collect()
}
