//! Shared fixtures for tests against a wiremock transactions API.

use client_core::ApiClient;

use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token-12345";

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).expect("mock server URI should parse")
}

/// Transaction JSON the way the API serialises it.
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

/// Body of `GET /transactions`.
pub fn page_json(transactions: Vec<Value>, total_amount: f64, total: u64, page: u32, size: u32, pages: u32) -> Value {
    json!({
        "transactions": transactions,
        "total_amount": total_amount,
        "total": total,
        "page": page,
        "size": size,
        "pages": pages
    })
}

/// `count` transactions of `amount` each.
pub fn transactions(count: usize, amount: f64) -> Vec<Value> {
    (0..count)
        .map(|_| transaction_json(Uuid::new_v4(), amount, "groceries"))
        .collect()
}
