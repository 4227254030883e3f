//! Response bodies as the API sends them, converted into `models` types.

use common::RedactedSecret;
use models::{AccessToken, ListQuery, ListResult, Transaction};

use serde::Deserialize;
use uuid::Uuid;

/// Body of `GET /transactions`.
///
/// `total_amount` is summed server-side over the filtered set, not the page.
#[derive(Debug, Deserialize)]
pub(crate) struct TransactionsPage {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
}

impl TransactionsPage {
    pub(crate) fn into_list_result(self, query: &ListQuery) -> ListResult<Transaction> {
        ListResult {
            items: self.transactions,
            page: if self.page == 0 { query.page() } else { self.page },
            page_size: if self.size == 0 { query.page_size() } else { self.size },
            total_pages: self.pages,
            total_items: self.total,
            total_amount: self.total_amount.unwrap_or(0.0),
        }
    }
}

/// Body of `POST /login`.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    String::from("bearer")
}

impl From<TokenResponse> for AccessToken {
    fn from(response: TokenResponse) -> Self {
        AccessToken {
            access_token: RedactedSecret::new(response.access_token),
            token_type: response.token_type,
        }
    }
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}
