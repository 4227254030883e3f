//! HTTP client for the transactions REST API and its auth endpoints.

mod wire;

pub use wire::RegisteredUser;

use crate::error::api_client::ApiClientError;
use crate::view::CollectionSource;

use wire::{TokenResponse, TransactionsPage};

use common::{ErrorLocation, HttpStatusCode, RedactedSecret};
use models::{AccessToken, Credentials, ListQuery, ListResult, Registration, Transaction, TransactionDraft};

use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const TRANSACTIONS_ENDPOINT: &str = "transactions";
const LOGIN_ENDPOINT: &str = "login";
const REGISTER_ENDPOINT: &str = "register";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client for the transactions API.
///
/// Clones share the bearer token slot, so signing in through one handle
/// authorizes requests made by every other handle.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    access_token: Arc<RwLock<Option<RedactedSecret>>>,
}

impl ApiClient {
    pub fn new(base_url_str: &str) -> Result<Self, ApiClientError> {
        Self::with_timeout(base_url_str, DEFAULT_TIMEOUT_DURATION)
    }

    pub fn with_timeout(base_url_str: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        // Url::join replaces the last path segment unless the base ends with '/'
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            client,
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_access_token(&self, token: Option<RedactedSecret>) {
        let mut slot = self.access_token.write().unwrap_or_else(PoisonError::into_inner);
        *slot = token;
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn prepare_request(&self, request: RequestBuilder) -> RequestBuilder {
        let slot = self.access_token.read().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    /// `GET /transactions?page&size&search`
    pub async fn list_transactions(&self, query: &ListQuery) -> Result<ListResult<Transaction>, ApiClientError> {
        let mut url = self.base_url.join(TRANSACTIONS_ENDPOINT)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("page", &query.page().to_string())
                .append_pair("size", &query.page_size().to_string());

            let search = query.search_term().trim();
            if !search.is_empty() {
                pairs.append_pair("search", search);
            }
        }

        debug!("GET {url}");
        let response = self.prepare_request(self.client.get(url)).send().await?;
        let page: TransactionsPage = decode(ensure_success(response).await?).await?;

        Ok(page.into_list_result(query))
    }

    /// `GET /transactions/{id}`
    pub async fn get_transaction(&self, id: Uuid) -> Result<Transaction, ApiClientError> {
        let url = self.base_url.join(&format!("{TRANSACTIONS_ENDPOINT}/{id}"))?;

        let response = self.prepare_request(self.client.get(url)).send().await?;

        decode(ensure_success(response).await?).await
    }

    /// `POST /transactions`
    pub async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ApiClientError> {
        let url = self.base_url.join(TRANSACTIONS_ENDPOINT)?;

        let response = self
            .prepare_request(self.client.post(url))
            .json(draft)
            .send()
            .await?;

        decode(ensure_success(response).await?).await
    }

    /// `PUT /transactions/{id}`
    pub async fn update_transaction(&self, id: Uuid, draft: &TransactionDraft) -> Result<Transaction, ApiClientError> {
        let url = self.base_url.join(&format!("{TRANSACTIONS_ENDPOINT}/{id}"))?;

        let response = self
            .prepare_request(self.client.put(url))
            .json(draft)
            .send()
            .await?;

        decode(ensure_success(response).await?).await
    }

    /// `DELETE /transactions/{id}`
    pub async fn delete_transaction(&self, id: Uuid) -> Result<(), ApiClientError> {
        let url = self.base_url.join(&format!("{TRANSACTIONS_ENDPOINT}/{id}"))?;

        let response = self.prepare_request(self.client.delete(url)).send().await?;
        ensure_success(response).await?;

        Ok(())
    }

    /// `POST /login` with an OAuth2 password form.
    ///
    /// Does not store the returned token; that is the auth service's job.
    pub async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiClientError> {
        let url = self.base_url.join(LOGIN_ENDPOINT)?;

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("username", credentials.username())
            .append_pair("password", credentials.password().expose())
            .finish();

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let token: TokenResponse = decode(ensure_success(response).await?).await?;
        Ok(token.into())
    }

    /// `POST /register`
    pub async fn register(&self, registration: &Registration) -> Result<RegisteredUser, ApiClientError> {
        let url = self.base_url.join(REGISTER_ENDPOINT)?;

        let response = self
            .client
            .post(url)
            .json(&registration.to_request_body())
            .send()
            .await?;

        decode(ensure_success(response).await?).await
    }
}

impl CollectionSource for ApiClient {
    type Item = Transaction;
    type Id = Uuid;

    const ITEM_LABEL: &'static str = "transaction";

    fn item_id(item: &Transaction) -> Uuid {
        item.id
    }

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult<Transaction>, ApiClientError> {
        self.list_transactions(query).await
    }

    async fn remove(&self, id: &Uuid) -> Result<(), ApiClientError> {
        self.delete_transaction(*id).await
    }
}

/// Turn any non-2xx response into [`ApiClientError::Server`].
async fn ensure_success(response: Response) -> Result<Response, ApiClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(ApiClientError::Server {
        status: HttpStatusCode(status.as_u16()),
        message: response.text().await.unwrap_or_default(),
        location: ErrorLocation::from(Location::caller()),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiClientError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
