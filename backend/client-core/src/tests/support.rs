// In-memory collection used by the view tests.
// Serves pages the way the transactions API does: filtered by search term,
// sliced by page, and answering past-the-end pages with no rows.

use crate::error::api_client::ApiClientError;
use crate::view::CollectionSource;

use common::{ErrorLocation, HttpStatusCode};
use models::{ListQuery, ListResult};

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: u32,
    pub label: String,
    pub amount: f64,
}

#[derive(Clone, Default)]
pub struct FakeLedger {
    entries: Arc<Mutex<Vec<Entry>>>,
    queries: Arc<Mutex<Vec<ListQuery>>>,
    removed: Arc<Mutex<Vec<u32>>>,
    fail_fetches: Arc<AtomicBool>,
    fail_removes: Arc<AtomicBool>,
}

impl FakeLedger {
    /// `count` entries of `amount` each, labelled "entry-{id}".
    pub fn with_entries(count: u32, amount: f64) -> Self {
        let ledger = Self::default();
        {
            let mut entries = ledger.entries.lock().unwrap();
            for id in 1..=count {
                entries.push(Entry {
                    id,
                    label: format!("entry-{id}"),
                    amount,
                });
            }
        }
        ledger
    }

    pub fn push(&self, label: &str, amount: f64) -> u32 {
        let mut entries = self.entries.lock().unwrap();
        let id = entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1;
        entries.push(Entry {
            id,
            label: label.to_string(),
            amount,
        });
        id
    }

    /// Delete behind the view's back, as another client would.
    pub fn remove_now(&self, id: u32) {
        self.entries.lock().unwrap().retain(|entry| entry.id != id);
    }

    pub fn queries(&self) -> Vec<ListQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<ListQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    pub fn removed(&self) -> Vec<u32> {
        self.removed.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub fn set_remove_failure(&self, fail: bool) {
        self.fail_removes.store(fail, Ordering::SeqCst);
    }

    /// Page computed from the current entries, without recording a query.
    pub fn page_for(&self, query: &ListQuery) -> ListResult<Entry> {
        let entries = self.entries.lock().unwrap();
        let matching: Vec<Entry> = entries
            .iter()
            .filter(|entry| entry.label.contains(query.search_term()))
            .cloned()
            .collect();

        let size = query.page_size() as usize;
        let total_pages = matching.len().div_ceil(size) as u32;
        let start = (query.page() as usize - 1) * size;

        ListResult {
            items: matching.iter().skip(start).take(size).cloned().collect(),
            page: query.page(),
            page_size: query.page_size(),
            total_pages,
            total_items: matching.len() as u64,
            total_amount: matching.iter().map(|entry| entry.amount).sum(),
        }
    }
}

#[track_caller]
pub fn server_error(status: u16) -> ApiClientError {
    ApiClientError::Server {
        status: HttpStatusCode(status),
        message: String::from("simulated failure"),
        location: ErrorLocation::from(Location::caller()),
    }
}

impl CollectionSource for FakeLedger {
    type Item = Entry;
    type Id = u32;

    const ITEM_LABEL: &'static str = "transaction";

    fn item_id(item: &Entry) -> u32 {
        item.id
    }

    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult<Entry>, ApiClientError> {
        self.queries.lock().unwrap().push(query.clone());

        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(server_error(500));
        }

        Ok(self.page_for(query))
    }

    async fn remove(&self, id: &u32) -> Result<(), ApiClientError> {
        if self.fail_removes.load(Ordering::SeqCst) {
            return Err(server_error(500));
        }

        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|entry| entry.id != *id);
        if entries.len() == before {
            return Err(server_error(404));
        }

        self.removed.lock().unwrap().push(*id);
        Ok(())
    }
}
