use crate::error::model_error::ModelError;
use crate::transaction::Transaction;

use common::ErrorLocation;

use std::panic::Location;

/// First page number; pages are 1-based.
pub const FIRST_PAGE: u32 = 1;

/// Parameters driving a collection fetch.
///
/// Any change to a field invalidates the result set currently on screen.
/// Fields are private so `page >= 1` and `page_size > 0` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    search_term: String,
}

impl ListQuery {
    #[track_caller]
    pub fn new(page: u32, page_size: u32, search_term: impl Into<String>) -> Result<Self, ModelError> {
        if page < FIRST_PAGE {
            return Err(ModelError::Validation {
                message: format!("Page must be at least {FIRST_PAGE}, got {page}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if page_size == 0 {
            return Err(ModelError::Validation {
                message: String::from("Page size must be greater than zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            page,
            page_size,
            search_term: search_term.into(),
        })
    }

    /// Query for the first page with no search term.
    #[track_caller]
    pub fn first_page(page_size: u32) -> Result<Self, ModelError> {
        Self::new(FIRST_PAGE, page_size, String::new())
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Same size and search term at `page`, raised to the first page if 0.
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page: page.max(FIRST_PAGE),
            page_size: self.page_size,
            search_term: self.search_term.clone(),
        }
    }

    /// New search term; always starts over from the first page.
    pub fn with_search_term(&self, search_term: impl Into<String>) -> Self {
        Self {
            page: FIRST_PAGE,
            page_size: self.page_size,
            search_term: search_term.into(),
        }
    }

    /// New page size; always starts over from the first page.
    #[track_caller]
    pub fn with_page_size(&self, page_size: u32) -> Result<Self, ModelError> {
        Self::new(FIRST_PAGE, page_size, self.search_term.clone())
    }
}

/// One page of a collection plus the server-side aggregates over the whole
/// filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T = Transaction> {
    pub items: Vec<T>,
    /// Page the server answered for (echo of the request).
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    /// Number of items matching the search, across all pages.
    pub total_items: u64,
    /// Sum of `amount` over the filtered set, computed by the server.
    pub total_amount: f64,
}

impl<T> ListResult<T> {
    /// Nearest page inside `[1, total_pages]`; 1 when the set is empty.
    pub fn valid_page(&self, requested: u32) -> u32 {
        requested.clamp(FIRST_PAGE, self.total_pages.max(FIRST_PAGE))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
