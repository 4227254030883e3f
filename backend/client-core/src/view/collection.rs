use crate::error::api_client::ApiClientError;
use crate::error::view::ViewError;
use crate::notify::{Notification, Notifier};
use crate::view::pagination::PaginationControls;
use crate::view::source::CollectionSource;
use crate::view::state::{FetchOutcome, FetchTicket, Snapshot, ViewStatus};

use common::ErrorLocation;
use models::{ListQuery, ListResult, ModelError};

use std::panic::Location;

use log::{debug, info, warn};

/// List screen state machine for one [`CollectionSource`].
///
/// # Request ordering
///
/// Every issued fetch gets a [`FetchTicket`] carrying a generation number.
/// Issuing a new ticket supersedes all earlier ones, and [`receive`] ignores
/// responses for superseded tickets. The event-loop API (`request`,
/// `set_search_term`, `set_page`, ..., then `receive`) lets a driver run
/// fetches concurrently; the async helpers (`load`, `search`, `go_to_page`,
/// `delete`) do the fetch inline.
///
/// [`receive`]: CollectionView::receive
pub struct CollectionView<S: CollectionSource, N: Notifier> {
    source: S,
    notifier: N,
    query: ListQuery,
    status: ViewStatus,
    generation: u64,
    in_flight: Option<FetchTicket>,
    displayed: Option<Snapshot<S::Item>>,
}

impl<S: CollectionSource, N: Notifier> CollectionView<S, N> {
    #[track_caller]
    pub fn new(source: S, notifier: N, page_size: u32) -> Result<Self, ModelError> {
        Ok(Self::with_query(source, notifier, ListQuery::first_page(page_size)?))
    }

    pub fn with_query(source: S, notifier: N, query: ListQuery) -> Self {
        Self {
            source,
            notifier,
            query,
            status: ViewStatus::Idle,
            generation: 0,
            in_flight: None,
            displayed: None,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    /// Last successfully loaded result, kept across failures.
    pub fn displayed(&self) -> Option<&Snapshot<S::Item>> {
        self.displayed.as_ref()
    }

    pub fn items(&self) -> &[S::Item] {
        self.displayed
            .as_ref()
            .map(|snapshot| snapshot.result.items.as_slice())
            .unwrap_or(&[])
    }

    /// Server-side total over the filtered set, as last displayed.
    pub fn total_amount(&self) -> Option<f64> {
        self.displayed.as_ref().map(|snapshot| snapshot.result.total_amount)
    }

    /// Controls for the requested page over the last known page count.
    ///
    /// The active button follows the query, so it moves as soon as a page is
    /// clicked and stays there if that fetch fails.
    pub fn pagination(&self) -> PaginationControls {
        match &self.displayed {
            Some(snapshot) => PaginationControls::new(self.query.page(), snapshot.result.total_pages),
            None => PaginationControls::empty(),
        }
    }

    // ============================================
    // EVENT-LOOP API
    // ============================================

    /// Ticket for the current query, unless that exact query is already in flight.
    pub fn request(&mut self) -> Option<FetchTicket> {
        if let Some(ticket) = &self.in_flight {
            if ticket.query == self.query {
                debug!("Fetch for {:?} already in flight, not issuing a duplicate", self.query);
                return None;
            }
        }

        Some(self.issue())
    }

    /// Ticket for the current query even if an identical one is in flight.
    ///
    /// Used after mutations: the in-flight response may predate the change.
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Change the search term; the page goes back to 1.
    ///
    /// Returns `None` when the term is unchanged and a result is already
    /// loaded or loading.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> Option<FetchTicket> {
        let term = term.into();
        if term == self.query.search_term() && matches!(self.status, ViewStatus::Loading | ViewStatus::Loaded) {
            return None;
        }

        self.query = self.query.with_search_term(term);
        self.request()
    }

    /// Jump to `page`. No-op outside `[1, total_pages]` or before anything
    /// has been loaded. Re-selecting the current page only refetches after a
    /// failure.
    pub fn set_page(&mut self, page: u32) -> Option<FetchTicket> {
        let total_pages = self.displayed.as_ref()?.result.total_pages;

        if page < 1 || page > total_pages.max(1) {
            debug!("Ignoring page change to {page} (total {total_pages})");
            return None;
        }

        if page == self.query.page() && self.status != ViewStatus::Failed {
            return None;
        }

        self.query = self.query.at_page(page);
        self.request()
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let next = self.query.page().checked_add(1)?;
        self.set_page(next)
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        let previous = self.query.page().checked_sub(1)?;
        self.set_page(previous)
    }

    /// Change the page size; the page goes back to 1.
    #[track_caller]
    pub fn set_page_size(&mut self, page_size: u32) -> Result<Option<FetchTicket>, ModelError> {
        if page_size == self.query.page_size() && matches!(self.status, ViewStatus::Loading | ViewStatus::Loaded) {
            return Ok(None);
        }

        self.query = self.query.with_page_size(page_size)?;
        Ok(self.request())
    }

    /// Hand a response to the view.
    ///
    /// Responses for superseded tickets are dropped. A successful response
    /// for a page past the last page clamps the query and returns the
    /// follow-up ticket instead of displaying an empty page.
    pub fn receive(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListResult<S::Item>, ApiClientError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale response for {:?} (generation {}, current {})",
                ticket.query, ticket.generation, self.generation
            );
            return FetchOutcome::Discarded;
        }

        self.in_flight = None;

        match result {
            Ok(result) => {
                let valid_page = result.valid_page(ticket.query.page());
                if valid_page != ticket.query.page() {
                    info!(
                        "Page {} is past the last page ({}), moving to page {valid_page}",
                        ticket.query.page(),
                        result.total_pages
                    );
                    self.query = ticket.query.at_page(valid_page);
                    return FetchOutcome::Redirected(self.issue());
                }

                debug!(
                    "Loaded {} {}(s) for {:?}: page {}/{}, total {}",
                    result.items.len(),
                    S::ITEM_LABEL,
                    ticket.query,
                    ticket.query.page(),
                    result.total_pages,
                    result.total_amount
                );

                self.displayed = Some(Snapshot {
                    query: ticket.query,
                    result,
                });
                self.status = ViewStatus::Loaded;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!("Failed to fetch {}s for {:?}: {e}", S::ITEM_LABEL, ticket.query);
                self.status = ViewStatus::Failed;
                self.notifier.notify(Notification::error(
                    "Error!",
                    format!("Failed to fetch {}s.", S::ITEM_LABEL),
                ));
                FetchOutcome::Failed
            }
        }
    }

    // ============================================
    // ASYNC HELPERS
    // ============================================

    /// Fetch `ticket` and any follow-up fetches it redirects to.
    pub async fn run(&mut self, ticket: FetchTicket) -> FetchOutcome {
        let mut ticket = ticket;
        loop {
            let result = self.source.fetch_page(&ticket.query).await;
            match self.receive(ticket, result) {
                FetchOutcome::Redirected(next) => ticket = next,
                outcome => return outcome,
            }
        }
    }

    /// Initial load (or reload) of the current query.
    pub async fn load(&mut self) -> Option<FetchOutcome> {
        let ticket = self.request()?;
        Some(self.run(ticket).await)
    }

    pub async fn search(&mut self, term: impl Into<String>) -> Option<FetchOutcome> {
        let ticket = self.set_search_term(term)?;
        Some(self.run(ticket).await)
    }

    pub async fn go_to_page(&mut self, page: u32) -> Option<FetchOutcome> {
        let ticket = self.set_page(page)?;
        Some(self.run(ticket).await)
    }

    pub async fn go_to_next(&mut self) -> Option<FetchOutcome> {
        let ticket = self.next_page()?;
        Some(self.run(ticket).await)
    }

    pub async fn go_to_previous(&mut self) -> Option<FetchOutcome> {
        let ticket = self.previous_page()?;
        Some(self.run(ticket).await)
    }

    pub async fn change_page_size(&mut self, page_size: u32) -> Result<Option<FetchOutcome>, ModelError> {
        match self.set_page_size(page_size)? {
            Some(ticket) => Ok(Some(self.run(ticket).await)),
            None => Ok(None),
        }
    }

    /// Delete an item, then reload the current query from the server.
    ///
    /// Nothing is removed locally: on failure the displayed rows stay as they
    /// were, on success they are replaced by the refetched page.
    pub async fn delete(&mut self, id: &S::Id) -> Result<FetchOutcome, ApiClientError> {
        match self.source.remove(id).await {
            Ok(()) => {
                info!("Deleted {} {id}", S::ITEM_LABEL);
                let ticket = self.refresh();
                let outcome = self.run(ticket).await;
                self.notifier.notify(Notification::success(
                    "Deleted!",
                    format!("{} deleted successfully!", capitalize(S::ITEM_LABEL)),
                ));
                Ok(outcome)
            }
            Err(e) => {
                warn!("Failed to delete {} {id}: {e}", S::ITEM_LABEL);
                self.notifier.notify(Notification::error(
                    "Error!",
                    format!("Failed to delete {}.", S::ITEM_LABEL),
                ));
                Err(e)
            }
        }
    }

    /// Id of the row at `index` (0-based) on the displayed page.
    #[track_caller]
    pub fn visible_id(&self, index: usize) -> Result<S::Id, ViewError> {
        self.items()
            .get(index)
            .map(S::item_id)
            .ok_or_else(|| ViewError::RowNotVisible {
                message: format!("No row {} on the current page ({} rows)", index + 1, self.items().len()),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Delete the row at `index` (0-based) of the displayed page.
    pub async fn delete_row(&mut self, index: usize) -> Result<FetchOutcome, ViewError> {
        let id = self.visible_id(index)?;
        Ok(self.delete(&id).await?)
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
        };

        debug!("Issuing fetch #{} for {:?}", ticket.generation, ticket.query);
        self.in_flight = Some(ticket.clone());
        self.status = ViewStatus::Loading;
        ticket
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
