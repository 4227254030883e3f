use models::{ListQuery, ListResult};

/// Lifecycle of the list.
///
/// `Failed` keeps the last loaded snapshot on screen; only the status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// No query issued yet.
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Tag attached to an issued fetch.
///
/// Only the ticket with the view's current generation may update state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub(crate) generation: u64,
    pub(crate) query: ListQuery,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// What happened to a response handed to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result is now displayed.
    Applied,
    /// Request failed; previous snapshot (if any) is still displayed.
    Failed,
    /// Response belonged to a superseded ticket and was ignored.
    Discarded,
    /// Requested page lies past the last page; the query was clamped and this
    /// follow-up fetch must be issued.
    Redirected(FetchTicket),
}

/// A displayed result together with the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub query: ListQuery,
    pub result: ListResult<T>,
}
