//! Paginated, searchable list bound to a remote collection.
//!
//! [`CollectionView`] owns the fetch lifecycle for one list screen: the
//! current [`ListQuery`](models::ListQuery), the last result that was
//! displayed, and the bookkeeping that keeps a slow response for an old query
//! from overwriting a newer one.

pub mod collection;
pub mod format;
pub mod pagination;
pub mod source;
pub mod state;

pub use collection::CollectionView;
pub use format::format_currency;
pub use pagination::{PageButton, PaginationControls};
pub use source::CollectionSource;
pub use state::{FetchOutcome, FetchTicket, Snapshot, ViewStatus};
