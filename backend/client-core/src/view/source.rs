use crate::error::api_client::ApiClientError;

use models::{ListQuery, ListResult};

use std::fmt::Display;
use std::future::Future;

/// Remote collection a [`CollectionView`](super::CollectionView) can page through.
///
/// The view is generic over this trait; the transactions API is one
/// implementation and tests substitute in-memory sources.
pub trait CollectionSource {
    type Item: Clone;
    type Id: Clone + PartialEq + Display;

    /// Singular noun used in notifications ("transaction").
    const ITEM_LABEL: &'static str;

    fn item_id(item: &Self::Item) -> Self::Id;

    fn fetch_page(
        &self,
        query: &ListQuery,
    ) -> impl Future<Output = Result<ListResult<Self::Item>, ApiClientError>>;

    fn remove(&self, id: &Self::Id) -> impl Future<Output = Result<(), ApiClientError>>;
}
