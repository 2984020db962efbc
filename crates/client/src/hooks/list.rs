use std::sync::Arc;

use pme_core::query::ListFilter;
use pme_db::Entity;

use crate::backend::Backend;
use crate::query_key::QueryKey;
use crate::state::QueryState;

use super::settle;

/// A filtered list of one entity.
pub struct ListQuery<E: Entity> {
    backend: Arc<dyn Backend<E>>,
    filter: ListFilter,
    key: Option<QueryKey>,
    state: QueryState<Vec<E::Record>>,
}

impl<E: Entity> ListQuery<E> {
    pub fn new(backend: Arc<dyn Backend<E>>) -> Self {
        Self {
            backend,
            filter: ListFilter::default(),
            key: None,
            state: QueryState::default(),
        }
    }

    pub fn state(&self) -> &QueryState<Vec<E::Record>> {
        &self.state
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    /// Fetch with `filter` unless an equal filter was already fetched.
    pub async fn set_filter(&mut self, filter: ListFilter) {
        let key = QueryKey::new(E::RESOURCE, &filter);
        if self.key.as_ref() == Some(&key) {
            return;
        }
        self.filter = filter;
        self.key = Some(key);
        self.fetch().await;
    }

    /// Fetch again with the current filter.
    pub async fn refetch(&mut self) {
        self.key = Some(QueryKey::new(E::RESOURCE, &self.filter));
        self.fetch().await;
    }

    /// Back to the initial, never-fetched state.
    pub fn reset(&mut self) {
        self.filter = ListFilter::default();
        self.key = None;
        self.state = QueryState::default();
    }

    async fn fetch(&mut self) {
        self.state.begin();
        let result = self.backend.list(&self.filter).await;
        self.state.finish(settle(E::RESOURCE, "list", result));
    }
}
