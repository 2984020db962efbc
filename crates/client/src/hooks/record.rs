use std::str::FromStr;
use std::sync::Arc;

use pme_core::query::LookupOptions;
use pme_db::Entity;

use crate::backend::Backend;
use crate::query_key::QueryKey;
use crate::state::QueryState;

use super::settle;

/// One record addressed by its id string (`{id}` or `{first}/{second}`).
pub struct RecordQuery<E: Entity> {
    backend: Arc<dyn Backend<E>>,
    options: LookupOptions,
    key: Option<E::Key>,
    query_key: Option<QueryKey>,
    state: QueryState<E::Record>,
}

impl<E: Entity> RecordQuery<E> {
    pub fn new(backend: Arc<dyn Backend<E>>) -> Self {
        Self {
            backend,
            options: LookupOptions::default(),
            key: None,
            query_key: None,
            state: QueryState::default(),
        }
    }

    /// Also resolve soft-deleted records.
    pub fn including_deleted(mut self) -> Self {
        self.options.include_deleted = true;
        self
    }

    pub fn state(&self) -> &QueryState<E::Record> {
        &self.state
    }

    /// Load the record for `id`.
    ///
    /// A blank id reports the entity's "ID not specified" message and an
    /// unparsable one its not-found message; neither reaches the backend.
    /// Loading the id already loaded does nothing.
    pub async fn load(&mut self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            self.clear_key();
            self.state.fail(E::MESSAGES.id_required);
            return;
        }
        let Ok(key) = E::Key::from_str(id) else {
            self.clear_key();
            self.state.fail(E::MESSAGES.not_found);
            return;
        };

        let query_key = QueryKey::new(E::RESOURCE, &(key, self.options));
        if self.query_key.as_ref() == Some(&query_key) {
            return;
        }
        self.key = Some(key);
        self.query_key = Some(query_key);
        self.fetch(key).await;
    }

    /// Fetch the current record again. No-op before a successful `load`.
    pub async fn refetch(&mut self) {
        if let Some(key) = self.key {
            self.fetch(key).await;
        }
    }

    pub fn reset(&mut self) {
        self.clear_key();
        self.state = QueryState::default();
    }

    fn clear_key(&mut self) {
        self.key = None;
        self.query_key = None;
    }

    async fn fetch(&mut self, key: E::Key) {
        self.state.begin();
        let result = self.backend.get(&key, self.options).await;
        self.state.finish(settle(E::RESOURCE, "get", result));
    }
}
