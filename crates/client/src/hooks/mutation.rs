//! Create, update, and delete containers.
//!
//! `mutate` reports success as a `bool`; the payload or error string is in
//! `state()`. Nothing is retried.

use std::sync::Arc;

use pme_core::envelope::DeletedRef;
use pme_db::Entity;

use crate::backend::Backend;
use crate::state::QueryState;

use super::settle;

pub struct CreateMutation<E: Entity> {
    backend: Arc<dyn Backend<E>>,
    state: QueryState<E::Record>,
}

impl<E: Entity> CreateMutation<E> {
    pub fn new(backend: Arc<dyn Backend<E>>) -> Self {
        Self {
            backend,
            state: QueryState::default(),
        }
    }

    pub fn state(&self) -> &QueryState<E::Record> {
        &self.state
    }

    pub async fn mutate(&mut self, input: &E::Create) -> bool {
        self.state.begin();
        let result = self.backend.create(input).await;
        self.state.finish(settle(E::RESOURCE, "create", result));
        self.state.error.is_none()
    }

    pub fn reset(&mut self) {
        self.state = QueryState::default();
    }
}

pub struct UpdateMutation<E: Entity> {
    backend: Arc<dyn Backend<E>>,
    state: QueryState<E::Record>,
}

impl<E: Entity> UpdateMutation<E> {
    pub fn new(backend: Arc<dyn Backend<E>>) -> Self {
        Self {
            backend,
            state: QueryState::default(),
        }
    }

    pub fn state(&self) -> &QueryState<E::Record> {
        &self.state
    }

    pub async fn mutate(&mut self, key: &E::Key, input: &E::Update) -> bool {
        self.state.begin();
        let result = self.backend.update(key, input).await;
        self.state.finish(settle(E::RESOURCE, "update", result));
        self.state.error.is_none()
    }

    pub fn reset(&mut self) {
        self.state = QueryState::default();
    }
}

pub struct DeleteMutation<E: Entity> {
    backend: Arc<dyn Backend<E>>,
    state: QueryState<DeletedRef<E::Key>>,
}

impl<E: Entity> DeleteMutation<E> {
    pub fn new(backend: Arc<dyn Backend<E>>) -> Self {
        Self {
            backend,
            state: QueryState::default(),
        }
    }

    pub fn state(&self) -> &QueryState<DeletedRef<E::Key>> {
        &self.state
    }

    pub async fn mutate(&mut self, key: &E::Key) -> bool {
        self.state.begin();
        let result = self.backend.delete(key).await;
        self.state.finish(settle(E::RESOURCE, "delete", result));
        self.state.error.is_none()
    }

    pub fn reset(&mut self) {
        self.state = QueryState::default();
    }
}
