//! Combined list + mutation providers with a current selection.

use std::sync::Arc;

use pme_core::query::ListFilter;
use pme_db::models::task::Tasks;
use pme_db::models::user::Users;
use pme_db::Entity;

use crate::backend::Backend;
use crate::hooks::{CreateMutation, DeleteMutation, ListQuery, UpdateMutation};

/// One entity's list, its three mutations, and the selected record.
///
/// Every successful mutation re-fetches the whole list.
pub struct EntityContext<E: Entity> {
    list: ListQuery<E>,
    create: CreateMutation<E>,
    update: UpdateMutation<E>,
    delete: DeleteMutation<E>,
    selected_id: Option<E::Key>,
}

pub type TaskContext = EntityContext<Tasks>;
pub type UserContext = EntityContext<Users>;

impl<E: Entity> EntityContext<E> {
    pub fn new(backend: Arc<dyn Backend<E>>) -> Self {
        Self {
            list: ListQuery::new(Arc::clone(&backend)),
            create: CreateMutation::new(Arc::clone(&backend)),
            update: UpdateMutation::new(Arc::clone(&backend)),
            delete: DeleteMutation::new(backend),
            selected_id: None,
        }
    }

    /// Fetch the list (memoized on `filter`).
    pub async fn load(&mut self, filter: ListFilter) {
        self.list.set_filter(filter).await;
    }

    pub fn items(&self) -> &[E::Record] {
        self.list.state().data.as_deref().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.list.state().is_loading
            || self.create.state().is_loading
            || self.update.state().is_loading
            || self.delete.state().is_loading
    }

    /// The most relevant error: the list's, then any mutation's.
    pub fn error(&self) -> Option<&str> {
        self.list
            .state()
            .error
            .as_deref()
            .or(self.create.state().error.as_deref())
            .or(self.update.state().error.as_deref())
            .or(self.delete.state().error.as_deref())
    }

    pub fn selected_id(&self) -> Option<E::Key> {
        self.selected_id
    }

    pub fn select(&mut self, key: Option<E::Key>) {
        self.selected_id = key;
    }

    /// The selected record, looked up in the loaded list.
    pub fn selected(&self) -> Option<&E::Record> {
        let key = self.selected_id?;
        self.items().iter().find(|record| E::key_of(record) == key)
    }

    pub async fn create(&mut self, input: &E::Create) -> bool {
        let ok = self.create.mutate(input).await;
        if ok {
            self.list.refetch().await;
        }
        ok
    }

    pub async fn update(&mut self, key: &E::Key, input: &E::Update) -> bool {
        let ok = self.update.mutate(key, input).await;
        if ok {
            self.list.refetch().await;
        }
        ok
    }

    /// Delete `key`; deleting the selected record clears the selection.
    pub async fn delete(&mut self, key: &E::Key) -> bool {
        let ok = self.delete.mutate(key).await;
        if ok {
            if self.selected_id.as_ref() == Some(key) {
                self.selected_id = None;
            }
            self.list.refetch().await;
        }
        ok
    }

    pub async fn refresh(&mut self) {
        self.list.refetch().await;
    }
}
