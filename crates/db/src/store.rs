//! The injectable persistence seam.
//!
//! Services hold an `Arc<dyn Repository<E>>`, so tests can swap the
//! PostgreSQL store for in-memory or failing doubles.

use async_trait::async_trait;
use pme_core::query::ListFilter;
use pme_core::types::DbId;

use crate::entity::Entity;
use crate::error::StoreError;
use crate::models::project_equipment_relation::ProjectEquipmentRelation;
use crate::models::task::TaskRelations;

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Records matching `filter`; hidden rows are skipped unless
    /// `filter.include_deleted` is set.
    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<E::Record>, StoreError>;

    async fn find_by_id(
        &self,
        key: &E::Key,
        include_deleted: bool,
    ) -> Result<Option<E::Record>, StoreError>;

    async fn create(&self, input: &E::Create) -> Result<E::Record, StoreError>;

    /// `Ok(None)` when no visible record has `key`.
    async fn update(&self, key: &E::Key, input: &E::Update)
        -> Result<Option<E::Record>, StoreError>;

    /// Logically delete, returning the record as deleted. `Ok(None)` when no
    /// visible record has `key`.
    async fn soft_delete(&self, key: &E::Key) -> Result<Option<E::Record>, StoreError>;

    /// Physically remove the record. Returns whether a row was removed.
    async fn hard_delete(&self, key: &E::Key) -> Result<bool, StoreError>;
}

/// Live relation rows grouped by the record they hang off.
#[async_trait]
pub trait RelationLookup: Send + Sync {
    /// Live project, user, and equipment links of a task.
    async fn relations_of_task(&self, task_id: DbId) -> Result<TaskRelations, StoreError>;

    /// Live equipment links of a project.
    async fn equipment_of_project(
        &self,
        project_id: DbId,
    ) -> Result<Vec<ProjectEquipmentRelation>, StoreError>;
}
