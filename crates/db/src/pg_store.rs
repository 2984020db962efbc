//! PostgreSQL implementation of [`Repository`] for every entity.

use std::fmt;

use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use pme_core::project_number::business_date;
use pme_core::query::ListFilter;
use pme_core::types::DbId;

use crate::entity::Entity;
use crate::error::StoreError;
use crate::models::equipment::EquipmentMasters;
use crate::models::project::{CreateProject, Project, Projects, UpdateProject};
use crate::models::project_equipment_relation::{
    ProjectEquipmentRelation, ProjectEquipmentRelations,
};
use crate::models::task::{TaskRelations, Tasks};
use crate::models::task_equipment_relation::TaskEquipmentRelations;
use crate::models::task_project_relation::TaskProjectRelations;
use crate::models::task_type::TaskTypes;
use crate::models::task_user_relation::TaskUserRelations;
use crate::models::user::Users;
use crate::repositories::{
    EquipmentRepo, ProjectEquipmentRelationRepo, ProjectRepo, TaskEquipmentRelationRepo,
    TaskProjectRelationRepo, TaskRepo, TaskTypeRepo, TaskUserRelationRepo, UserRepo,
};
use crate::store::{RelationLookup, Repository};
use crate::DbPool;

/// Repository backed by the shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
    /// Time zone whose calendar date goes into new project numbers.
    numbering_offset: FixedOffset,
}

impl PgStore {
    pub fn new(pool: DbPool, numbering_offset: FixedOffset) -> Self {
        Self {
            pool,
            numbering_offset,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl fmt::Debug for PgStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgStore")
            .field("numbering_offset", &self.numbering_offset)
            .finish_non_exhaustive()
    }
}

/// Implement [`Repository`] by forwarding to a zero-sized repo whose
/// signatures follow the common shape.
macro_rules! delegate_repository {
    ($entity:ty => $repo:ty, soft_delete: $soft_delete:ident) => {
        #[async_trait]
        impl Repository<$entity> for PgStore {
            async fn find_all(
                &self,
                filter: &ListFilter,
            ) -> Result<Vec<<$entity as Entity>::Record>, StoreError> {
                Ok(<$repo>::list(&self.pool, filter).await?)
            }

            async fn find_by_id(
                &self,
                key: &<$entity as Entity>::Key,
                include_deleted: bool,
            ) -> Result<Option<<$entity as Entity>::Record>, StoreError> {
                Ok(<$repo>::find_by_id(&self.pool, *key, include_deleted).await?)
            }

            async fn create(
                &self,
                input: &<$entity as Entity>::Create,
            ) -> Result<<$entity as Entity>::Record, StoreError> {
                <$repo>::create(&self.pool, input).await
            }

            async fn update(
                &self,
                key: &<$entity as Entity>::Key,
                input: &<$entity as Entity>::Update,
            ) -> Result<Option<<$entity as Entity>::Record>, StoreError> {
                <$repo>::update(&self.pool, *key, input).await
            }

            async fn soft_delete(
                &self,
                key: &<$entity as Entity>::Key,
            ) -> Result<Option<<$entity as Entity>::Record>, StoreError> {
                Ok(<$repo>::$soft_delete(&self.pool, *key).await?)
            }

            async fn hard_delete(&self, key: &<$entity as Entity>::Key) -> Result<bool, StoreError> {
                Ok(<$repo>::hard_delete(&self.pool, *key).await?)
            }
        }
    };
}

delegate_repository!(Users => UserRepo, soft_delete: delete);
delegate_repository!(Tasks => TaskRepo, soft_delete: soft_delete);
delegate_repository!(TaskTypes => TaskTypeRepo, soft_delete: soft_delete);
delegate_repository!(EquipmentMasters => EquipmentRepo, soft_delete: soft_delete);
delegate_repository!(TaskProjectRelations => TaskProjectRelationRepo, soft_delete: soft_delete);
delegate_repository!(TaskUserRelations => TaskUserRelationRepo, soft_delete: soft_delete);
delegate_repository!(TaskEquipmentRelations => TaskEquipmentRelationRepo, soft_delete: soft_delete);
delegate_repository!(
    ProjectEquipmentRelations => ProjectEquipmentRelationRepo,
    soft_delete: soft_delete
);

#[async_trait]
impl Repository<Projects> for PgStore {
    async fn find_all(&self, filter: &ListFilter) -> Result<Vec<Project>, StoreError> {
        Ok(ProjectRepo::list(&self.pool, filter).await?)
    }

    async fn find_by_id(
        &self,
        id: &DbId,
        include_deleted: bool,
    ) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::find_by_id(&self.pool, *id, include_deleted).await?)
    }

    async fn create(&self, input: &CreateProject) -> Result<Project, StoreError> {
        let issued_on = business_date(Utc::now(), self.numbering_offset);
        let project = ProjectRepo::create(&self.pool, input, issued_on).await?;
        tracing::debug!(
            project_id = %project.id,
            project_number = %project.project_number,
            "Issued project number",
        );
        Ok(project)
    }

    async fn update(&self, id: &DbId, input: &UpdateProject) -> Result<Option<Project>, StoreError> {
        ProjectRepo::update(&self.pool, *id, input).await
    }

    async fn soft_delete(&self, id: &DbId) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::soft_delete(&self.pool, *id).await?)
    }

    async fn hard_delete(&self, id: &DbId) -> Result<bool, StoreError> {
        Ok(ProjectRepo::hard_delete(&self.pool, *id).await?)
    }
}

#[async_trait]
impl RelationLookup for PgStore {
    async fn relations_of_task(&self, task_id: DbId) -> Result<TaskRelations, StoreError> {
        let (projects, users, equipment) = tokio::try_join!(
            TaskProjectRelationRepo::list_for_task(&self.pool, task_id),
            TaskUserRelationRepo::list_for_task(&self.pool, task_id),
            TaskEquipmentRelationRepo::list_for_task(&self.pool, task_id),
        )?;
        Ok(TaskRelations {
            projects,
            users,
            equipment,
        })
    }

    async fn equipment_of_project(
        &self,
        project_id: DbId,
    ) -> Result<Vec<ProjectEquipmentRelation>, StoreError> {
        Ok(ProjectEquipmentRelationRepo::list_for_project(&self.pool, project_id).await?)
    }
}
