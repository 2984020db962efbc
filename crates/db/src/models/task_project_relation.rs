//! Task ↔ project relation model and DTOs.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::relation as validator;

composite_key! {
    /// Primary key of `task_project_relations`.
    TaskProjectKey { task_id, project_id }
}

/// A row from the `task_project_relations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProjectRelation {
    pub task_id: DbId,
    pub project_id: DbId,
    pub relation_type: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for linking a task to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskProjectRelation {
    pub task_id: DbId,
    pub project_id: DbId,
    /// Defaults to `"related"` if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// DTO for updating a task ↔ project relation. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskProjectRelation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// Entity marker for task ↔ project relations.
pub struct TaskProjectRelations;

impl Entity for TaskProjectRelations {
    type Record = TaskProjectRelation;
    type Key = TaskProjectKey;
    type Create = CreateTaskProjectRelation;
    type Update = UpdateTaskProjectRelation;

    const RESOURCE: &'static str = "task-project-relations";
    const MESSAGES: EntityMessages = messages::TASK_PROJECT_RELATION;

    fn validate_create(input: &CreateTaskProjectRelation) -> Result<(), String> {
        validator::validate_create_task_project(input)
    }

    fn validate_update(input: &UpdateTaskProjectRelation) -> Result<(), String> {
        validator::validate_update_task_project(input)
    }

    fn key_of(record: &TaskProjectRelation) -> TaskProjectKey {
        TaskProjectKey {
            task_id: record.task_id,
            project_id: record.project_id,
        }
    }
}
