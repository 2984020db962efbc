//! Task ↔ user (assignee) relation model and DTOs.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::relation as validator;

composite_key! {
    /// Primary key of `task_user_relations`.
    TaskUserKey { task_id, user_id }
}

/// A row from the `task_user_relations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUserRelation {
    pub task_id: DbId,
    pub user_id: DbId,
    pub role_type: String,
    pub planned_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for assigning a user to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskUserRelation {
    pub task_id: DbId,
    pub user_id: DbId,
    /// Defaults to `"assignee"` if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
}

/// DTO for updating an assignment. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskUserRelation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
}

/// Entity marker for task ↔ user relations.
pub struct TaskUserRelations;

impl Entity for TaskUserRelations {
    type Record = TaskUserRelation;
    type Key = TaskUserKey;
    type Create = CreateTaskUserRelation;
    type Update = UpdateTaskUserRelation;

    const RESOURCE: &'static str = "task-user-relations";
    const MESSAGES: EntityMessages = messages::TASK_USER_RELATION;

    fn validate_create(input: &CreateTaskUserRelation) -> Result<(), String> {
        validator::validate_create_task_user(input)
    }

    fn validate_update(input: &UpdateTaskUserRelation) -> Result<(), String> {
        validator::validate_update_task_user(input)
    }

    fn key_of(record: &TaskUserRelation) -> TaskUserKey {
        TaskUserKey {
            task_id: record.task_id,
            user_id: record.user_id,
        }
    }
}
