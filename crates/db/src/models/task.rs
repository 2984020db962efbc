//! Task entity model and DTOs.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::models::task_equipment_relation::TaskEquipmentRelation;
use crate::models::task_project_relation::TaskProjectRelation;
use crate::models::task_user_relation::TaskUserRelation;
use crate::validators::task as validator;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    pub task_name: String,
    pub task_type_id: DbId,
    pub plan_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub task_name: String,
    pub task_type_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<DbId>,
}

/// DTO for updating an existing task. All fields are optional.
///
/// `plan_id` distinguishes "absent" (keep) from `null` (unlink the plan).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type_id: Option<DbId>,
    #[serde(
        default,
        deserialize_with = "super::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub plan_id: Option<Option<DbId>>,
}

/// Everything attached to one task through the relation tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRelations {
    pub projects: Vec<TaskProjectRelation>,
    pub users: Vec<TaskUserRelation>,
    pub equipment: Vec<TaskEquipmentRelation>,
}

/// Entity marker for tasks.
pub struct Tasks;

impl Entity for Tasks {
    type Record = Task;
    type Key = DbId;
    type Create = CreateTask;
    type Update = UpdateTask;

    const RESOURCE: &'static str = "tasks";
    const MESSAGES: EntityMessages = messages::TASK;

    fn validate_create(input: &CreateTask) -> Result<(), String> {
        validator::validate_create(input)
    }

    fn validate_update(input: &UpdateTask) -> Result<(), String> {
        validator::validate_update(input)
    }

    fn key_of(record: &Task) -> DbId {
        record.id
    }
}
