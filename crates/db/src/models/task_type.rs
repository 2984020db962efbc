//! Task type entity model and DTOs.
//!
//! Task types use `is_active` instead of a deletion timestamp: inactive
//! types are the soft-deleted ones.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::task_type as validator;

/// A row from the `task_types` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskType {
    pub id: DbId,
    pub type_name: String,
    pub description: Option<String>,
    /// `#RRGGBB`.
    pub color_code: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskType {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    /// Defaults to 0 if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing task type. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// Entity marker for task types.
pub struct TaskTypes;

impl Entity for TaskTypes {
    type Record = TaskType;
    type Key = DbId;
    type Create = CreateTaskType;
    type Update = UpdateTaskType;

    const RESOURCE: &'static str = "task-types";
    const MESSAGES: EntityMessages = messages::TASK_TYPE;

    fn validate_create(input: &CreateTaskType) -> Result<(), String> {
        validator::validate_create(input)
    }

    fn validate_update(input: &UpdateTaskType) -> Result<(), String> {
        validator::validate_update(input)
    }

    fn key_of(record: &TaskType) -> DbId {
        record.id
    }
}
