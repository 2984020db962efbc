//! Task ↔ equipment relation model and DTOs.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::relation as validator;

composite_key! {
    /// Primary key of `task_equipment_relations`.
    TaskEquipmentKey { task_id, equipment_id }
}

/// A row from the `task_equipment_relations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEquipmentRelation {
    pub task_id: DbId,
    pub equipment_id: DbId,
    pub usage_type: String,
    pub quantity: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for attaching equipment to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskEquipmentRelation {
    pub task_id: DbId,
    pub equipment_id: DbId,
    /// Defaults to `"use"` if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    /// Defaults to 1 if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// DTO for updating a task ↔ equipment relation. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskEquipmentRelation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

/// Entity marker for task ↔ equipment relations.
pub struct TaskEquipmentRelations;

impl Entity for TaskEquipmentRelations {
    type Record = TaskEquipmentRelation;
    type Key = TaskEquipmentKey;
    type Create = CreateTaskEquipmentRelation;
    type Update = UpdateTaskEquipmentRelation;

    const RESOURCE: &'static str = "task-equipment-relations";
    const MESSAGES: EntityMessages = messages::TASK_EQUIPMENT_RELATION;

    fn validate_create(input: &CreateTaskEquipmentRelation) -> Result<(), String> {
        validator::validate_create_task_equipment(input)
    }

    fn validate_update(input: &UpdateTaskEquipmentRelation) -> Result<(), String> {
        validator::validate_update_task_equipment(input)
    }

    fn key_of(record: &TaskEquipmentRelation) -> TaskEquipmentKey {
        TaskEquipmentKey {
            task_id: record.task_id,
            equipment_id: record.equipment_id,
        }
    }
}
