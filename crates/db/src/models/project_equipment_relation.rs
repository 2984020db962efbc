//! Project ↔ equipment relation model and DTOs.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::relation as validator;

composite_key! {
    /// Primary key of `project_equipment_relations`.
    ProjectEquipmentKey { project_id, equipment_id }
}

/// A row from the `project_equipment_relations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEquipmentRelation {
    pub project_id: DbId,
    pub equipment_id: DbId,
    pub usage_type: String,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for attaching equipment to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectEquipmentRelation {
    pub project_id: DbId,
    pub equipment_id: DbId,
    /// Defaults to `"use"` if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    /// Defaults to 1 if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
}

/// DTO for updating a project ↔ equipment relation. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectEquipmentRelation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
}

/// Entity marker for project ↔ equipment relations.
pub struct ProjectEquipmentRelations;

impl Entity for ProjectEquipmentRelations {
    type Record = ProjectEquipmentRelation;
    type Key = ProjectEquipmentKey;
    type Create = CreateProjectEquipmentRelation;
    type Update = UpdateProjectEquipmentRelation;

    const RESOURCE: &'static str = "project-equipment-relations";
    const MESSAGES: EntityMessages = messages::PROJECT_EQUIPMENT_RELATION;

    fn validate_create(input: &CreateProjectEquipmentRelation) -> Result<(), String> {
        validator::validate_create_project_equipment(input)
    }

    fn validate_update(input: &UpdateProjectEquipmentRelation) -> Result<(), String> {
        validator::validate_update_project_equipment(input)
    }

    fn key_of(record: &ProjectEquipmentRelation) -> ProjectEquipmentKey {
        ProjectEquipmentKey {
            project_id: record.project_id,
            equipment_id: record.equipment_id,
        }
    }
}
