//! Equipment master model and DTOs.
//!
//! Equipment forms a tree through the nullable self-reference `parent_id`.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::equipment as validator;

/// A row from the `equipment_masters` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentMaster {
    pub id: DbId,
    pub equipment_name: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// DTO for creating equipment. `parent_id` must reference active equipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    pub equipment_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<DbId>,
}

/// DTO for updating equipment.
///
/// `parent_id` distinguishes "absent" (keep) from `null` (move to top level).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<Option<DbId>>,
}

/// Entity marker for the equipment master.
pub struct EquipmentMasters;

impl Entity for EquipmentMasters {
    type Record = EquipmentMaster;
    type Key = DbId;
    type Create = CreateEquipment;
    type Update = UpdateEquipment;

    const RESOURCE: &'static str = "equipment";
    const MESSAGES: EntityMessages = messages::EQUIPMENT;

    fn validate_create(input: &CreateEquipment) -> Result<(), String> {
        validator::validate_create(input)
    }

    fn validate_update(input: &UpdateEquipment) -> Result<(), String> {
        validator::validate_update(input)
    }

    fn key_of(record: &EquipmentMaster) -> DbId {
        record.id
    }
}
