use pme_core::validation::{check_name, check_optional_name};

use crate::models::equipment::{CreateEquipment, UpdateEquipment};

pub const NAME_FIELD: &str = "設備名";

pub const PARENT_NOT_FOUND: &str = "親設備が見つかりません";
pub const PARENT_IS_SELF: &str = "自身を親設備に指定することはできません";
pub const PARENT_IS_DESCENDANT: &str = "子孫の設備を親設備に指定することはできません";

pub fn validate_create(input: &CreateEquipment) -> Result<(), String> {
    check_name(&input.equipment_name, NAME_FIELD)
}

/// Parent references are checked by the repository, which can see the tree.
pub fn validate_update(input: &UpdateEquipment) -> Result<(), String> {
    check_optional_name(input.equipment_name.as_deref(), NAME_FIELD)
}
