use pme_core::validation::{check_color_code, check_name, check_non_negative, check_optional_name};

use crate::models::task_type::{CreateTaskType, UpdateTaskType};

pub const NAME_FIELD: &str = "タスク種別名";
const SORT_ORDER_FIELD: &str = "表示順";

pub fn validate_create(input: &CreateTaskType) -> Result<(), String> {
    check_name(&input.type_name, NAME_FIELD)?;
    check_color_code(input.color_code.as_deref())?;
    check_non_negative(input.sort_order, SORT_ORDER_FIELD)
}

pub fn validate_update(input: &UpdateTaskType) -> Result<(), String> {
    check_optional_name(input.type_name.as_deref(), NAME_FIELD)?;
    check_color_code(input.color_code.as_deref())?;
    check_non_negative(input.sort_order, SORT_ORDER_FIELD)
}
