use pme_core::validation::{check_name, check_optional_name};

use crate::models::task::{CreateTask, UpdateTask};

pub const NAME_FIELD: &str = "タスク名";

pub fn validate_create(input: &CreateTask) -> Result<(), String> {
    check_name(&input.task_name, NAME_FIELD)
}

pub fn validate_update(input: &UpdateTask) -> Result<(), String> {
    check_optional_name(input.task_name.as_deref(), NAME_FIELD)
}
