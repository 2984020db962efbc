use pme_core::validation::{check_name, check_optional_name};

use crate::models::project::{CreateProject, UpdateProject};

pub const NAME_FIELD: &str = "プロジェクト名";

pub fn validate_create(input: &CreateProject) -> Result<(), String> {
    check_name(&input.name, NAME_FIELD)
}

pub fn validate_update(input: &UpdateProject) -> Result<(), String> {
    check_optional_name(input.name.as_deref(), NAME_FIELD)
}
