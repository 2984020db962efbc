use pme_core::validation::{check_email, check_name, check_optional_name};

use crate::models::user::{CreateUser, UpdateUser};

pub const NAME_FIELD: &str = "ユーザー名";

pub fn validate_create(input: &CreateUser) -> Result<(), String> {
    check_name(&input.name, NAME_FIELD)?;
    check_email(&input.email)
}

pub fn validate_update(input: &UpdateUser) -> Result<(), String> {
    check_optional_name(input.name.as_deref(), NAME_FIELD)?;
    if let Some(email) = input.email.as_deref() {
        check_email(email)?;
    }
    Ok(())
}
