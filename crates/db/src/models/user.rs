//! User entity model and DTOs.
//!
//! Users have no soft-delete column; deleting a user removes the row.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::user as validator;

/// A user row from the `users` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Entity marker for users.
pub struct Users;

impl Entity for Users {
    type Record = User;
    type Key = DbId;
    type Create = CreateUser;
    type Update = UpdateUser;

    const RESOURCE: &'static str = "users";
    const MESSAGES: EntityMessages = messages::USER;

    fn validate_create(input: &CreateUser) -> Result<(), String> {
        validator::validate_create(input)
    }

    fn validate_update(input: &UpdateUser) -> Result<(), String> {
        validator::validate_update(input)
    }

    fn key_of(record: &User) -> DbId {
        record.id
    }
}
