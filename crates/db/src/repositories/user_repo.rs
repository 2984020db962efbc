//! Repository for the `users` table.
//!
//! Users have no soft-delete column: `delete` removes the row and, through
//! the foreign key cascade, the user's sessions.

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use pme_core::validation::{check_name, check_optional_name};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::validators::user::NAME_FIELD;

const COLUMNS: &str = "id, name, email, email_verified, image, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email surfaces as [`StoreError::Conflict`].
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, StoreError> {
        check_name(&input.name, NAME_FIELD).map_err(StoreError::InvalidInput)?;

        let query = format!(
            "INSERT INTO users (name, email, email_verified, image)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(input.email_verified)
            .bind(&input.image)
            .fetch_one(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by ID. `_include_deleted` has no effect for users.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        _include_deleted: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List users ordered by name.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             ORDER BY name ASC, created_at ASC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, StoreError> {
        check_optional_name(input.name.as_deref(), NAME_FIELD).map_err(StoreError::InvalidInput)?;

        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                email_verified = COALESCE($4, email_verified),
                image = COALESCE($5, image),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.email.as_deref().map(str::trim))
            .bind(input.email_verified)
            .bind(&input.image)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Delete a user, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("DELETE FROM users WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a user by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
