//! Repository for the `task_types` lookup table.
//!
//! Task types are retired by clearing `is_active` rather than stamping
//! `deleted_at`.

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use pme_core::validation::{check_name, check_optional_name};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::task_type::{CreateTaskType, TaskType, UpdateTaskType};
use crate::validators::task_type::NAME_FIELD;

const COLUMNS: &str =
    "id, type_name, description, color_code, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for task types.
pub struct TaskTypeRepo;

impl TaskTypeRepo {
    /// Insert a new task type, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTaskType) -> Result<TaskType, StoreError> {
        check_name(&input.type_name, NAME_FIELD).map_err(StoreError::InvalidInput)?;

        let query = format!(
            "INSERT INTO task_types (type_name, description, color_code, sort_order)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        let task_type = sqlx::query_as::<_, TaskType>(&query)
            .bind(input.type_name.trim())
            .bind(&input.description)
            .bind(&input.color_code)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await?;
        Ok(task_type)
    }

    /// Find a task type by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        include_deleted: bool,
    ) -> Result<Option<TaskType>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM task_types WHERE id = $1 AND ($2 OR is_active = true)");
        sqlx::query_as::<_, TaskType>(&query)
            .bind(id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await
    }

    /// List task types by display order.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<TaskType>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_types
             WHERE ($1 OR is_active = true)
             ORDER BY sort_order ASC, type_name ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TaskType>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Update a task type. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTaskType,
    ) -> Result<Option<TaskType>, StoreError> {
        check_optional_name(input.type_name.as_deref(), NAME_FIELD)
            .map_err(StoreError::InvalidInput)?;

        let query = format!(
            "UPDATE task_types SET
                type_name = COALESCE($2, type_name),
                description = COALESCE($3, description),
                color_code = COALESCE($4, color_code),
                sort_order = COALESCE($5, sort_order),
                updated_at = NOW()
             WHERE id = $1 AND is_active = true
             RETURNING {COLUMNS}"
        );
        let task_type = sqlx::query_as::<_, TaskType>(&query)
            .bind(id)
            .bind(input.type_name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.color_code)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await?;
        Ok(task_type)
    }

    /// Deactivate a task type, returning the row as deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<Option<TaskType>, sqlx::Error> {
        let query = format!(
            "UPDATE task_types SET is_active = false, updated_at = NOW()
             WHERE id = $1 AND is_active = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task type. Fails while tasks still reference it.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_types WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
