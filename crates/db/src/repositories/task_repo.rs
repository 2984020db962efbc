//! Repository for the `tasks` table.

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use pme_core::validation::{check_name, check_optional_name};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::validators::task::NAME_FIELD;

const COLUMNS: &str = "id, task_name, task_type_id, plan_id, created_at, updated_at, deleted_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// An unknown `task_type_id` surfaces as [`StoreError::InvalidInput`].
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, StoreError> {
        check_name(&input.task_name, NAME_FIELD).map_err(StoreError::InvalidInput)?;

        let query = format!(
            "INSERT INTO tasks (task_name, task_type_id, plan_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(input.task_name.trim())
            .bind(input.task_type_id)
            .bind(input.plan_id)
            .fetch_one(pool)
            .await?;
        Ok(task)
    }

    /// Find a task by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        include_deleted: bool,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM tasks WHERE id = $1 AND ($2 OR deleted_at IS NULL)");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await
    }

    /// List tasks, most recently created first.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1 OR deleted_at IS NULL)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only supplied fields in `input` are applied; an explicit
    /// `planId: null` unlinks the plan.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, StoreError> {
        check_optional_name(input.task_name.as_deref(), NAME_FIELD)
            .map_err(StoreError::InvalidInput)?;

        let query = format!(
            "UPDATE tasks SET
                task_name = COALESCE($2, task_name),
                task_type_id = COALESCE($3, task_type_id),
                plan_id = CASE WHEN $4 THEN $5 ELSE plan_id END,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(input.task_name.as_deref().map(str::trim))
            .bind(input.task_type_id)
            .bind(input.plan_id.is_some())
            .bind(input.plan_id.flatten())
            .fetch_optional(pool)
            .await?;
        Ok(task)
    }

    /// Soft-delete a task, returning the row as deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
