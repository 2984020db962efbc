//! Repository for the `task_user_relations` join table (task assignees).

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::task_user_relation::{
    CreateTaskUserRelation, TaskUserKey, TaskUserRelation, UpdateTaskUserRelation,
};

const COLUMNS: &str = "task_id, user_id, role_type, planned_hours, actual_hours, \
                        created_at, updated_at, deleted_at";

/// Provides CRUD operations for task assignments.
pub struct TaskUserRelationRepo;

impl TaskUserRelationRepo {
    /// Assign a user to a task, reviving a soft-deleted assignment.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTaskUserRelation,
    ) -> Result<TaskUserRelation, StoreError> {
        let query = format!(
            "INSERT INTO task_user_relations (task_id, user_id, role_type, planned_hours, actual_hours)
             VALUES ($1, $2, COALESCE($3, 'assignee'), $4, $5)
             ON CONFLICT (task_id, user_id) DO UPDATE SET
                role_type = EXCLUDED.role_type,
                planned_hours = EXCLUDED.planned_hours,
                actual_hours = EXCLUDED.actual_hours,
                created_at = NOW(),
                updated_at = NOW(),
                deleted_at = NULL
             WHERE task_user_relations.deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskUserRelation>(&query)
            .bind(input.task_id)
            .bind(input.user_id)
            .bind(&input.role_type)
            .bind(input.planned_hours)
            .bind(input.actual_hours)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                StoreError::Conflict(format!(
                    "user {} is already assigned to task {}",
                    input.user_id, input.task_id
                ))
            })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        key: TaskUserKey,
        include_deleted: bool,
    ) -> Result<Option<TaskUserRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_user_relations
             WHERE task_id = $1 AND user_id = $2 AND ($3 OR deleted_at IS NULL)"
        );
        sqlx::query_as::<_, TaskUserRelation>(&query)
            .bind(key.task_id)
            .bind(key.user_id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<TaskUserRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_user_relations
             WHERE ($1 OR deleted_at IS NULL)
             ORDER BY task_id, created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TaskUserRelation>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Live assignments of one task.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskUserRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_user_relations
             WHERE task_id = $1 AND deleted_at IS NULL
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, TaskUserRelation>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        key: TaskUserKey,
        input: &UpdateTaskUserRelation,
    ) -> Result<Option<TaskUserRelation>, StoreError> {
        let query = format!(
            "UPDATE task_user_relations SET
                role_type = COALESCE($3, role_type),
                planned_hours = COALESCE($4, planned_hours),
                actual_hours = COALESCE($5, actual_hours),
                updated_at = NOW()
             WHERE task_id = $1 AND user_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let relation = sqlx::query_as::<_, TaskUserRelation>(&query)
            .bind(key.task_id)
            .bind(key.user_id)
            .bind(&input.role_type)
            .bind(input.planned_hours)
            .bind(input.actual_hours)
            .fetch_optional(pool)
            .await?;
        Ok(relation)
    }

    pub async fn soft_delete(
        pool: &PgPool,
        key: TaskUserKey,
    ) -> Result<Option<TaskUserRelation>, sqlx::Error> {
        let query = format!(
            "UPDATE task_user_relations SET deleted_at = NOW(), updated_at = NOW()
             WHERE task_id = $1 AND user_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskUserRelation>(&query)
            .bind(key.task_id)
            .bind(key.user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn hard_delete(pool: &PgPool, key: TaskUserKey) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM task_user_relations WHERE task_id = $1 AND user_id = $2")
                .bind(key.task_id)
                .bind(key.user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
