//! Repository for the `task_project_relations` join table.

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::task_project_relation::{
    CreateTaskProjectRelation, TaskProjectKey, TaskProjectRelation, UpdateTaskProjectRelation,
};

const COLUMNS: &str =
    "task_id, project_id, relation_type, sort_order, created_at, updated_at, deleted_at";

/// Provides CRUD operations for task ↔ project links.
pub struct TaskProjectRelationRepo;

impl TaskProjectRelationRepo {
    /// Link a task to a project.
    ///
    /// A soft-deleted link with the same key is revived with the new
    /// attributes; a live one is a [`StoreError::Conflict`].
    pub async fn create(
        pool: &PgPool,
        input: &CreateTaskProjectRelation,
    ) -> Result<TaskProjectRelation, StoreError> {
        let query = format!(
            "INSERT INTO task_project_relations (task_id, project_id, relation_type, sort_order)
             VALUES ($1, $2, COALESCE($3, 'related'), COALESCE($4, 0))
             ON CONFLICT (task_id, project_id) DO UPDATE SET
                relation_type = EXCLUDED.relation_type,
                sort_order = EXCLUDED.sort_order,
                created_at = NOW(),
                updated_at = NOW(),
                deleted_at = NULL
             WHERE task_project_relations.deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskProjectRelation>(&query)
            .bind(input.task_id)
            .bind(input.project_id)
            .bind(&input.relation_type)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                StoreError::Conflict(format!(
                    "task {} is already linked to project {}",
                    input.task_id, input.project_id
                ))
            })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        key: TaskProjectKey,
        include_deleted: bool,
    ) -> Result<Option<TaskProjectRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_project_relations
             WHERE task_id = $1 AND project_id = $2 AND ($3 OR deleted_at IS NULL)"
        );
        sqlx::query_as::<_, TaskProjectRelation>(&query)
            .bind(key.task_id)
            .bind(key.project_id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<TaskProjectRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_project_relations
             WHERE ($1 OR deleted_at IS NULL)
             ORDER BY task_id, sort_order ASC, created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TaskProjectRelation>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Live project links of one task, in display order.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskProjectRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_project_relations
             WHERE task_id = $1 AND deleted_at IS NULL
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, TaskProjectRelation>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        key: TaskProjectKey,
        input: &UpdateTaskProjectRelation,
    ) -> Result<Option<TaskProjectRelation>, StoreError> {
        let query = format!(
            "UPDATE task_project_relations SET
                relation_type = COALESCE($3, relation_type),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
             WHERE task_id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let relation = sqlx::query_as::<_, TaskProjectRelation>(&query)
            .bind(key.task_id)
            .bind(key.project_id)
            .bind(&input.relation_type)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await?;
        Ok(relation)
    }

    pub async fn soft_delete(
        pool: &PgPool,
        key: TaskProjectKey,
    ) -> Result<Option<TaskProjectRelation>, sqlx::Error> {
        let query = format!(
            "UPDATE task_project_relations SET deleted_at = NOW(), updated_at = NOW()
             WHERE task_id = $1 AND project_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskProjectRelation>(&query)
            .bind(key.task_id)
            .bind(key.project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn hard_delete(pool: &PgPool, key: TaskProjectKey) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM task_project_relations WHERE task_id = $1 AND project_id = $2")
                .bind(key.task_id)
                .bind(key.project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
