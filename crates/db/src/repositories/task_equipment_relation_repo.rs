//! Repository for the `task_equipment_relations` join table.

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::task_equipment_relation::{
    CreateTaskEquipmentRelation, TaskEquipmentKey, TaskEquipmentRelation,
    UpdateTaskEquipmentRelation,
};

const COLUMNS: &str = "task_id, equipment_id, usage_type, quantity, sort_order, \
                        created_at, updated_at, deleted_at";

/// Provides CRUD operations for equipment used by tasks.
pub struct TaskEquipmentRelationRepo;

impl TaskEquipmentRelationRepo {
    /// Attach equipment to a task, reviving a soft-deleted attachment.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTaskEquipmentRelation,
    ) -> Result<TaskEquipmentRelation, StoreError> {
        let query = format!(
            "INSERT INTO task_equipment_relations (task_id, equipment_id, usage_type, quantity, sort_order)
             VALUES ($1, $2, COALESCE($3, 'use'), COALESCE($4, 1), COALESCE($5, 0))
             ON CONFLICT (task_id, equipment_id) DO UPDATE SET
                usage_type = EXCLUDED.usage_type,
                quantity = EXCLUDED.quantity,
                sort_order = EXCLUDED.sort_order,
                created_at = NOW(),
                updated_at = NOW(),
                deleted_at = NULL
             WHERE task_equipment_relations.deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskEquipmentRelation>(&query)
            .bind(input.task_id)
            .bind(input.equipment_id)
            .bind(&input.usage_type)
            .bind(input.quantity)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                StoreError::Conflict(format!(
                    "equipment {} is already attached to task {}",
                    input.equipment_id, input.task_id
                ))
            })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        key: TaskEquipmentKey,
        include_deleted: bool,
    ) -> Result<Option<TaskEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_equipment_relations
             WHERE task_id = $1 AND equipment_id = $2 AND ($3 OR deleted_at IS NULL)"
        );
        sqlx::query_as::<_, TaskEquipmentRelation>(&query)
            .bind(key.task_id)
            .bind(key.equipment_id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<TaskEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_equipment_relations
             WHERE ($1 OR deleted_at IS NULL)
             ORDER BY task_id, sort_order ASC, created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, TaskEquipmentRelation>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Live equipment attachments of one task, in display order.
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM task_equipment_relations
             WHERE task_id = $1 AND deleted_at IS NULL
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, TaskEquipmentRelation>(&query)
            .bind(task_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        key: TaskEquipmentKey,
        input: &UpdateTaskEquipmentRelation,
    ) -> Result<Option<TaskEquipmentRelation>, StoreError> {
        let query = format!(
            "UPDATE task_equipment_relations SET
                usage_type = COALESCE($3, usage_type),
                quantity = COALESCE($4, quantity),
                sort_order = COALESCE($5, sort_order),
                updated_at = NOW()
             WHERE task_id = $1 AND equipment_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let relation = sqlx::query_as::<_, TaskEquipmentRelation>(&query)
            .bind(key.task_id)
            .bind(key.equipment_id)
            .bind(&input.usage_type)
            .bind(input.quantity)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await?;
        Ok(relation)
    }

    pub async fn soft_delete(
        pool: &PgPool,
        key: TaskEquipmentKey,
    ) -> Result<Option<TaskEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "UPDATE task_equipment_relations SET deleted_at = NOW(), updated_at = NOW()
             WHERE task_id = $1 AND equipment_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TaskEquipmentRelation>(&query)
            .bind(key.task_id)
            .bind(key.equipment_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn hard_delete(pool: &PgPool, key: TaskEquipmentKey) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM task_equipment_relations WHERE task_id = $1 AND equipment_id = $2",
        )
        .bind(key.task_id)
        .bind(key.equipment_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
