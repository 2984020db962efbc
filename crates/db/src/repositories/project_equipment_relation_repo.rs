//! Repository for the `project_equipment_relations` join table.

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::project_equipment_relation::{
    CreateProjectEquipmentRelation, ProjectEquipmentKey, ProjectEquipmentRelation,
    UpdateProjectEquipmentRelation,
};

const COLUMNS: &str =
    "project_id, equipment_id, usage_type, quantity, created_at, updated_at, deleted_at";

/// Provides CRUD operations for equipment assigned to projects.
pub struct ProjectEquipmentRelationRepo;

impl ProjectEquipmentRelationRepo {
    /// Attach equipment to a project, reviving a soft-deleted attachment.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProjectEquipmentRelation,
    ) -> Result<ProjectEquipmentRelation, StoreError> {
        let query = format!(
            "INSERT INTO project_equipment_relations (project_id, equipment_id, usage_type, quantity)
             VALUES ($1, $2, COALESCE($3, 'use'), COALESCE($4, 1))
             ON CONFLICT (project_id, equipment_id) DO UPDATE SET
                usage_type = EXCLUDED.usage_type,
                quantity = EXCLUDED.quantity,
                created_at = NOW(),
                updated_at = NOW(),
                deleted_at = NULL
             WHERE project_equipment_relations.deleted_at IS NOT NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectEquipmentRelation>(&query)
            .bind(input.project_id)
            .bind(input.equipment_id)
            .bind(&input.usage_type)
            .bind(input.quantity)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| {
                StoreError::Conflict(format!(
                    "equipment {} is already attached to project {}",
                    input.equipment_id, input.project_id
                ))
            })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        key: ProjectEquipmentKey,
        include_deleted: bool,
    ) -> Result<Option<ProjectEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_equipment_relations
             WHERE project_id = $1 AND equipment_id = $2 AND ($3 OR deleted_at IS NULL)"
        );
        sqlx::query_as::<_, ProjectEquipmentRelation>(&query)
            .bind(key.project_id)
            .bind(key.equipment_id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<ProjectEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_equipment_relations
             WHERE ($1 OR deleted_at IS NULL)
             ORDER BY project_id, created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ProjectEquipmentRelation>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Live equipment attachments of one project.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_equipment_relations
             WHERE project_id = $1 AND deleted_at IS NULL
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, ProjectEquipmentRelation>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        key: ProjectEquipmentKey,
        input: &UpdateProjectEquipmentRelation,
    ) -> Result<Option<ProjectEquipmentRelation>, StoreError> {
        let query = format!(
            "UPDATE project_equipment_relations SET
                usage_type = COALESCE($3, usage_type),
                quantity = COALESCE($4, quantity),
                updated_at = NOW()
             WHERE project_id = $1 AND equipment_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let relation = sqlx::query_as::<_, ProjectEquipmentRelation>(&query)
            .bind(key.project_id)
            .bind(key.equipment_id)
            .bind(&input.usage_type)
            .bind(input.quantity)
            .fetch_optional(pool)
            .await?;
        Ok(relation)
    }

    pub async fn soft_delete(
        pool: &PgPool,
        key: ProjectEquipmentKey,
    ) -> Result<Option<ProjectEquipmentRelation>, sqlx::Error> {
        let query = format!(
            "UPDATE project_equipment_relations SET deleted_at = NOW(), updated_at = NOW()
             WHERE project_id = $1 AND equipment_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectEquipmentRelation>(&query)
            .bind(key.project_id)
            .bind(key.equipment_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn hard_delete(
        pool: &PgPool,
        key: ProjectEquipmentKey,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM project_equipment_relations WHERE project_id = $1 AND equipment_id = $2",
        )
        .bind(key.project_id)
        .bind(key.equipment_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
