//! Repository for the `equipment_masters` table.
//!
//! Equipment forms a tree through the nullable self reference `parent_id`.
//! Parent references are checked here: the parent must exist and be live,
//! and an update may not move a node under itself or its own subtree.

use pme_core::query::ListFilter;
use pme_core::types::DbId;
use pme_core::validation::{check_name, check_optional_name};
use sqlx::{PgExecutor, PgPool};

use crate::error::StoreError;
use crate::models::equipment::{CreateEquipment, EquipmentMaster, UpdateEquipment};
use crate::validators::equipment::{
    NAME_FIELD, PARENT_IS_DESCENDANT, PARENT_IS_SELF, PARENT_NOT_FOUND,
};

const COLUMNS: &str = "id, equipment_name, parent_id, created_at, updated_at, deleted_at";

/// Advisory lock key serializing parent changes across the whole tree.
const TREE_LOCK_KEY: i64 = 0x504d_455f_5452_4545;

/// Provides CRUD and tree operations for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Insert a new equipment node, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEquipment,
    ) -> Result<EquipmentMaster, StoreError> {
        check_name(&input.equipment_name, NAME_FIELD).map_err(StoreError::InvalidInput)?;

        let mut tx = pool.begin().await?;
        if let Some(parent_id) = input.parent_id {
            ensure_live_parent(&mut *tx, parent_id).await?;
        }

        let query = format!(
            "INSERT INTO equipment_masters (equipment_name, parent_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let equipment = sqlx::query_as::<_, EquipmentMaster>(&query)
            .bind(input.equipment_name.trim())
            .bind(input.parent_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(equipment)
    }

    /// Find an equipment node by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        include_deleted: bool,
    ) -> Result<Option<EquipmentMaster>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment_masters WHERE id = $1 AND ($2 OR deleted_at IS NULL)"
        );
        sqlx::query_as::<_, EquipmentMaster>(&query)
            .bind(id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await
    }

    /// List equipment ordered by name.
    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
    ) -> Result<Vec<EquipmentMaster>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment_masters
             WHERE ($1 OR deleted_at IS NULL)
             ORDER BY equipment_name ASC, created_at ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, EquipmentMaster>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await
    }

    /// Update an equipment node. Only supplied fields are applied;
    /// `parentId: null` detaches the node to the top level.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<EquipmentMaster>, StoreError> {
        check_optional_name(input.equipment_name.as_deref(), NAME_FIELD)
            .map_err(StoreError::InvalidInput)?;

        let mut tx = pool.begin().await?;
        if let Some(Some(parent_id)) = input.parent_id {
            if parent_id == id {
                return Err(StoreError::InvalidInput(PARENT_IS_SELF.to_string()));
            }
            // Concurrent moves could each pass the subtree check and close a cycle.
            lock_tree(&mut *tx).await?;
            ensure_live_parent(&mut *tx, parent_id).await?;
            if subtree_contains(&mut *tx, id, parent_id).await? {
                return Err(StoreError::InvalidInput(PARENT_IS_DESCENDANT.to_string()));
            }
        }

        let query = format!(
            "UPDATE equipment_masters SET
                equipment_name = COALESCE($2, equipment_name),
                parent_id = CASE WHEN $3 THEN $4 ELSE parent_id END,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let equipment = sqlx::query_as::<_, EquipmentMaster>(&query)
            .bind(id)
            .bind(input.equipment_name.as_deref().map(str::trim))
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(equipment)
    }

    /// Soft-delete an equipment node, returning the row as deleted.
    ///
    /// Live children are left in place and show up as top-level nodes.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EquipmentMaster>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment_masters SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EquipmentMaster>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an equipment node. Children are detached by the
    /// foreign key (`ON DELETE SET NULL`).
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM equipment_masters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Held until the transaction ends.
async fn lock_tree<'e>(executor: impl PgExecutor<'e>) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(TREE_LOCK_KEY)
        .execute(executor)
        .await?;
    Ok(())
}

async fn ensure_live_parent<'e>(
    executor: impl PgExecutor<'e>,
    parent_id: DbId,
) -> Result<(), StoreError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
             SELECT 1 FROM equipment_masters WHERE id = $1 AND deleted_at IS NULL
         )",
    )
    .bind(parent_id)
    .fetch_one(executor)
    .await?;

    if exists {
        Ok(())
    } else {
        Err(StoreError::InvalidInput(PARENT_NOT_FOUND.to_string()))
    }
}

async fn subtree_contains<'e>(
    executor: impl PgExecutor<'e>,
    root: DbId,
    candidate: DbId,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "WITH RECURSIVE subtree AS (
             SELECT id FROM equipment_masters WHERE id = $1
             UNION
             SELECT e.id FROM equipment_masters e
             JOIN subtree s ON e.parent_id = s.id
         )
         SELECT EXISTS (SELECT 1 FROM subtree WHERE id = $2)",
    )
    .bind(root)
    .bind(candidate)
    .fetch_one(executor)
    .await
}
