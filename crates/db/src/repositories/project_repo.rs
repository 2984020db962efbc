//! Repository for the `projects` table.

use chrono::NaiveDate;
use pme_core::project_number::{day_prefix, format_project_number};
use pme_core::query::ListFilter;
use pme_core::types::DbId;
use pme_core::validation::{check_name, check_optional_name};
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::project::{CreateProject, Project, ProjectRow, UpdateProject};
use crate::validators::project::NAME_FIELD;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, project_number, created_at, updated_at, deleted_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project numbered for `issued_on`, returning the created row.
    ///
    /// The daily counter is bumped with an upsert in the same transaction as
    /// the insert, so concurrent creates on one day get distinct sequences.
    /// A counter row missing for a day that already has projects is seeded
    /// from the highest number issued that day.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
        issued_on: NaiveDate,
    ) -> Result<Project, StoreError> {
        check_name(&input.name, NAME_FIELD).map_err(StoreError::InvalidInput)?;

        let mut tx = pool.begin().await?;

        let sequence: i32 = sqlx::query_scalar(
            "INSERT INTO project_number_sequences (issued_on, last_value)
             VALUES ($1, 1 + COALESCE(
                 (SELECT MAX(CAST(RIGHT(project_number, 3) AS INTEGER))
                    FROM projects WHERE project_number LIKE $2), 0))
             ON CONFLICT (issued_on)
             DO UPDATE SET
                last_value = project_number_sequences.last_value + 1,
                updated_at = NOW()
             RETURNING last_value",
        )
        .bind(issued_on)
        .bind(format!("{}%", day_prefix(issued_on)))
        .fetch_one(&mut *tx)
        .await?;

        let project_number = u32::try_from(sequence)
            .ok()
            .and_then(|seq| format_project_number(issued_on, seq))
            .ok_or(StoreError::SequenceExhausted(issued_on))?;

        let query = format!(
            "INSERT INTO projects (name, project_number)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(input.name.trim())
            .bind(&project_number)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Find a project by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        include_deleted: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE id = $1 AND ($2 OR deleted_at IS NULL)"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(include_deleted)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Project::from))
    }

    /// List projects, most recently created first.
    pub async fn list(pool: &PgPool, filter: &ListFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1 OR deleted_at IS NULL)
             ORDER BY created_at DESC, project_number DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(filter.include_deleted)
            .bind(filter.effective_limit())
            .bind(filter.effective_offset())
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, StoreError> {
        check_optional_name(input.name.as_deref(), NAME_FIELD).map_err(StoreError::InvalidInput)?;

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Project::from))
    }

    /// Soft-delete a project, returning the row as deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Project::from))
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
