//! Project entity model and DTOs.

use pme_core::messages::{self, EntityMessages};
use pme_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::Entity;
use crate::validators::project as validator;

/// Lifecycle status shown for a project.
///
/// Derived from `deleted_at`; `Completed` is a recognised value for callers
/// but is never stored or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Inactive,
    Completed,
}

impl ProjectStatus {
    pub fn from_deleted_at(deleted_at: Option<Timestamp>) -> Self {
        if deleted_at.is_some() {
            ProjectStatus::Inactive
        } else {
            ProjectStatus::Active
        }
    }
}

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub project_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Project view record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub name: String,
    /// `PME-YYYYMMDD-NNN`.
    pub project_number: String,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            project_number: row.project_number,
            status: ProjectStatus::from_deleted_at(row.deleted_at),
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

/// DTO for creating a new project. The project number is issued by the
/// repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Entity marker for projects.
pub struct Projects;

impl Entity for Projects {
    type Record = Project;
    type Key = DbId;
    type Create = CreateProject;
    type Update = UpdateProject;

    const RESOURCE: &'static str = "projects";
    const MESSAGES: EntityMessages = messages::PROJECT;

    fn validate_create(input: &CreateProject) -> Result<(), String> {
        validator::validate_create(input)
    }

    fn validate_update(input: &UpdateProject) -> Result<(), String> {
        validator::validate_update(input)
    }

    fn key_of(record: &Project) -> DbId {
        record.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn row(deleted_at: Option<Timestamp>) -> ProjectRow {
        let now = Utc::now();
        ProjectRow {
            id: Uuid::new_v4(),
            name: "Line 3 retrofit".to_string(),
            project_number: "PME-20241231-001".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at,
        }
    }

    #[test]
    fn live_row_maps_to_active() {
        let project = Project::from(row(None));
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.project_number, "PME-20241231-001");
    }

    #[test]
    fn deleted_row_maps_to_inactive() {
        let project = Project::from(row(Some(Utc::now())));
        assert_eq!(project.status, ProjectStatus::Inactive);
    }

    #[test]
    fn record_envelope_decodes_from_wire() {
        use pme_core::envelope::Envelope;

        let project = Project::from(row(None));
        let wire = serde_json::to_string(&Envelope::ok_with_message(
            project.clone(),
            messages::PROJECT.created,
        ))
        .unwrap();

        let decoded: Envelope<Project> = serde_json::from_str(&wire).unwrap();
        assert_eq!(decoded.data, Some(project));
        assert_eq!(decoded.message.as_deref(), Some("プロジェクトを作成しました"));

        let list: Envelope<Vec<Project>> =
            serde_json::from_str(r#"{"success": true, "data": []}"#).unwrap();
        assert_eq!(list.data, Some(Vec::new()));
    }

    #[test]
    fn record_serializes_camel_case() {
        let json = serde_json::to_value(Project::from(row(None))).unwrap();
        assert_eq!(json["projectNumber"], "PME-20241231-001");
        assert_eq!(json["status"], "active");
        assert!(json["deletedAt"].is_null());
    }
}
