//! Read-only views over the relation tables, keyed by the record they
//! hang off.

use std::sync::Arc;

use pme_core::envelope::Envelope;
use pme_core::types::DbId;
use pme_db::models::project::Projects;
use pme_db::models::project_equipment_relation::{
    ProjectEquipmentRelation, ProjectEquipmentRelations,
};
use pme_db::models::task::{TaskRelations, Tasks};
use pme_db::{Entity, RelationLookup};

use super::{failure, EntityService};

/// Relation listings for a live owner record.
///
/// The owner is looked up first, so a missing or deleted owner reports its
/// own not-found message instead of an empty list.
#[derive(Clone)]
pub struct RelationService {
    tasks: EntityService<Tasks>,
    projects: EntityService<Projects>,
    lookup: Arc<dyn RelationLookup>,
}

impl RelationService {
    pub fn new(
        tasks: EntityService<Tasks>,
        projects: EntityService<Projects>,
        lookup: Arc<dyn RelationLookup>,
    ) -> Self {
        Self {
            tasks,
            projects,
            lookup,
        }
    }

    /// Projects, assignees, and equipment linked to a task.
    pub async fn task_relations(&self, task_id: &DbId) -> Envelope<TaskRelations> {
        if let Err(failed) = self.tasks.get_by_id(task_id, false).await.ok_or_failure() {
            return failed;
        }
        match self.lookup.relations_of_task(*task_id).await {
            Ok(relations) => Envelope::ok(relations),
            Err(err) => failure::<Tasks, _>(
                "task_relations",
                Tasks::MESSAGES.fetch_failed,
                err,
                task_id,
            ),
        }
    }

    /// Equipment assigned to a project.
    pub async fn project_equipment(
        &self,
        project_id: &DbId,
    ) -> Envelope<Vec<ProjectEquipmentRelation>> {
        if let Err(failed) = self.projects.get_by_id(project_id, false).await.ok_or_failure() {
            return failed;
        }
        match self.lookup.equipment_of_project(*project_id).await {
            Ok(rows) => Envelope::ok(rows),
            Err(err) => failure::<ProjectEquipmentRelations, _>(
                "project_equipment",
                ProjectEquipmentRelations::MESSAGES.list_failed,
                err,
                project_id,
            ),
        }
    }
}
