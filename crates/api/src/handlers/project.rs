//! Handlers for project-specific endpoints.

use axum::extract::State;
use pme_db::models::project::Projects;
use pme_db::models::project_equipment_relation::ProjectEquipmentRelation;

use crate::extract::ValidPath;
use crate::handlers::crud::{parse_key, KeyParams};
use crate::response::EnvelopeResponse;
use crate::services::relations::RelationService;

/// GET /api/v1/projects/{id}/equipment
pub async fn equipment(
    State(service): State<RelationService>,
    ValidPath(params): KeyParams,
) -> EnvelopeResponse<Vec<ProjectEquipmentRelation>> {
    let envelope = match parse_key::<Projects, _>(&params) {
        Ok(id) => service.project_equipment(&id).await,
        Err(envelope) => envelope,
    };
    EnvelopeResponse::ok(envelope)
}
