//! Handlers for task-specific endpoints.

use axum::extract::State;
use pme_db::models::task::{TaskRelations, Tasks};

use crate::extract::ValidPath;
use crate::handlers::crud::{parse_key, KeyParams};
use crate::response::EnvelopeResponse;
use crate::services::relations::RelationService;

/// GET /api/v1/tasks/{id}/relations
///
/// Projects, assignees, and equipment linked to a live task.
pub async fn relations(
    State(service): State<RelationService>,
    ValidPath(params): KeyParams,
) -> EnvelopeResponse<TaskRelations> {
    let envelope = match parse_key::<Tasks, _>(&params) {
        Ok(id) => service.task_relations(&id).await,
        Err(envelope) => envelope,
    };
    EnvelopeResponse::ok(envelope)
}
