//! Handlers for equipment-specific endpoints.

use axum::extract::State;
use pme_core::equipment_tree::{build_tree, TreeNode};
use pme_core::query::ListFilter;
use pme_db::models::equipment::{EquipmentMaster, EquipmentMasters};

use crate::response::EnvelopeResponse;
use crate::services::EntityService;

/// GET /api/v1/equipment/tree
///
/// Live equipment nested under its parents. Nodes whose parent is deleted
/// are shown at the top level.
pub async fn tree(
    State(service): State<EntityService<EquipmentMasters>>,
) -> EnvelopeResponse<Vec<TreeNode<EquipmentMaster>>> {
    let envelope = service
        .get_all(&ListFilter::default())
        .await
        .map(|items| build_tree(items, |e| (e.id, e.parent_id)));
    EnvelopeResponse::ok(envelope)
}
